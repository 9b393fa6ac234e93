//! Condition-polling waits for asynchronous UI state.
//!
//! Scripts that drive a browser through a remote-automation driver all hit the same
//! problem: the page renders asynchronously, so "the element is not there" usually
//! means "the element is not there *yet*". The usual answers are a driver-wide
//! default timeout on every lookup (an *implicit* wait), a one-off timeout on a
//! specific condition (an *explicit* wait), or a poll with a custom interval and a
//! custom set of ignored errors (a *fluent* wait). This crate expresses all three
//! as one mechanism: a [`WaitSpec`] (timeout, poll interval, ignored error kinds)
//! driving a loop over a [`Condition`].
//!
//! The driver itself is not implemented here. The [`Driver`] and
//! [`driver::Element`] traits describe the capability this crate needs from one
//! (locate elements, read their state, click them, send text, navigate, handle
//! alerts), and any WebDriver-style client can sit behind them.
//!
//! A wait succeeds the moment its condition holds; it never sleeps out the rest of
//! its budget. Transient misses ([`error::ErrorKind::NotFound`] by default) are
//! retried until the deadline; anything else fails the wait immediately, so a
//! structurally broken page is reported as such rather than as a slow one.
//!
//! # Example
//!
//! ```no_run
//! use attesa::driver::Element;
//! use attesa::error::WaitError;
//! use attesa::{conditions, Driver, Locator, Session};
//! use std::time::Duration;
//!
//! async fn sign_in<D: Driver>(driver: D) -> Result<(), WaitError> {
//!     let mut session = Session::new(driver);
//!     session.goto("https://example.com/login").await?;
//!
//!     let mut username = session.locate(Locator::Id("username")).await?;
//!     username.send_keys("demo").await?;
//!
//!     // Poll every 200ms, for up to 10 seconds, for the button to become clickable.
//!     let mut button = session
//!         .wait()
//!         .at_most(Duration::from_secs(10))
//!         .every(Duration::from_millis(200))
//!         .on(conditions::element_clickable(Locator::Css(
//!             "button[type=submit]",
//!         )))
//!         .await?;
//!     button.click().await?;
//!
//!     // The landing banner renders asynchronously after the redirect.
//!     let banner = session
//!         .wait()
//!         .on(conditions::text_present(
//!             Locator::Css("a.navbar-brand"),
//!             "ProtoCommerce",
//!         ))
//!         .await?;
//!     println!("landed on: {}", banner);
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! For scripts, [`Session::run`] wraps the whole thing and guarantees the driver is
//! closed on every exit path; the orphaned browser process is the one leak this
//! crate is built to prevent.
#![deny(missing_docs)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

use std::fmt;

/// Error types.
pub mod error;

/// The remote UI driver contract.
pub mod driver;

/// Wait configuration and the polling loop.
pub mod wait;

/// Ready-made conditions to wait on.
pub mod conditions;

/// Scoped driver ownership.
pub mod session;

/// Driver configuration from the environment.
pub mod config;

pub use crate::config::DriverConfig;
pub use crate::driver::Driver;
pub use crate::session::Session;
pub use crate::wait::{Condition, Wait, WaitSpec};

/// An element locator.
///
/// Plain data handed to the driver; which strategies a driver supports natively and
/// which it rewrites is its own business.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Locator<'a> {
    /// Find an element matching the given CSS selector.
    Css(&'a str),

    /// Find an element using the given `id`.
    Id(&'a str),

    /// Find an element using the given `name` attribute.
    Name(&'a str),

    /// Find an element carrying the given class.
    ClassName(&'a str),

    /// Find a link element with the given link text.
    ///
    /// The text matching is exact.
    LinkText(&'a str),

    /// Find an element using the given XPath expression.
    XPath(&'a str),
}

impl fmt::Display for Locator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Locator::Css(s) => write!(f, "css selector `{}`", s),
            Locator::Id(s) => write!(f, "id `{}`", s),
            Locator::Name(s) => write!(f, "name `{}`", s),
            Locator::ClassName(s) => write!(f, "class name `{}`", s),
            Locator::LinkText(s) => write!(f, "link text `{}`", s),
            Locator::XPath(s) => write!(f, "xpath `{}`", s),
        }
    }
}
