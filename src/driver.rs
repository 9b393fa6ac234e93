//! The contract this crate requires from a remote UI driver.
//!
//! The driver itself (session bootstrap, wire protocol, browser management) lives
//! outside this crate. What the wait machinery needs from it is small: locate
//! elements, read their state, poke them, navigate, and deal with alerts. Each
//! operation either succeeds or fails with a [`DriverError`] whose
//! [kind](crate::error::ErrorKind) tells a wait loop whether retrying can help.
//!
//! Implementations are expected to be handles: cheap to pass around, with one
//! underlying session per driver value. [`Element`]s returned by a lookup stay valid
//! handles on their own and do not borrow the driver.

use crate::error::DriverError;
use crate::Locator;
use std::future::Future;
use url::Url;

/// A live remote UI session.
///
/// Errors map onto the three [`crate::error::ErrorKind`]s: a lookup with no match is
/// `NotFound`, a dead session is `SessionTerminated`, and implementations reserve
/// `NotInteractable` for element actions. A missing alert is a `NotFound`-kind
/// failure, mirroring a missing element.
pub trait Driver {
    /// The element handle type produced by lookups.
    type Elem: Element;

    /// Navigate directly to the given URL.
    fn goto(&mut self, url: &str) -> impl Future<Output = Result<(), DriverError>>;

    /// Go back to the previous page.
    fn back(&mut self) -> impl Future<Output = Result<(), DriverError>>;

    /// Reload the current page.
    fn refresh(&mut self) -> impl Future<Output = Result<(), DriverError>>;

    /// Retrieve the currently active URL for this session.
    fn current_url(&mut self) -> impl Future<Output = Result<Url, DriverError>>;

    /// Find the first element matching the given locator.
    fn locate(
        &mut self,
        search: Locator<'_>,
    ) -> impl Future<Output = Result<Self::Elem, DriverError>>;

    /// Find all elements matching the given locator.
    ///
    /// No match is not an error here; the result is simply empty.
    fn locate_all(
        &mut self,
        search: Locator<'_>,
    ) -> impl Future<Output = Result<Vec<Self::Elem>, DriverError>>;

    /// Get the text of the currently open alert.
    fn alert_text(&mut self) -> impl Future<Output = Result<String, DriverError>>;

    /// Accept the currently open alert, like a user clicking `OK`.
    fn accept_alert(&mut self) -> impl Future<Output = Result<(), DriverError>>;

    /// Dismiss the currently open alert, like a user clicking `Cancel`.
    fn dismiss_alert(&mut self) -> impl Future<Output = Result<(), DriverError>>;

    /// Terminate the session, releasing the underlying browser.
    ///
    /// Must be called on every exit path; see [`crate::Session`] for a scope that
    /// takes care of this.
    fn close(&mut self) -> impl Future<Output = Result<(), DriverError>>;
}

/// A single element in the rendered document.
pub trait Element {
    /// Whether the element is rendered visibly.
    fn is_displayed(&mut self) -> impl Future<Output = Result<bool, DriverError>>;

    /// Whether the element can currently be interacted with at all.
    fn is_enabled(&mut self) -> impl Future<Output = Result<bool, DriverError>>;

    /// Whether a checkbox, radio button, or option is currently selected.
    fn is_selected(&mut self) -> impl Future<Output = Result<bool, DriverError>>;

    /// The rendered text content of this element.
    fn text(&mut self) -> impl Future<Output = Result<String, DriverError>>;

    /// Look up an attribute value by name; `Ok(None)` if the attribute is absent.
    fn attr(&mut self, name: &str) -> impl Future<Output = Result<Option<String>, DriverError>>;

    /// Simulate the user clicking on this element.
    fn click(&mut self) -> impl Future<Output = Result<(), DriverError>>;

    /// Simulate the user typing `text` into this element.
    fn send_keys(&mut self, text: &str) -> impl Future<Output = Result<(), DriverError>>;

    /// Clear the element's current value.
    fn clear(&mut self) -> impl Future<Output = Result<(), DriverError>>;
}
