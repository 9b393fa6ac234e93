//! Scoped ownership of one driver session.
//!
//! A browser session is a resource: it must be acquired before any operation and
//! released on every exit path, or an orphaned browser process is left behind. A
//! [`Session`] owns a driver for the duration of one script, carries the optional
//! *implicit wait* applied to every lookup, and hands out explicit waits via
//! [`Session::wait`]. [`Session::run`] is the whole lifecycle in one call: build the
//! scope, run the script, close the driver no matter how the script ended.

use crate::conditions;
use crate::driver::Driver;
use crate::error::{DriverError, WaitError};
use crate::wait::{self, Wait, WaitSpec};
use crate::Locator;
use futures_util::future::LocalBoxFuture;
use url::Url;

/// One driver session, closed exactly once.
///
/// Dropping a session that was never [`close`](Session::close)d only logs a warning;
/// the driver cannot be asked to shut down from a destructor. Prefer
/// [`Session::run`], which closes on success and failure alike.
#[derive(Debug)]
pub struct Session<D: Driver> {
    driver: D,
    implicit: Option<WaitSpec>,
    closed: bool,
}

impl<D: Driver> Session<D> {
    /// Wrap a freshly acquired driver.
    pub fn new(driver: D) -> Self {
        Session {
            driver,
            implicit: None,
            closed: false,
        }
    }

    /// Install a default wait applied to every [`locate`](Session::locate) and
    /// [`locate_all`](Session::locate_all) on this session.
    pub fn set_implicit_wait(&mut self, spec: WaitSpec) {
        self.implicit = Some(spec);
    }

    /// Remove the default lookup wait again.
    pub fn clear_implicit_wait(&mut self) {
        self.implicit = None;
    }

    /// Start building an explicit wait against this session's driver.
    pub fn wait(&mut self) -> Wait<'_, D> {
        Wait::new(&mut self.driver)
    }

    /// Direct access to the wrapped driver, bypassing the implicit wait.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Navigate directly to the given URL.
    pub async fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        self.driver.goto(url).await
    }

    /// Go back to the previous page.
    pub async fn back(&mut self) -> Result<(), DriverError> {
        self.driver.back().await
    }

    /// Reload the current page.
    pub async fn refresh(&mut self) -> Result<(), DriverError> {
        self.driver.refresh().await
    }

    /// Retrieve the currently active URL.
    pub async fn current_url(&mut self) -> Result<Url, DriverError> {
        self.driver.current_url().await
    }

    /// Find the first element matching `search`.
    ///
    /// With an implicit wait installed, a lookup that does not match immediately is
    /// retried under that wait and only fails once it times out.
    pub async fn locate(&mut self, search: Locator<'_>) -> Result<D::Elem, WaitError> {
        match self.implicit {
            Some(ref spec) => {
                wait::wait_until(spec, &mut self.driver, conditions::element_located(search))
                    .await
            }
            None => Ok(self.driver.locate(search).await?),
        }
    }

    /// Find all elements matching `search`.
    ///
    /// With an implicit wait installed, the lookup is retried until it matches at
    /// least once; if the wait elapses first, the result is an empty collection
    /// rather than an error, as a collection lookup has no failure case of its own.
    pub async fn locate_all(&mut self, search: Locator<'_>) -> Result<Vec<D::Elem>, WaitError> {
        match self.implicit {
            Some(ref spec) => {
                match wait::wait_until(
                    spec,
                    &mut self.driver,
                    conditions::elements_located(search),
                )
                .await
                {
                    Ok(elems) => Ok(elems),
                    Err(WaitError::Timeout { .. }) => Ok(Vec::new()),
                    Err(e) => Err(e),
                }
            }
            None => Ok(self.driver.locate_all(search).await?),
        }
    }

    /// Get the text of the currently open alert.
    pub async fn alert_text(&mut self) -> Result<String, DriverError> {
        self.driver.alert_text().await
    }

    /// Accept the currently open alert.
    pub async fn accept_alert(&mut self) -> Result<(), DriverError> {
        self.driver.accept_alert().await
    }

    /// Dismiss the currently open alert.
    pub async fn dismiss_alert(&mut self) -> Result<(), DriverError> {
        self.driver.dismiss_alert().await
    }

    /// Terminate the underlying driver session.
    ///
    /// Safe to call more than once; only the first call reaches the driver.
    pub async fn close(&mut self) -> Result<(), DriverError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.driver.close().await
    }

    /// Run `script` in a session scope, closing the driver on every exit path.
    ///
    /// The script's error wins over a close failure; a close failure after a
    /// successful script surfaces as the result.
    ///
    /// ```no_run
    /// use attesa::error::WaitError;
    /// use attesa::{Driver, Locator, Session};
    /// use futures_util::FutureExt;
    ///
    /// async fn read_banner<D: Driver>(driver: D) -> Result<String, WaitError> {
    ///     Session::run(driver, |s: &mut Session<D>| {
    ///         async move {
    ///             s.goto("https://example.com/").await?;
    ///             let text = s.wait().on(attesa::conditions::text_present(
    ///                 Locator::Css("h1"),
    ///                 "Example",
    ///             )).await?;
    ///             Ok(text)
    ///         }
    ///         .boxed_local()
    ///     })
    ///     .await
    /// }
    /// ```
    pub async fn run<T, F>(driver: D, script: F) -> Result<T, WaitError>
    where
        F: for<'a> FnOnce(&'a mut Session<D>) -> LocalBoxFuture<'a, Result<T, WaitError>>,
    {
        let mut session = Session::new(driver);
        let outcome = script(&mut session).await;
        let closed = session.close().await;
        match outcome {
            Ok(value) => {
                closed?;
                Ok(value)
            }
            Err(e) => {
                if let Err(close_err) = closed {
                    tracing::warn!(error = %close_err, "failed to close session after script error");
                }
                Err(e)
            }
        }
    }
}

impl<D: Driver> Drop for Session<D> {
    fn drop(&mut self) {
        if !self.closed {
            tracing::warn!("session dropped without close; the driver may leak a browser process");
        }
    }
}
