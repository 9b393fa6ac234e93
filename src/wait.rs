//! The condition-polling wait primitive.
//!
//! A wait repeatedly polls a [`Condition`] against a driver until the condition
//! holds, the deadline elapses, or the condition fails with an error the wait was
//! not told to ignore. One mechanism covers the three usual shapes: a driver-wide
//! default applied to every lookup (see [`crate::Session::set_implicit_wait`]), a
//! one-off wait on a named condition, and a fully fluent wait with a custom poll
//! interval and ignored error kinds.

use crate::driver::Driver;
use crate::error::{DriverError, ErrorKind, InvalidWaitSpec, WaitError};
use crate::Locator;
use std::cmp;
use std::future::Future;
use std::time::Duration;
use tokio::time::{self, Instant};
use url::Url;

/// How long a wait runs before giving up, unless overridden with
/// [`Wait::at_most`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a wait sleeps between polls, unless overridden with [`Wait::every`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A probe evaluated over and over by a wait until it produces a value.
///
/// A poll either yields the output (success, which ends the wait immediately), or a
/// [`DriverError`] that the surrounding [`WaitSpec`] classifies as retryable or
/// fatal. Conditions may carry their own state between polls; the wait itself keeps
/// none. The common probes live in [`crate::conditions`].
pub trait Condition<D: Driver> {
    /// What a successful poll produces.
    type Output;

    /// Probe the driver once.
    fn poll(
        &mut self,
        driver: &mut D,
    ) -> impl Future<Output = Result<Self::Output, DriverError>>;
}

/// A validated wait configuration: total timeout, poll interval, and the error
/// kinds to retry.
///
/// A `WaitSpec` is created per wait call, drives one polling loop, and is then
/// discarded; it owns no resources and has no identity beyond that call.
#[derive(Clone, Debug)]
pub struct WaitSpec {
    timeout: Duration,
    poll_interval: Duration,
    ignored: Vec<ErrorKind>,
}

impl WaitSpec {
    /// Create a spec with the given timeout and poll interval, ignoring
    /// [`ErrorKind::NotFound`].
    ///
    /// The interval must be non-zero, and must not exceed the timeout when the
    /// timeout itself is non-zero: a wait that could never poll within its own
    /// deadline is rejected here, before any polling. A zero timeout is valid and
    /// means "poll exactly once, never sleep"; the interval bound is vacuous there.
    pub fn new(timeout: Duration, poll_interval: Duration) -> Result<Self, InvalidWaitSpec> {
        if poll_interval.is_zero() {
            return Err(InvalidWaitSpec {
                field: "poll_interval",
                reason: "must be greater than zero",
            });
        }
        if !timeout.is_zero() && poll_interval > timeout {
            return Err(InvalidWaitSpec {
                field: "poll_interval",
                reason: "must not exceed the timeout",
            });
        }
        Ok(WaitSpec {
            timeout,
            poll_interval,
            ignored: vec![ErrorKind::NotFound],
        })
    }

    /// Also retry errors of the given kind.
    ///
    /// [`ErrorKind::SessionTerminated`] is fatal no matter what: a dead session
    /// aborts the wait on the spot even if named here.
    pub fn ignoring(mut self, kind: ErrorKind) -> Self {
        if !self.ignored.contains(&kind) {
            self.ignored.push(kind);
        }
        self
    }

    /// The total time budget of one wait call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The pause between two polls.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub(crate) fn retries(&self, kind: ErrorKind) -> bool {
        kind != ErrorKind::SessionTerminated && self.ignored.contains(&kind)
    }
}

impl Default for WaitSpec {
    fn default() -> Self {
        WaitSpec {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            ignored: vec![ErrorKind::NotFound],
        }
    }
}

/// A wait against one driver, under construction.
///
/// Built by [`Wait::new`] or [`crate::Session::wait`], tuned with [`at_most`],
/// [`every`], and [`ignoring`], and consumed by [`on`] or one of the shorthands.
/// The durations are validated into a [`WaitSpec`] when the wait starts; until
/// then the builder holds whatever it was given.
///
/// [`at_most`]: Wait::at_most
/// [`every`]: Wait::every
/// [`ignoring`]: Wait::ignoring
/// [`on`]: Wait::on
#[derive(Debug)]
pub struct Wait<'c, D> {
    driver: &'c mut D,
    timeout: Duration,
    poll_interval: Duration,
    extra_ignored: Vec<ErrorKind>,
}

impl<'c, D> Wait<'c, D>
where
    D: Driver,
{
    /// Start building a wait with the default timeout and poll interval.
    pub fn new(driver: &'c mut D) -> Self {
        Wait {
            driver,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            extra_ignored: Vec::new(),
        }
    }

    /// Set the total time budget for this wait.
    pub fn at_most(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the pause between polls.
    pub fn every(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Also retry errors of the given kind, on top of the default
    /// [`ErrorKind::NotFound`].
    pub fn ignoring(mut self, kind: ErrorKind) -> Self {
        self.extra_ignored.push(kind);
        self
    }

    /// Poll `condition` until it produces a value or the wait gives up.
    pub async fn on<C>(self, condition: C) -> Result<C::Output, WaitError>
    where
        C: Condition<D>,
    {
        let mut spec = WaitSpec::new(self.timeout, self.poll_interval)?;
        for kind in self.extra_ignored {
            spec = spec.ignoring(kind);
        }
        wait_until(&spec, self.driver, condition).await
    }

    /// Wait for an element matching `search` to be present, and return it.
    pub async fn for_element(self, search: Locator<'_>) -> Result<D::Elem, WaitError> {
        self.on(crate::conditions::element_located(search)).await
    }

    /// Wait for the session's current URL to become `url`.
    pub async fn for_url(self, url: Url) -> Result<(), WaitError> {
        self.on(crate::conditions::url_is(url)).await
    }
}

/// Poll `condition` against `driver` under `spec` until success, timeout, or an
/// unrecoverable error.
///
/// Success returns immediately, never waiting out the rest of the timeout. A
/// failure whose kind the spec retries puts the wait to sleep for the poll
/// interval (or whatever remains of the deadline, if that is shorter) and polls
/// again. Any other failure propagates at once. Reaching the deadline yields
/// [`WaitError::Timeout`] carrying the last observed error.
///
/// A zero-timeout spec polls exactly once and never sleeps. Overlapping waits are
/// independent; nothing is shared between calls.
pub async fn wait_until<D, C>(
    spec: &WaitSpec,
    driver: &mut D,
    mut condition: C,
) -> Result<C::Output, WaitError>
where
    D: Driver,
    C: Condition<D>,
{
    let start = Instant::now();
    let deadline = start + spec.timeout;
    let mut polls = 0u32;
    loop {
        polls += 1;
        match condition.poll(driver).await {
            Ok(value) => {
                tracing::trace!(polls, waited = ?start.elapsed(), "condition met");
                return Ok(value);
            }
            Err(e) if spec.retries(e.kind()) => {
                let now = Instant::now();
                if now >= deadline {
                    tracing::debug!(polls, waited = ?(now - start), last = %e, "wait timed out");
                    return Err(WaitError::Timeout {
                        waited: now - start,
                        last: Some(e),
                    });
                }
                tracing::trace!(polls, error = %e, "condition not met yet");
                time::sleep_until(cmp::min(deadline, now + spec.poll_interval)).await;
            }
            Err(e) => {
                tracing::debug!(polls, error = %e, "condition failed");
                return Err(WaitError::Driver(e));
            }
        }
    }
}
