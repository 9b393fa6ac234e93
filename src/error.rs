use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::time::Duration;
use url::ParseError;

/// The kind of a [`DriverError`].
///
/// Kinds are what wait loops reason about: a [`crate::WaitSpec`] names the kinds it is
/// willing to retry, and everything else fails the wait immediately.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum ErrorKind {
    /// No element (or alert, or state) currently matches the probe.
    ///
    /// This is the transient "not *yet* there" failure, and the only kind retried by
    /// default while polling for appearance.
    NotFound,

    /// The element exists but cannot currently receive the requested action, e.g.
    /// because it is obscured or disabled.
    NotInteractable,

    /// The underlying driver or browser session is gone.
    ///
    /// This kind is never retried, even if named in an ignored set: once the session
    /// is dead, no amount of polling will bring it back.
    SessionTerminated,
}

impl ErrorKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match *self {
            ErrorKind::NotFound => "not found",
            ErrorKind::NotInteractable => "not interactable",
            ErrorKind::SessionTerminated => "session terminated",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error occurred while executing some remote UI operation.
///
/// Driver implementations map whatever their wire protocol reports into one of these
/// three variants; the polling machinery in [`crate::wait`] only ever inspects the
/// [`kind`](DriverError::kind).
#[derive(Debug)]
pub enum DriverError {
    /// No element was found matching the given locator.
    ///
    /// While a wait is polling for appearance this is the expected miss; outside a
    /// wait it usually means the page is structurally different than assumed.
    NotFound(Cow<'static, str>),

    /// An element was found but could not receive the requested action.
    NotInteractable(Cow<'static, str>),

    /// The driver or browser session has been terminated.
    SessionTerminated(Cow<'static, str>),
}

impl DriverError {
    /// A [`DriverError::NotFound`] with the given diagnostic message.
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        DriverError::NotFound(message.into())
    }

    /// A [`DriverError::NotInteractable`] with the given diagnostic message.
    pub fn not_interactable(message: impl Into<Cow<'static, str>>) -> Self {
        DriverError::NotInteractable(message.into())
    }

    /// A [`DriverError::SessionTerminated`] with the given diagnostic message.
    pub fn session_terminated(message: impl Into<Cow<'static, str>>) -> Self {
        DriverError::SessionTerminated(message.into())
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            DriverError::NotFound(..) => ErrorKind::NotFound,
            DriverError::NotInteractable(..) => ErrorKind::NotInteractable,
            DriverError::SessionTerminated(..) => ErrorKind::SessionTerminated,
        }
    }

    /// Returns true if this error indicates that a matching element was not found.
    ///
    /// Equivalent to
    /// ```
    /// # use attesa::error::DriverError;
    /// # let e = DriverError::not_found("no alert is currently open");
    /// let is_miss = if let DriverError::NotFound(..) = e {
    ///   true
    /// } else {
    ///   false
    /// };
    /// ```
    pub fn is_miss(&self) -> bool {
        matches!(self, DriverError::NotFound(..))
    }

    /// Returns true if the underlying session is gone.
    pub fn is_session_terminated(&self) -> bool {
        matches!(self, DriverError::SessionTerminated(..))
    }

    /// The diagnostic message supplied by the driver.
    pub fn message(&self) -> &str {
        match *self {
            DriverError::NotFound(ref m)
            | DriverError::NotInteractable(ref m)
            | DriverError::SessionTerminated(ref m) => m,
        }
    }
}

impl Error for DriverError {}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match *self {
            DriverError::NotFound(..) => "no match for probe",
            DriverError::NotInteractable(..) => "element cannot receive the action",
            DriverError::SessionTerminated(..) => "driver session is gone",
        };
        write!(f, "{}: {}", what, self.message())
    }
}

/// An error occurred while waiting on a condition.
#[derive(Debug)]
pub enum WaitError {
    /// The deadline elapsed before the condition held.
    ///
    /// Deliberately distinct from [`WaitError::Driver`] so callers can tell "slow to
    /// appear" apart from "structurally broken". `last` carries the error observed on
    /// the final poll for diagnostics.
    Timeout {
        /// How long the wait actually ran.
        waited: Duration,
        /// The error returned by the last poll of the condition.
        last: Option<DriverError>,
    },

    /// The condition failed with an error whose kind was not in the ignored set.
    ///
    /// Propagated verbatim on the first occurrence, without further polling.
    Driver(DriverError),

    /// The durations given to a wait builder did not form a valid [`crate::WaitSpec`].
    InvalidSpec(InvalidWaitSpec),
}

impl WaitError {
    /// Returns true if the wait ran out of time rather than hitting a hard failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }
}

impl Error for WaitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            WaitError::Timeout { ref last, .. } => {
                last.as_ref().map(|e| e as &(dyn Error + 'static))
            }
            WaitError::Driver(ref e) => Some(e),
            WaitError::InvalidSpec(ref e) => Some(e),
        }
    }
}

impl fmt::Display for WaitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            WaitError::Timeout { waited, ref last } => {
                write!(f, "condition still unmet after {:?}", waited)?;
                if let Some(ref last) = *last {
                    write!(f, " (last: {})", last)?;
                }
                Ok(())
            }
            WaitError::Driver(ref e) => write!(f, "{}", e),
            WaitError::InvalidSpec(ref e) => write!(f, "{}", e),
        }
    }
}

impl From<DriverError> for WaitError {
    fn from(e: DriverError) -> Self {
        WaitError::Driver(e)
    }
}

impl From<InvalidWaitSpec> for WaitError {
    fn from(e: InvalidWaitSpec) -> Self {
        WaitError::InvalidSpec(e)
    }
}

/// Error of attempting to construct a [`crate::WaitSpec`] from inconsistent durations.
#[derive(Clone, Debug)]
pub struct InvalidWaitSpec {
    pub(crate) field: &'static str,
    pub(crate) reason: &'static str,
}

impl fmt::Display for InvalidWaitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid `{}`: {}", self.field, self.reason)
    }
}

impl Error for InvalidWaitSpec {}

/// An error occurred while resolving a [`crate::DriverConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The configured WebDriver URL is invalid.
    BadWebdriverUrl(ParseError),
    /// The configured capabilities are not a JSON object.
    BadCapabilities(serde_json::Error),
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ConfigError::BadWebdriverUrl(ref e) => Some(e),
            ConfigError::BadCapabilities(ref e) => Some(e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigError::BadWebdriverUrl(ref e) => write!(f, "webdriver url is invalid: {}", e),
            ConfigError::BadCapabilities(ref e) => {
                write!(f, "capabilities are not a JSON object: {}", e)
            }
        }
    }
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::BadWebdriverUrl(e)
    }
}
