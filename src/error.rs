//! Crate-wide error type.

use core::fmt;

/// Everything that can go wrong in the render/clock core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The shared UI lock could not be taken within its timeout.
    ///
    /// Only the render scheduler and the clock producer ever take the lock,
    /// so this points at a stuck task. Callers treat it as fatal.
    LockAcquisition,
    /// A time component was out of range.
    InvalidArgument(InvalidTime),
    /// The UI runtime failed to process or draw.
    DisplayLibrary(UiFault),
    /// Board configuration could not be resolved.
    Config(ConfigError),
}

/// Which component of a time-of-day was rejected, and the value passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidTime {
    Hour(u8),
    Minute(u8),
    Second(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiFault {
    /// The draw target returned an error.
    Draw,
    /// No room for another label.
    WidgetLimit,
    /// Label text does not fit the label's buffer.
    TextTooLong,
    /// The label id does not belong to this screen.
    UnknownLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    UnknownPanel,
    UnknownTouch,
    /// Scheduler delay bounds are zero or inverted.
    DelayBand,
}

impl From<InvalidTime> for Error {
    fn from(e: InvalidTime) -> Self {
        Error::InvalidArgument(e)
    }
}

impl From<UiFault> for Error {
    fn from(e: UiFault) -> Self {
        Error::DisplayLibrary(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LockAcquisition => write!(f, "timed out acquiring the UI lock"),
            Error::InvalidArgument(InvalidTime::Hour(h)) => {
                write!(f, "hour {h} out of range 0..24")
            }
            Error::InvalidArgument(InvalidTime::Minute(m)) => {
                write!(f, "minute {m} out of range 0..60")
            }
            Error::InvalidArgument(InvalidTime::Second(s)) => {
                write!(f, "second {s} out of range 0..60")
            }
            Error::DisplayLibrary(UiFault::Draw) => write!(f, "draw target error"),
            Error::DisplayLibrary(UiFault::WidgetLimit) => write!(f, "too many labels"),
            Error::DisplayLibrary(UiFault::TextTooLong) => write!(f, "label text too long"),
            Error::DisplayLibrary(UiFault::UnknownLabel) => write!(f, "unknown label"),
            Error::Config(ConfigError::UnknownPanel) => write!(f, "unknown panel model"),
            Error::Config(ConfigError::UnknownTouch) => write!(f, "unknown touch controller"),
            Error::Config(ConfigError::DelayBand) => {
                write!(f, "scheduler delay bounds must satisfy 1 <= min <= max")
            }
        }
    }
}

impl core::error::Error for Error {}
