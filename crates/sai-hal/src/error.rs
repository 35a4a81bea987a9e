//! SAI status codes and error handling.
//!
//! The HAL reports every outcome as a `sai_status_t` integer. This module
//! maps the codes the bring-up path can meet onto [`SaiStatus`] and converts
//! them into Rust's `Result` type.

use std::fmt;
use thiserror::Error;

/// SAI status codes matching `sai_status_t` in the SAI headers.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaiStatus {
    Success = 0,
    Failure = -1,
    NotSupported = -2,
    NoMemory = -3,
    InsufficientResources = -4,
    InvalidParameter = -5,
    ItemNotFound = -7,
    Uninitialized = -12,
    NotImplemented = -15,
}

impl SaiStatus {
    /// Creates a SaiStatus from a raw i32 value.
    ///
    /// Unknown codes collapse to `Failure`.
    pub fn from_raw(status: i32) -> Self {
        match status {
            0 => SaiStatus::Success,
            -2 => SaiStatus::NotSupported,
            -3 => SaiStatus::NoMemory,
            -4 => SaiStatus::InsufficientResources,
            -5 => SaiStatus::InvalidParameter,
            -7 => SaiStatus::ItemNotFound,
            -12 => SaiStatus::Uninitialized,
            -15 => SaiStatus::NotImplemented,
            _ => SaiStatus::Failure,
        }
    }

    /// Returns the raw `sai_status_t` value.
    pub fn as_raw(&self) -> i32 {
        *self as i32
    }

    /// Returns true if the status indicates success.
    pub fn is_success(&self) -> bool {
        *self == SaiStatus::Success
    }

    /// Converts to a Result, returning Ok(()) for success.
    pub fn into_result(self) -> SaiResult<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(SaiError::Status { status: self })
        }
    }
}

impl fmt::Display for SaiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SaiStatus::Success => "SAI_STATUS_SUCCESS",
            SaiStatus::Failure => "SAI_STATUS_FAILURE",
            SaiStatus::NotSupported => "SAI_STATUS_NOT_SUPPORTED",
            SaiStatus::NoMemory => "SAI_STATUS_NO_MEMORY",
            SaiStatus::InsufficientResources => "SAI_STATUS_INSUFFICIENT_RESOURCES",
            SaiStatus::InvalidParameter => "SAI_STATUS_INVALID_PARAMETER",
            SaiStatus::ItemNotFound => "SAI_STATUS_ITEM_NOT_FOUND",
            SaiStatus::Uninitialized => "SAI_STATUS_UNINITIALIZED",
            SaiStatus::NotImplemented => "SAI_STATUS_NOT_IMPLEMENTED",
        };
        write!(f, "{}", s)
    }
}

/// Error type for HAL operations.
#[derive(Debug, Clone, Error)]
pub enum SaiError {
    /// The HAL returned a non-success status.
    #[error("SAI operation failed: {status}")]
    Status { status: SaiStatus },

    /// Invalid parameter passed across the HAL boundary.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// An API table was queried before `api_initialize`.
    #[error("SAI not initialized")]
    Uninitialized,

    /// Internal error on the Rust side of the boundary.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SaiError {
    /// Creates an invalid parameter error with a message.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        SaiError::InvalidParameter {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        SaiError::Internal {
            message: message.into(),
        }
    }

    /// Returns the underlying SAI status, if any.
    pub fn status(&self) -> Option<SaiStatus> {
        match self {
            SaiError::Status { status } => Some(*status),
            SaiError::Uninitialized => Some(SaiStatus::Uninitialized),
            _ => None,
        }
    }
}

/// Result type for HAL operations.
pub type SaiResult<T> = Result<T, SaiError>;

/// Extension trait for converting raw SAI status codes.
pub trait SaiStatusExt {
    /// Converts a raw status code to a Result.
    fn to_result(self) -> SaiResult<()>;
}

impl SaiStatusExt for i32 {
    fn to_result(self) -> SaiResult<()> {
        SaiStatus::from_raw(self).into_result()
    }
}
