//! Errors raised by reference type queries

use std::io;

use jdi_signature::MalformedSignature;
use jdwp_types::ErrorConstant;
use thiserror::Error;

/// A failure reported by a [RemoteReferenceType](crate::RemoteReferenceType), or by the transport
/// beneath it
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The target VM answered with an error code
    #[error("target VM reported {0:?}")]
    Jdwp(ErrorConstant),
    /// A type has not been loaded by the target VM yet
    #[error("class {0} has not been loaded")]
    ClassNotLoaded(String),
    /// The connection to the target VM failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RemoteError {
    /// Whether the target VM has no such information, e.g. a class compiled without debug attributes
    pub fn is_absent_information(&self) -> bool {
        matches!(self, RemoteError::Jdwp(ErrorConstant::AbsentInformation))
    }

    /// Whether a type could not be resolved because it is not loaded
    pub fn is_class_not_loaded(&self) -> bool {
        matches!(self, RemoteError::ClassNotLoaded(_))
    }
}

impl From<ErrorConstant> for RemoteError {
    fn from(value: ErrorConstant) -> Self {
        RemoteError::Jdwp(value)
    }
}

/// An error raised by a [ReferenceType](crate::ReferenceType)
#[derive(Debug, Error)]
pub enum JdiError {
    /// A signature reported by the target VM could not be decoded
    #[error(transparent)]
    MalformedSignature(#[from] MalformedSignature),
    /// A query against the target VM failed
    #[error("failed to query {operation}: {source}")]
    RemoteQueryFailed {
        /// What was being queried
        operation: &'static str,
        /// The underlying failure
        #[source]
        source: RemoteError,
    },
}

impl JdiError {
    /// Wraps a remote failure of the given operation
    pub(crate) fn remote(operation: &'static str) -> impl FnOnce(RemoteError) -> JdiError {
        move |source| JdiError::RemoteQueryFailed { operation, source }
    }

    /// Gets the remote failure, if this is one
    pub fn remote_error(&self) -> Option<&RemoteError> {
        match self {
            JdiError::RemoteQueryFailed { source, .. } => Some(source),
            JdiError::MalformedSignature(_) => None,
        }
    }
}
