use std::io;

use thiserror::Error;

use crate::method::Arity;

/// Why a method name did not resolve on a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum LookupFailure {
    /// Neither method set of the target has the name.
    #[strum(to_string = "not found")]
    Missing,
    /// The shared method set has no such name and the receiver is shared, so
    /// the exclusive method set could not be consulted.
    #[strum(to_string = "not found and cannot get address")]
    NotAddressable,
}

/// Coarse classification of an [`InvokeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ErrorKind {
    MethodNotFound,
    MalformedPayload,
    PayloadTooLarge,
    ArityMismatch,
    DecodeFailure,
    UnsupportedParameterKind,
    Internal,
}

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("method {method} {reason}")]
    MethodNotFound {
        method: String,
        reason: LookupFailure,
    },

    #[error("malformed JSON arguments: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("argument payload of {actual} bytes exceeds the limit of {limit} bytes")]
    PayloadTooLarge { limit: usize, actual: usize },

    #[error("method {method} requires {expected} arguments, but got {actual}")]
    ArityMismatch {
        method: String,
        expected: Arity,
        actual: usize,
    },

    #[error("cannot decode argument {index} of {method} into {type_name}: {source}")]
    DecodeFailure {
        method: String,
        index: usize,
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot decode into interface: parameter {index} of {method} has abstract type {type_name}")]
    UnsupportedParameterKind {
        method: String,
        index: usize,
        type_name: &'static str,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl InvokeError {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        InvokeError::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InvokeError::MethodNotFound { .. } => ErrorKind::MethodNotFound,
            InvokeError::MalformedPayload(_) => ErrorKind::MalformedPayload,
            InvokeError::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            InvokeError::ArityMismatch { .. } => ErrorKind::ArityMismatch,
            InvokeError::DecodeFailure { .. } => ErrorKind::DecodeFailure,
            InvokeError::UnsupportedParameterKind { .. } => ErrorKind::UnsupportedParameterKind,
            InvokeError::Internal(_) => ErrorKind::Internal,
        }
    }
}

pub type InvokeResult<T> = Result<T, InvokeError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invoke error: {0}")]
    Invoke(#[from] InvokeError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }
}
