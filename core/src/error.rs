//! Error types for the todolist client and store.
//!
//! # Design
//! `ApiError` covers everything that can go wrong between building a request
//! and decoding its response; it is what the UI reports as a network error.
//! `StateError` comes from reducers that address a todolist with no task
//! bucket. `OperationError` is the union an asynchronous operation can end
//! with before the Error Translator turns it into app status.

use thiserror::Error;

/// Errors returned by `TodolistClient` parse methods and transports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 404: the todolist or task does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("no task bucket for todolist {0}")]
    UnknownTodolist(String),
}

/// Terminal outcome of a failed asynchronous operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The server answered with a non-zero result code.
    #[error("server rejected the request (result code {result_code})")]
    Application {
        result_code: i32,
        messages: Vec<String>,
    },

    #[error(transparent)]
    Network(#[from] ApiError),

    #[error(transparent)]
    State(#[from] StateError),
}
