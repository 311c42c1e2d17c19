//! Client core for the todolist service: auth, todolists and tasks kept in
//! step with a REST backend.
//!
//! # Overview
//! `TodolistClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). A host
//! supplies a [`Transport`] to run the round-trips. [`TodolistService`]
//! strings the two together into asynchronous operations that dispatch
//! actions into an explicitly constructed [`Store`].
//!
//! # Design
//! - Reducers are pure functions over owned state; they are testable
//!   without a store, a transport or a runtime.
//! - Task buckets follow the todolist collection through an explicit
//!   synchronization step in the root reducer.
//! - Operations never return errors. Failures are translated into the
//!   global app status by `error_utils`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod error_utils;
pub mod http;
pub mod service;
pub mod store;
pub mod transport;
pub mod types;

pub use client::TodolistClient;
pub use config::ClientConfig;
pub use error::{ApiError, OperationError, StateError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::TodolistService;
pub use store::{RequestStatus, RootAction, RootState, Store};
pub use transport::Transport;
pub use types::{
    LoginParams, Task, TaskPriority, TaskStatus, Todolist, UpdateDomainTaskModel, UpdateTaskModel,
};
