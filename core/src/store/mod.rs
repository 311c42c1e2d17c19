//! Client-side state: one slice per concern plus the container that owns
//! them.
//!
//! # Design
//! - Each slice exposes a pure `reduce(&State, &Action) -> State`; nothing in
//!   a reducer performs I/O or touches another slice.
//! - [`reduce`] is the root reducer. After a todolist action it runs
//!   [`tasks::sync_buckets`] against the updated todolists, so every todolist
//!   id has a bucket and no bucket outlives the last todolist with its id.
//! - [`Store`] is constructed explicitly and shared by `Arc`. The lock is
//!   held only while a reducer runs, never across an await.
//! - Every applied action is broadcast to subscribers as the state-change
//!   event stream for a UI layer.

pub mod app;
pub mod auth;
pub mod tasks;
pub mod todolists;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::error::StateError;

pub use app::{AppAction, AppState, RequestStatus};
pub use auth::{AuthAction, AuthState};
pub use tasks::{TaskAction, TasksState};
pub use todolists::{FilterValue, TodolistAction, TodolistDomain, TodolistsState};

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RootState {
    pub app: AppState,
    pub auth: AuthState,
    pub todolists: TodolistsState,
    pub tasks: TasksState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootAction {
    App(AppAction),
    Auth(AuthAction),
    Todolists(TodolistAction),
    Tasks(TaskAction),
}

impl From<AppAction> for RootAction {
    fn from(action: AppAction) -> Self {
        RootAction::App(action)
    }
}

impl From<AuthAction> for RootAction {
    fn from(action: AuthAction) -> Self {
        RootAction::Auth(action)
    }
}

impl From<TodolistAction> for RootAction {
    fn from(action: TodolistAction) -> Self {
        RootAction::Todolists(action)
    }
}

impl From<TaskAction> for RootAction {
    fn from(action: TaskAction) -> Self {
        RootAction::Tasks(action)
    }
}

pub fn reduce(state: &RootState, action: &RootAction) -> Result<RootState, StateError> {
    let mut next = state.clone();
    match action {
        RootAction::App(action) => next.app = app::reduce(&state.app, action),
        RootAction::Auth(action) => next.auth = auth::reduce(&state.auth, action),
        RootAction::Todolists(action) => {
            next.todolists = todolists::reduce(&state.todolists, action);
            next.tasks = tasks::sync_buckets(&state.tasks, &next.todolists, action);
        }
        RootAction::Tasks(action) => next.tasks = tasks::reduce(&state.tasks, action)?,
    }
    Ok(next)
}

pub struct Store {
    state: Mutex<RootState>,
    events: broadcast::Sender<RootAction>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(RootState::default())
    }

    pub fn with_state(state: RootState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Mutex::new(state),
            events,
        }
    }

    /// Snapshot of the current state.
    pub fn get_state(&self) -> RootState {
        self.state.lock().clone()
    }

    /// Apply `action` through the root reducer. On error the state is left
    /// as it was and no event is emitted.
    pub fn dispatch(&self, action: impl Into<RootAction>) -> Result<(), StateError> {
        let action = action.into();
        {
            let mut state = self.state.lock();
            *state = reduce(&state, &action)?;
        }
        tracing::debug!(?action, "dispatched");
        // No subscribers is fine.
        let _ = self.events.send(action);
        Ok(())
    }

    /// Receive every action applied from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<RootAction> {
        self.events.subscribe()
    }
}
