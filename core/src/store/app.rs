//! Global app status shared by every asynchronous operation.

use serde::{Deserialize, Serialize};

/// Request lifecycle flag. Used both for the global status and for the
/// per-todolist entity status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppState {
    pub status: RequestStatus,
    pub error: Option<String>,
    pub is_initialized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    SetAppStatus(RequestStatus),
    SetAppError(Option<String>),
    SetAppInitialized(bool),
}

/// Last writer wins; there is no counting of in-flight operations.
pub fn reduce(state: &AppState, action: &AppAction) -> AppState {
    let mut next = state.clone();
    match action {
        AppAction::SetAppStatus(status) => next.status = *status,
        AppAction::SetAppError(error) => next.error = error.clone(),
        AppAction::SetAppInitialized(flag) => next.is_initialized = *flag,
    }
    next
}
