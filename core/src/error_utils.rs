//! Turns failed operations into a global `failed` status plus a message.

use crate::error::{ApiError, OperationError};
use crate::store::{AppAction, RequestStatus, Store};
use crate::types::ResultEnvelope;

pub const FALLBACK_MESSAGE: &str = "Some error occurred";

/// The server answered but rejected the request.
pub fn handle_server_app_error<D>(envelope: &ResultEnvelope<D>, store: &Store) {
    report_server_messages(&envelope.messages, store);
}

/// The request never got a usable answer.
pub fn handle_server_network_error(error: &ApiError, store: &Store) {
    report_failure(store, Some(error.to_string()));
}

pub fn handle_operation_error(error: &OperationError, store: &Store) {
    match error {
        OperationError::Application { messages, .. } => report_server_messages(messages, store),
        OperationError::Network(error) => handle_server_network_error(error, store),
        OperationError::State(error) => report_failure(store, Some(error.to_string())),
    }
}

fn report_server_messages(messages: &[String], store: &Store) {
    report_failure(store, messages.first().cloned());
}

fn report_failure(store: &Store, message: Option<String>) {
    let message = message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
    tracing::warn!(%message, "operation failed");
    for action in [
        AppAction::SetAppError(Some(message)),
        AppAction::SetAppStatus(RequestStatus::Failed),
    ] {
        if let Err(err) = store.dispatch(action) {
            tracing::error!(%err, "could not record operation failure");
        }
    }
}
