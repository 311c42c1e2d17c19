//! Asynchronous operations that keep the store in step with the server.
//!
//! # Design
//! Each public operation is a sequence of dispatches around one network call
//! made through the host's [`Transport`]. Operations return `()`: any failure
//! ends at the operation boundary, where the Error Translator records it as
//! global status. Operations are not cancellable and hold no lock across an
//! await, so overlapping calls race and the last response to arrive wins.

mod auth;
mod tasks;
mod todolists;

use std::sync::Arc;

use crate::client::TodolistClient;
use crate::error::{ApiError, OperationError};
use crate::error_utils::handle_operation_error;
use crate::http::{HttpRequest, HttpResponse};
use crate::store::{AppAction, RequestStatus, RootAction, Store};
use crate::transport::Transport;
use crate::types::ResultEnvelope;

pub struct TodolistService<T> {
    store: Arc<Store>,
    client: TodolistClient,
    transport: T,
}

impl<T: Transport> TodolistService<T> {
    pub fn new(store: Arc<Store>, client: TodolistClient, transport: T) -> Self {
        Self {
            store,
            client,
            transport,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn client(&self) -> &TodolistClient {
        &self.client
    }

    async fn send<R>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(&TodolistClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        parse(&self.client, response)
    }

    fn commit(&self, action: impl Into<RootAction>) -> Result<(), OperationError> {
        self.store.dispatch(action)?;
        Ok(())
    }

    fn set_status(&self, status: RequestStatus) -> Result<(), OperationError> {
        self.commit(AppAction::SetAppStatus(status))
    }

    fn finish(&self, result: Result<(), OperationError>) {
        if let Err(err) = result {
            handle_operation_error(&err, &self.store);
        }
    }
}

/// Unwrap the payload of an accepted envelope; a non-zero result code becomes
/// an application error.
fn accepted<D>(envelope: ResultEnvelope<D>) -> Result<D, OperationError> {
    if envelope.is_ok() {
        envelope.data.ok_or_else(|| {
            OperationError::Network(ApiError::DeserializationError(
                "accepted envelope without data".to_string(),
            ))
        })
    } else {
        Err(OperationError::Application {
            result_code: envelope.result_code,
            messages: envelope.messages,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport for driving operations without a server.

    use std::collections::VecDeque;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::sync::oneshot;

    use super::*;

    pub enum Reply {
        Ready(Result<HttpResponse, ApiError>),
        Deferred(oneshot::Receiver<Result<HttpResponse, ApiError>>),
    }

    /// Hands out queued replies in call order and records every request.
    #[derive(Default)]
    pub struct ScriptedTransport {
        replies: Mutex<VecDeque<Reply>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn reply_json(&self, body: serde_json::Value) {
            self.replies
                .lock()
                .push_back(Reply::Ready(Ok(HttpResponse::ok(body.to_string()))));
        }

        pub fn reply_error(&self, error: ApiError) {
            self.replies.lock().push_back(Reply::Ready(Err(error)));
        }

        pub fn reply_later(&self) -> oneshot::Sender<Result<HttpResponse, ApiError>> {
            let (tx, rx) = oneshot::channel();
            self.replies.lock().push_back(Reply::Deferred(rx));
            tx
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().push(request);
            let reply = self.replies.lock().pop_front();
            match reply {
                Some(Reply::Ready(result)) => result,
                Some(Reply::Deferred(rx)) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Transport("reply dropped".to_string()))),
                None => Err(ApiError::Transport("no scripted reply".to_string())),
            }
        }
    }

    pub fn service() -> TodolistService<Arc<ScriptedTransport>> {
        TodolistService::new(
            Arc::new(Store::new()),
            TodolistClient::new("http://test"),
            Arc::new(ScriptedTransport::default()),
        )
    }

    impl TodolistService<Arc<ScriptedTransport>> {
        pub fn transport(&self) -> &ScriptedTransport {
            &self.transport
        }
    }

    pub fn envelope(result_code: i32, messages: &[&str], data: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "resultCode": result_code,
            "messages": messages,
            "data": data,
        })
    }

    pub fn todolist_json(id: &str, title: &str) -> serde_json::Value {
        serde_json::json!({"id": id, "title": title, "addedDate": "2024-01-01T00:00:00", "order": 0})
    }

    pub fn task_json(id: &str, todolist_id: &str, title: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "todoListId": todolist_id,
            "title": title,
            "description": null,
            "status": 0,
            "priority": 1,
            "startDate": null,
            "deadline": null,
            "order": 0,
            "addedDate": "2024-01-01T00:00:00",
        })
    }
}
