use super::{accepted, TodolistService};
use crate::client::TodolistClient;
use crate::error::OperationError;
use crate::store::{FilterValue, RequestStatus, TodolistAction};
use crate::transport::Transport;

impl<T: Transport> TodolistService<T> {
    pub async fn fetch_todolists(&self) {
        let result = self.try_fetch_todolists().await;
        self.finish(result);
    }

    pub async fn create_todolist(&self, title: &str) {
        let result = self.try_create_todolist(title).await;
        self.finish(result);
    }

    /// Marks the todolist as loading while the delete is in flight. The
    /// entity status is never reset: if the delete fails the todolist stays
    /// `Loading`.
    pub async fn remove_todolist(&self, todolist_id: &str) {
        let result = self.try_remove_todolist(todolist_id).await;
        self.finish(result);
    }

    /// Renames after the server confirms. Global status is not touched on
    /// the way in or on success.
    pub async fn rename_todolist(&self, todolist_id: &str, title: &str) {
        let result = self.try_rename_todolist(todolist_id, title).await;
        self.finish(result);
    }

    /// Client-only; the filter is never sent to the server.
    pub fn change_todolist_filter(&self, todolist_id: &str, filter: FilterValue) {
        self.finish(self.commit(TodolistAction::ChangeFilter {
            id: todolist_id.to_string(),
            filter,
        }));
    }

    async fn try_fetch_todolists(&self) -> Result<(), OperationError> {
        self.set_status(RequestStatus::Loading)?;
        let todolists = self
            .send(self.client.build_get_todolists(), TodolistClient::parse_get_todolists)
            .await?;
        self.commit(TodolistAction::SetAll(todolists))?;
        self.set_status(RequestStatus::Succeeded)
    }

    async fn try_create_todolist(&self, title: &str) -> Result<(), OperationError> {
        self.set_status(RequestStatus::Loading)?;
        let request = self.client.build_create_todolist(title)?;
        let envelope = self.send(request, TodolistClient::parse_create_todolist).await?;
        let created = accepted(envelope)?;
        self.commit(TodolistAction::Add(created.item))?;
        self.set_status(RequestStatus::Succeeded)
    }

    async fn try_remove_todolist(&self, todolist_id: &str) -> Result<(), OperationError> {
        self.set_status(RequestStatus::Loading)?;
        self.commit(TodolistAction::ChangeEntityStatus {
            id: todolist_id.to_string(),
            status: RequestStatus::Loading,
        })?;
        let envelope = self
            .send(
                self.client.build_delete_todolist(todolist_id),
                TodolistClient::parse_delete_todolist,
            )
            .await?;
        accepted(envelope)?;
        self.commit(TodolistAction::Remove {
            id: todolist_id.to_string(),
        })?;
        self.set_status(RequestStatus::Succeeded)
    }

    async fn try_rename_todolist(&self, todolist_id: &str, title: &str) -> Result<(), OperationError> {
        let request = self.client.build_update_todolist(todolist_id, title)?;
        let envelope = self.send(request, TodolistClient::parse_update_todolist).await?;
        accepted(envelope)?;
        self.commit(TodolistAction::ChangeTitle {
            id: todolist_id.to_string(),
            title: title.to_string(),
        })
    }
}
