use super::{accepted, TodolistService};
use crate::client::TodolistClient;
use crate::error::OperationError;
use crate::store::{RequestStatus, TaskAction};
use crate::transport::Transport;
use crate::types::{UpdateDomainTaskModel, UpdateTaskModel};

impl<T: Transport> TodolistService<T> {
    pub async fn fetch_tasks(&self, todolist_id: &str) {
        let result = self.try_fetch_tasks(todolist_id).await;
        self.finish(result);
    }

    pub async fn add_task(&self, title: &str, todolist_id: &str) {
        let result = self.try_add_task(title, todolist_id).await;
        self.finish(result);
    }

    /// Fire-and-forget. Any decoded response removes the task locally,
    /// whatever its result code; failures are logged and otherwise dropped,
    /// and global status is never touched.
    pub async fn remove_task(&self, task_id: &str, todolist_id: &str) {
        let request = self.client.build_delete_task(todolist_id, task_id);
        match self.send(request, TodolistClient::parse_delete_task).await {
            Ok(_) => {
                let removal = self.commit(TaskAction::Remove {
                    task_id: task_id.to_string(),
                    todolist_id: todolist_id.to_string(),
                });
                if let Err(err) = removal {
                    tracing::debug!(%err, task_id, todolist_id, "task removal not applied");
                }
            }
            Err(err) => tracing::debug!(%err, task_id, todolist_id, "task removal failed"),
        }
    }

    /// Sends the full task, built from the current snapshot with `change`
    /// laid over it, and commits only `change` once the server accepts.
    /// Does nothing if the task is not in the snapshot.
    pub async fn update_task(&self, task_id: &str, change: UpdateDomainTaskModel, todolist_id: &str) {
        let snapshot = self.store.get_state();
        let Some(task) = snapshot
            .tasks
            .get(todolist_id)
            .and_then(|bucket| bucket.iter().find(|t| t.id == task_id))
        else {
            tracing::warn!(task_id, todolist_id, "task not found in the state");
            return;
        };
        let model = UpdateTaskModel::merged(task, &change);
        let result = self.try_update_task(task_id, &model, change, todolist_id).await;
        self.finish(result);
    }

    async fn try_fetch_tasks(&self, todolist_id: &str) -> Result<(), OperationError> {
        self.set_status(RequestStatus::Loading)?;
        let response = self
            .send(self.client.build_get_tasks(todolist_id), TodolistClient::parse_get_tasks)
            .await?;
        self.commit(TaskAction::SetAll {
            tasks: response.items,
            todolist_id: todolist_id.to_string(),
        })?;
        self.set_status(RequestStatus::Succeeded)
    }

    async fn try_add_task(&self, title: &str, todolist_id: &str) -> Result<(), OperationError> {
        self.set_status(RequestStatus::Loading)?;
        let request = self.client.build_create_task(todolist_id, title)?;
        let envelope = self.send(request, TodolistClient::parse_create_task).await?;
        let created = accepted(envelope)?;
        self.commit(TaskAction::Add(created.item))?;
        self.set_status(RequestStatus::Succeeded)
    }

    async fn try_update_task(
        &self,
        task_id: &str,
        model: &UpdateTaskModel,
        change: UpdateDomainTaskModel,
        todolist_id: &str,
    ) -> Result<(), OperationError> {
        let request = self.client.build_update_task(todolist_id, task_id, model)?;
        let envelope = self.send(request, TodolistClient::parse_update_task).await?;
        accepted(envelope)?;
        self.commit(TaskAction::Update {
            task_id: task_id.to_string(),
            model: change,
            todolist_id: todolist_id.to_string(),
        })
    }
}
