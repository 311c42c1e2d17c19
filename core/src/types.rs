//! Wire DTOs for the todolist API.
//!
//! # Design
//! Field names follow the server's camelCase schema. Task status and priority
//! travel as integers, so both enums convert through `u8`. The mock-server
//! crate defines its own copies of these types; integration tests catch any
//! schema drift between the two.

use serde::{Deserialize, Deserializer, Serialize};

/// A todolist as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todolist {
    pub id: String,
    pub title: String,
    pub added_date: String,
    pub order: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskStatus {
    New,
    InProgress,
    Completed,
    Draft,
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> u8 {
        match status {
            TaskStatus::New => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
            TaskStatus::Draft => 3,
        }
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskStatus::New),
            1 => Ok(TaskStatus::InProgress),
            2 => Ok(TaskStatus::Completed),
            3 => Ok(TaskStatus::Draft),
            other => Err(format!("unknown task status {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskPriority {
    Low,
    Middle,
    High,
    Urgent,
    Later,
}

impl From<TaskPriority> for u8 {
    fn from(priority: TaskPriority) -> u8 {
        match priority {
            TaskPriority::Low => 0,
            TaskPriority::Middle => 1,
            TaskPriority::High => 2,
            TaskPriority::Urgent => 3,
            TaskPriority::Later => 4,
        }
    }
}

impl TryFrom<u8> for TaskPriority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskPriority::Low),
            1 => Ok(TaskPriority::Middle),
            2 => Ok(TaskPriority::High),
            3 => Ok(TaskPriority::Urgent),
            4 => Ok(TaskPriority::Later),
            other => Err(format!("unknown task priority {other}")),
        }
    }
}

/// A task as stored by the server. `id` is unique within its todolist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub todo_list_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
    pub order: i64,
    pub added_date: String,
}

/// Full task body expected by `PUT /todo-lists/{id}/tasks/{taskId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskModel {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
}

impl UpdateTaskModel {
    /// Start from every field of `task`, then overlay whatever `change` sets.
    pub fn merged(task: &Task, change: &UpdateDomainTaskModel) -> Self {
        let mut model = Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            start_date: task.start_date.clone(),
            deadline: task.deadline.clone(),
        };
        if let Some(title) = &change.title {
            model.title = title.clone();
        }
        if let Some(description) = &change.description {
            model.description = description.clone();
        }
        if let Some(status) = change.status {
            model.status = status;
        }
        if let Some(priority) = change.priority {
            model.priority = priority;
        }
        if let Some(start_date) = &change.start_date {
            model.start_date = start_date.clone();
        }
        if let Some(deadline) = &change.deadline {
            model.deadline = deadline.clone();
        }
        model
    }
}

/// Partial task change. Only the fields that are `Some` are applied.
///
/// `description`, `start_date` and `deadline` are nullable on the task, so
/// they take two levels: `None` leaves the field alone, `Some(None)` clears
/// it and goes on the wire as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDomainTaskModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub start_date: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub deadline: Option<Option<String>>,
}

impl UpdateDomainTaskModel {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Shallow-merge the set fields into `task`, leaving everything else as is.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(start_date) = &self.start_date {
            task.start_date = start_date.clone();
        }
        if let Some(deadline) = &self.deadline {
            task.deadline = deadline.clone();
        }
    }
}

/// A key that is present, even as `null`, counts as set.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginParams {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha: Option<String>,
}

/// Request payload carrying only a title (todolist create/rename, task create).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePayload {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

/// Result envelope wrapping most mutating responses. `result_code == 0`
/// means the server accepted the request.
///
/// A rejected response carries `{}` whatever the endpoint, so `data` is only
/// present on accepted envelopes decoded by `TodolistClient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope<D> {
    pub result_code: i32,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields_errors: Vec<FieldError>,
    #[serde(default)]
    pub data: Option<D>,
}

impl<D> ResultEnvelope<D> {
    pub fn is_ok(&self) -> bool {
        self.result_code == 0
    }
}

/// Empty `data` object returned by delete/update endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<T> {
    pub item: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeData {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTasksResponse {
    pub items: Vec<Task>,
    pub total_count: i64,
    pub error: Option<String>,
}
