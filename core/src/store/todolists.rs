//! Ordered todolist collection with client-only filter and entity status.

use serde::{Deserialize, Serialize};

use super::app::RequestStatus;
use crate::types::Todolist;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterValue {
    #[default]
    All,
    Active,
    Completed,
}

/// A server todolist plus the fields the server never sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodolistDomain {
    pub id: String,
    pub title: String,
    pub added_date: String,
    pub order: i64,
    pub filter: FilterValue,
    pub entity_status: RequestStatus,
}

impl From<Todolist> for TodolistDomain {
    fn from(todolist: Todolist) -> Self {
        Self {
            id: todolist.id,
            title: todolist.title,
            added_date: todolist.added_date,
            order: todolist.order,
            filter: FilterValue::All,
            entity_status: RequestStatus::Idle,
        }
    }
}

pub type TodolistsState = Vec<TodolistDomain>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodolistAction {
    Add(Todolist),
    Remove { id: String },
    ChangeTitle { id: String, title: String },
    ChangeFilter { id: String, filter: FilterValue },
    ChangeEntityStatus { id: String, status: RequestStatus },
    SetAll(Vec<Todolist>),
}

pub fn reduce(state: &TodolistsState, action: &TodolistAction) -> TodolistsState {
    match action {
        // No duplicate-id check.
        TodolistAction::Add(todolist) => {
            let mut next = Vec::with_capacity(state.len() + 1);
            next.push(TodolistDomain::from(todolist.clone()));
            next.extend(state.iter().cloned());
            next
        }
        TodolistAction::Remove { id } => {
            let mut next = state.clone();
            if let Some(index) = next.iter().position(|tl| &tl.id == id) {
                next.remove(index);
            }
            next
        }
        TodolistAction::ChangeTitle { id, title } => {
            update_one(state, id, |tl| tl.title = title.clone())
        }
        TodolistAction::ChangeFilter { id, filter } => update_one(state, id, |tl| tl.filter = *filter),
        TodolistAction::ChangeEntityStatus { id, status } => {
            update_one(state, id, |tl| tl.entity_status = *status)
        }
        TodolistAction::SetAll(todolists) => {
            todolists.iter().cloned().map(TodolistDomain::from).collect()
        }
    }
}

fn update_one(
    state: &TodolistsState,
    id: &str,
    change: impl FnOnce(&mut TodolistDomain),
) -> TodolistsState {
    let mut next = state.clone();
    if let Some(todolist) = next.iter_mut().find(|tl| tl.id == id) {
        change(todolist);
    }
    next
}
