//! Task buckets keyed by todolist id.
//!
//! Buckets are created and dropped only by [`sync_buckets`], which the root
//! reducer runs after every todolist action. Task actions that address a
//! todolist without a bucket fail with `StateError::UnknownTodolist` and
//! leave the state untouched.

use std::collections::HashMap;

use super::todolists::{TodolistAction, TodolistsState};
use crate::error::StateError;
use crate::types::{Task, UpdateDomainTaskModel};

pub type TasksState = HashMap<String, Vec<Task>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    Remove { task_id: String, todolist_id: String },
    Add(Task),
    Update {
        task_id: String,
        model: UpdateDomainTaskModel,
        todolist_id: String,
    },
    SetAll { tasks: Vec<Task>, todolist_id: String },
}

pub fn reduce(state: &TasksState, action: &TaskAction) -> Result<TasksState, StateError> {
    let mut next = state.clone();
    match action {
        TaskAction::Remove { task_id, todolist_id } => {
            let bucket = bucket_mut(&mut next, todolist_id)?;
            if let Some(index) = bucket.iter().position(|t| &t.id == task_id) {
                bucket.remove(index);
            }
        }
        TaskAction::Add(task) => {
            bucket_mut(&mut next, &task.todo_list_id)?.insert(0, task.clone());
        }
        TaskAction::Update {
            task_id,
            model,
            todolist_id,
        } => {
            let bucket = bucket_mut(&mut next, todolist_id)?;
            if let Some(task) = bucket.iter_mut().find(|t| &t.id == task_id) {
                model.apply_to(task);
            }
        }
        TaskAction::SetAll { tasks, todolist_id } => {
            *bucket_mut(&mut next, todolist_id)? = tasks.clone();
        }
    }
    Ok(next)
}

/// Keep the bucket keys in step with the todolist collection. `todolists`
/// is that collection after `action` has been applied to it.
///
/// Adding a todolist opens an empty bucket unless one already exists.
/// Removing one drops its bucket only when no todolist with that id is left.
/// A full refresh keeps the tasks of todolists that survive it, opens an
/// empty bucket for every new id and drops buckets whose todolist is gone.
pub fn sync_buckets(state: &TasksState, todolists: &TodolistsState, action: &TodolistAction) -> TasksState {
    match action {
        TodolistAction::Add(todolist) => {
            let mut next = state.clone();
            next.entry(todolist.id.clone()).or_default();
            next
        }
        TodolistAction::Remove { id } => {
            let mut next = state.clone();
            if !todolists.iter().any(|tl| &tl.id == id) {
                next.remove(id);
            }
            next
        }
        TodolistAction::SetAll(todolists) => todolists
            .iter()
            .map(|tl| {
                let tasks = state.get(&tl.id).cloned().unwrap_or_default();
                (tl.id.clone(), tasks)
            })
            .collect(),
        TodolistAction::ChangeTitle { .. }
        | TodolistAction::ChangeFilter { .. }
        | TodolistAction::ChangeEntityStatus { .. } => state.clone(),
    }
}

fn bucket_mut<'a>(state: &'a mut TasksState, todolist_id: &str) -> Result<&'a mut Vec<Task>, StateError> {
    state
        .get_mut(todolist_id)
        .ok_or_else(|| StateError::UnknownTodolist(todolist_id.to_string()))
}
