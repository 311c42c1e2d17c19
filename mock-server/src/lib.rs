use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const MAX_TITLE_LEN: usize = 100;
const USER_ID: i64 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todolist {
    pub id: Uuid,
    pub title: String,
    pub added_date: String,
    pub order: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub todo_list_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: u8,
    pub priority: u8,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
    pub order: i64,
    pub added_date: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginParams {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
    #[serde(default)]
    pub captcha: Option<String>,
}

#[derive(Deserialize)]
pub struct TitlePayload {
    pub title: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskModel {
    pub title: String,
    pub description: Option<String>,
    pub status: u8,
    pub priority: u8,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: "demo@example.com".to_string(),
            password: "demo".to_string(),
        }
    }
}

impl Credentials {
    /// Reads `MOCK_EMAIL` / `MOCK_PASSWORD`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            email: std::env::var("MOCK_EMAIL").unwrap_or(defaults.email),
            password: std::env::var("MOCK_PASSWORD").unwrap_or(defaults.password),
        }
    }
}

#[derive(Debug)]
pub struct Backend {
    credentials: Credentials,
    logged_in: bool,
    todolists: Vec<Todolist>,
    tasks: HashMap<Uuid, Vec<Task>>,
}

pub type Db = Arc<RwLock<Backend>>;

pub fn app() -> Router {
    app_with(Credentials::default())
}

pub fn app_with(credentials: Credentials) -> Router {
    let db: Db = Arc::new(RwLock::new(Backend {
        credentials,
        logged_in: false,
        todolists: Vec::new(),
        tasks: HashMap::new(),
    }));
    Router::new()
        .route("/auth/login", post(login).delete(logout))
        .route("/auth/me", get(me))
        .route("/todo-lists", get(list_todolists).post(create_todolist))
        .route("/todo-lists/{id}", put(update_todolist).delete(delete_todolist))
        .route("/todo-lists/{id}/tasks", get(list_tasks).post(create_task))
        .route(
            "/todo-lists/{id}/tasks/{task_id}",
            put(update_task).delete(delete_task),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Credentials::default()).await
}

pub async fn run_with(listener: TcpListener, credentials: Credentials) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(credentials)).await
}

fn ok(data: Value) -> Json<Value> {
    Json(json!({"resultCode": 0, "messages": [], "data": data}))
}

fn rejected(message: &str) -> Json<Value> {
    Json(json!({"resultCode": 1, "messages": [message], "data": {}}))
}

/// Trimmed-nonempty and at most `MAX_TITLE_LEN` characters.
fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required".to_string());
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(format!(
            "Title length should be less than {MAX_TITLE_LEN} symbols"
        ));
    }
    Ok(())
}

fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

async fn login(State(db): State<Db>, Json(input): Json<LoginParams>) -> Json<Value> {
    let mut backend = db.write().await;
    if input.email != backend.credentials.email || input.password != backend.credentials.password {
        tracing::debug!(email = %input.email, "rejected login");
        return rejected("Incorrect Email or Password");
    }
    backend.logged_in = true;
    tracing::debug!(remember_me = input.remember_me, captcha = input.captcha.is_some(), "logged in");
    ok(json!({"userId": USER_ID}))
}

async fn logout(State(db): State<Db>) -> Json<Value> {
    db.write().await.logged_in = false;
    ok(json!({}))
}

async fn me(State(db): State<Db>) -> Json<Value> {
    let backend = db.read().await;
    if !backend.logged_in {
        return rejected("You are not authorized");
    }
    let email = backend.credentials.email.clone();
    let login = email.split('@').next().unwrap_or_default().to_string();
    ok(json!({"id": USER_ID, "email": email, "login": login}))
}

async fn list_todolists(State(db): State<Db>) -> Json<Vec<Todolist>> {
    Json(db.read().await.todolists.clone())
}

async fn create_todolist(State(db): State<Db>, Json(input): Json<TitlePayload>) -> Json<Value> {
    if let Err(message) = validate_title(&input.title) {
        return rejected(&message);
    }
    let mut backend = db.write().await;
    let order = backend.todolists.iter().map(|tl| tl.order).min().unwrap_or(0) - 1;
    let todolist = Todolist {
        id: Uuid::new_v4(),
        title: input.title,
        added_date: now(),
        order,
    };
    backend.tasks.insert(todolist.id, Vec::new());
    backend.todolists.insert(0, todolist.clone());
    ok(json!({ "item": todolist }))
}

async fn update_todolist(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<TitlePayload>,
) -> Result<Json<Value>, StatusCode> {
    let mut backend = db.write().await;
    let todolist = backend
        .todolists
        .iter_mut()
        .find(|tl| tl.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Err(message) = validate_title(&input.title) {
        return Ok(rejected(&message));
    }
    todolist.title = input.title;
    Ok(ok(json!({})))
}

async fn delete_todolist(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Value>, StatusCode> {
    let mut backend = db.write().await;
    let index = backend
        .todolists
        .iter()
        .position(|tl| tl.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    backend.todolists.remove(index);
    backend.tasks.remove(&id);
    Ok(ok(json!({})))
}

async fn list_tasks(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Value>, StatusCode> {
    let backend = db.read().await;
    let tasks = backend.tasks.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({"items": tasks, "totalCount": tasks.len(), "error": null})))
}

async fn create_task(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<TitlePayload>,
) -> Result<Json<Value>, StatusCode> {
    let mut backend = db.write().await;
    let tasks = backend.tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Err(message) = validate_title(&input.title) {
        return Ok(rejected(&message));
    }
    let order = tasks.iter().map(|t| t.order).min().unwrap_or(0) - 1;
    let task = Task {
        id: Uuid::new_v4(),
        todo_list_id: id,
        title: input.title,
        description: None,
        status: 0,
        priority: 1,
        start_date: None,
        deadline: None,
        order,
        added_date: now(),
    };
    tasks.insert(0, task.clone());
    Ok(ok(json!({ "item": task })))
}

async fn update_task(
    State(db): State<Db>,
    Path((id, task_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateTaskModel>,
) -> Result<Json<Value>, StatusCode> {
    let mut backend = db.write().await;
    let task = backend
        .tasks
        .get_mut(&id)
        .and_then(|tasks| tasks.iter_mut().find(|t| t.id == task_id))
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Err(message) = validate_title(&input.title) {
        return Ok(rejected(&message));
    }
    if input.status > 3 || input.priority > 4 {
        return Ok(rejected("Invalid status or priority"));
    }
    task.title = input.title;
    task.description = input.description;
    task.status = input.status;
    task.priority = input.priority;
    task.start_date = input.start_date;
    task.deadline = input.deadline;
    Ok(ok(json!({ "item": task.clone() })))
}

async fn delete_task(
    State(db): State<Db>,
    Path((id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, StatusCode> {
    let mut backend = db.write().await;
    let tasks = backend.tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    let index = tasks
        .iter()
        .position(|t| t.id == task_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    tasks.remove(index);
    Ok(ok(json!({})))
}
