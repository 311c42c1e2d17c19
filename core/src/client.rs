//! Stateless HTTP request builder and response parser for the todolist API.
//!
//! # Design
//! `TodolistClient` holds only a `base_url` and an optional API key. Each
//! endpoint is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`. Result codes inside
//! the envelope are left to the caller; only HTTP-level problems become
//! `ApiError`s here. A rejected envelope keeps its messages and carries no
//! `data`, since the server sends `{}` there whatever the endpoint.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    Empty, GetTasksResponse, Item, LoginData, LoginParams, MeData, ResultEnvelope, Task,
    TitlePayload, Todolist, UpdateTaskModel,
};

pub const API_KEY_HEADER: &str = "API-KEY";

#[derive(Debug, Clone)]
pub struct TodolistClient {
    base_url: String,
    api_key: Option<String>,
}

impl TodolistClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let mut client = Self::new(&config.base_url);
        client.api_key = config.api_key.clone();
        client
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    // --- auth ---

    pub fn build_login(&self, params: &LoginParams) -> Result<HttpRequest, ApiError> {
        self.request_with_body(HttpMethod::Post, "/auth/login", params)
    }

    pub fn build_logout(&self) -> HttpRequest {
        self.request(HttpMethod::Delete, "/auth/login")
    }

    pub fn build_me(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/auth/me")
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<ResultEnvelope<LoginData>, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_logout(&self, response: HttpResponse) -> Result<ResultEnvelope<Empty>, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_me(&self, response: HttpResponse) -> Result<ResultEnvelope<MeData>, ApiError> {
        parse_envelope(response)
    }

    // --- todolists ---

    pub fn build_get_todolists(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todo-lists")
    }

    pub fn build_create_todolist(&self, title: &str) -> Result<HttpRequest, ApiError> {
        self.request_with_body(HttpMethod::Post, "/todo-lists", &title_payload(title))
    }

    pub fn build_delete_todolist(&self, todolist_id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/todo-lists/{todolist_id}"))
    }

    pub fn build_update_todolist(&self, todolist_id: &str, title: &str) -> Result<HttpRequest, ApiError> {
        self.request_with_body(
            HttpMethod::Put,
            &format!("/todo-lists/{todolist_id}"),
            &title_payload(title),
        )
    }

    pub fn parse_get_todolists(&self, response: HttpResponse) -> Result<Vec<Todolist>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_todolist(
        &self,
        response: HttpResponse,
    ) -> Result<ResultEnvelope<Item<Todolist>>, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_delete_todolist(&self, response: HttpResponse) -> Result<ResultEnvelope<Empty>, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_update_todolist(&self, response: HttpResponse) -> Result<ResultEnvelope<Empty>, ApiError> {
        parse_envelope(response)
    }

    // --- tasks ---

    pub fn build_get_tasks(&self, todolist_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/todo-lists/{todolist_id}/tasks"))
    }

    pub fn build_create_task(&self, todolist_id: &str, title: &str) -> Result<HttpRequest, ApiError> {
        self.request_with_body(
            HttpMethod::Post,
            &format!("/todo-lists/{todolist_id}/tasks"),
            &title_payload(title),
        )
    }

    pub fn build_delete_task(&self, todolist_id: &str, task_id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Delete,
            &format!("/todo-lists/{todolist_id}/tasks/{task_id}"),
        )
    }

    pub fn build_update_task(
        &self,
        todolist_id: &str,
        task_id: &str,
        model: &UpdateTaskModel,
    ) -> Result<HttpRequest, ApiError> {
        self.request_with_body(
            HttpMethod::Put,
            &format!("/todo-lists/{todolist_id}/tasks/{task_id}"),
            model,
        )
    }

    pub fn parse_get_tasks(&self, response: HttpResponse) -> Result<GetTasksResponse, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<ResultEnvelope<Item<Task>>, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<ResultEnvelope<Empty>, ApiError> {
        parse_envelope(response)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<ResultEnvelope<Item<Task>>, ApiError> {
        parse_envelope(response)
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(key) = &self.api_key {
            headers.push((API_KEY_HEADER.to_string(), key.clone()));
        }
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers,
            body: None,
        }
    }

    fn request_with_body<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.request(method, path);
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }
}

fn title_payload(title: &str) -> TitlePayload {
    TitlePayload {
        title: title.to_string(),
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Decode a result envelope, reading `data` as `D` only when the server
/// accepted the request.
fn parse_envelope<D: DeserializeOwned>(response: HttpResponse) -> Result<ResultEnvelope<D>, ApiError> {
    let raw: ResultEnvelope<serde_json::Value> = parse_json(response, 200)?;
    let data = match raw.data {
        Some(value) if raw.result_code == 0 => Some(
            serde_json::from_value(value).map_err(|e| ApiError::DeserializationError(e.to_string()))?,
        ),
        _ => None,
    };
    Ok(ResultEnvelope {
        result_code: raw.result_code,
        messages: raw.messages,
        fields_errors: raw.fields_errors,
        data,
    })
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TaskPriority, TaskStatus};

    fn client() -> TodolistClient {
        TodolistClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_todolists_produces_correct_request() {
        let req = client().build_get_todolists();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todo-lists");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn api_key_is_attached_to_every_request() {
        let c = client().with_api_key("k-123");
        assert_eq!(c.build_logout().header(API_KEY_HEADER), Some("k-123"));
        let req = c.build_create_task("L1", "Buy milk").unwrap();
        assert_eq!(req.header(API_KEY_HEADER), Some("k-123"));
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn from_config_keeps_key_and_strips_slash() {
        let config = ClientConfig {
            base_url: "http://localhost:3000/".to_string(),
            api_key: Some("abc".to_string()),
        };
        let req = TodolistClient::from_config(&config).build_me();
        assert_eq!(req.path, "http://localhost:3000/auth/me");
        assert_eq!(req.header(API_KEY_HEADER), Some("abc"));
    }

    #[test]
    fn build_login_serializes_camel_case() {
        let params = LoginParams {
            email: "user@example.com".to_string(),
            password: "secret".to_string(),
            remember_me: true,
            captcha: None,
        };
        let req = client().build_login(&params).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/auth/login");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["rememberMe"], true);
        assert!(body.get("captcha").is_none());
    }

    #[test]
    fn logout_deletes_login_resource() {
        let req = client().build_logout();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/auth/login");
    }

    #[test]
    fn build_update_task_sends_full_model() {
        let model = UpdateTaskModel {
            title: "Write report".to_string(),
            description: None,
            status: TaskStatus::Completed,
            priority: TaskPriority::High,
            start_date: None,
            deadline: Some("2024-02-01T00:00:00".to_string()),
        };
        let req = client().build_update_task("L1", "t1", &model).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/todo-lists/L1/tasks/t1");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["status"], 2);
        assert_eq!(body["priority"], 2);
        assert!(body["description"].is_null());
    }

    #[test]
    fn build_delete_task_path() {
        let req = client().build_delete_task("L1", "t9");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/todo-lists/L1/tasks/t9");
    }

    #[test]
    fn parse_create_todolist_success() {
        let body = r#"{"resultCode":0,"messages":[],"data":{"item":{"id":"L1","title":"Week","addedDate":"2024-01-01T00:00:00","order":-1}}}"#;
        let env = client().parse_create_todolist(response(200, body)).unwrap();
        assert!(env.is_ok());
        assert_eq!(env.data.unwrap().item.title, "Week");
    }

    #[test]
    fn accepted_envelope_with_wrong_data_is_a_decode_error() {
        let body = r#"{"resultCode":0,"messages":[],"data":{}}"#;
        let err = client().parse_create_task(response(200, body)).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn rejected_login_keeps_messages_without_data() {
        let body = r#"{"resultCode":1,"messages":["Incorrect Email or Password"],"data":{}}"#;
        let env = client().parse_login(response(200, body)).unwrap();
        assert!(!env.is_ok());
        assert_eq!(env.messages, vec!["Incorrect Email or Password".to_string()]);
        assert!(env.data.is_none());
    }

    #[test]
    fn rejected_create_keeps_messages_for_item_payloads() {
        let body = r#"{"resultCode":1,"messages":["Title is required"],"fieldsErrors":[{"field":"title","error":"required"}],"data":{}}"#;
        let env = client().parse_create_task(response(200, body)).unwrap();
        assert_eq!(env.result_code, 1);
        assert_eq!(env.messages, vec!["Title is required".to_string()]);
        assert_eq!(env.fields_errors.len(), 1);
        assert!(env.data.is_none());

        let env = client().parse_create_todolist(response(200, body)).unwrap();
        assert_eq!(env.messages, vec!["Title is required".to_string()]);
        assert!(env.data.is_none());
    }

    #[test]
    fn parse_keeps_rejected_envelope() {
        let body = r#"{"resultCode":1,"messages":["Title is required"],"data":{}}"#;
        let env = client().parse_update_todolist(response(200, body)).unwrap();
        assert_eq!(env.result_code, 1);
        assert_eq!(env.messages, vec!["Title is required".to_string()]);
    }

    #[test]
    fn parse_get_tasks_reads_items() {
        let body = r#"{"items":[{"id":"t1","todoListId":"L1","title":"A","description":null,"status":0,"priority":1,"startDate":null,"deadline":null,"order":0,"addedDate":"2024-01-01T00:00:00"}],"totalCount":1,"error":null}"#;
        let tasks = client().parse_get_tasks(response(200, body)).unwrap();
        assert_eq!(tasks.total_count, 1);
        assert_eq!(tasks.items[0].todo_list_id, "L1");
    }

    #[test]
    fn parse_not_found() {
        let err = client().parse_delete_task(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_wrong_status() {
        let err = client().parse_get_todolists(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_get_todolists(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
