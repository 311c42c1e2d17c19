//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use todolist_core::types::Todolist;
use todolist_core::{ApiError, HttpMethod, HttpResponse, Task, TodolistClient};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> TodolistClient {
    TodolistClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

#[test]
fn create_todolist_vectors() {
    let raw = include_str!("../../test-vectors/create_todolist.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let title = case["input_title"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_create_todolist(title).unwrap();
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let envelope = c.parse_create_todolist(simulated(case)).unwrap();
        assert_eq!(envelope.result_code as i64, case["expected_result_code"].as_i64().unwrap(), "{name}: code");
        let expected_messages: Vec<String> =
            serde_json::from_value(case["expected_messages"].clone()).unwrap();
        assert_eq!(envelope.messages, expected_messages, "{name}: messages");

        if envelope.is_ok() {
            let expected: Todolist = serde_json::from_value(case["expected_item"].clone()).unwrap();
            assert_eq!(envelope.data.map(|d| d.item), Some(expected), "{name}: parsed item");
        } else {
            assert!(envelope.data.is_none(), "{name}: rejected envelope has no data");
        }
    }
}

#[test]
fn get_tasks_vectors() {
    let raw = include_str!("../../test-vectors/get_tasks.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let todolist_id = case["input_todolist_id"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_get_tasks(todolist_id);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_get_tasks(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
                "HttpError" => assert!(matches!(err, ApiError::HttpError { .. }), "{name}: expected HttpError"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let response = result.unwrap();
            let expected: Vec<Task> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(response.items, expected, "{name}: parsed items");
            assert_eq!(response.total_count as usize, expected.len(), "{name}: total count");
        }
    }
}
