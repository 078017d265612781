//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or errors. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use cats_core::{ApiError, ApiResult, Cat, CatsClient, ClientConfig, HttpMethod, HttpRequest, HttpResponse, NewCat, SearchQuery};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> CatsClient {
    CatsClient::new(ClientConfig::new(BASE_URL))
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
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

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|pair| {
                    let arr = pair.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
    assert_eq!(req.query, pairs(&expected["query"]), "{name}: query");
    if !expected["headers"].is_null() {
        assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");
    }
    match expected.get("body") {
        Some(body) => {
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(sim["status"].as_u64().unwrap() as u16, sim["body"].as_str().unwrap())
}

/// Check a parse result against `expected_result` or `expected_error`.
fn assert_outcome<T>(name: &str, case: &Value, result: ApiResult<T>)
where
    T: serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    if let Some(expected_error) = case.get("expected_error") {
        let err = result.unwrap_err();
        let expected = ApiError::remote(
            expected_error["status"].as_u64().unwrap() as u16,
            expected_error["message"].as_str().unwrap(),
        );
        assert_eq!(err, expected, "{name}: error");
    } else {
        let actual = result.unwrap();
        let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(actual, expected, "{name}: parsed result");
    }
}

#[test]
fn get_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c.build_get(case["input_id"].as_str().unwrap());
        assert_request(name, &req, &case["expected_request"]);
        assert_outcome::<Cat>(name, &case, c.parse_get(simulated(&case)));
    }
}

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        assert_request(name, &c.build_all(), &case["expected_request"]);
        assert_outcome::<Vec<Cat>>(name, &case, c.parse_all(simulated(&case)));
    }
}

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: NewCat = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_create(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert_outcome::<Cat>(name, &case, c.parse_create(simulated(&case)));
    }
}

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let input: Cat = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_update(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert_outcome::<Cat>(name, &case, c.parse_update(simulated(&case)));
    }
}

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let req = c.build_delete(case["input_id"].as_str().unwrap());
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete(simulated(&case));
        if case.get("expected_error").is_some() {
            assert_outcome::<bool>(name, &case, result);
        } else {
            assert!(result.unwrap(), "{name}: expected confirmation");
        }
    }
}

#[test]
fn search_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/search.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let query = SearchQuery::new(input["name"].as_str().unwrap(), input["group"].as_str().unwrap());
        let req = c.build_search(&query);
        assert_request(name, &req, &case["expected_request"]);
        assert_outcome::<Cat>(name, &case, c.parse_search(simulated(&case)));
    }
}

#[test]
fn id_encoding_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/ids.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let expected = format!("{BASE_URL}{}", case["expected_path"].as_str().unwrap());

        assert_eq!(c.build_get(id).path, expected, "{name}: get");
        assert_eq!(c.build_delete(id).path, expected, "{name}: delete");
        let req = c.build_update(&Cat::new("Tom").with_id(id)).unwrap();
        assert_eq!(req.path, expected, "{name}: update");
    }
}
