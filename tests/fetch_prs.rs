//! Fetcher tests against a mock listing endpoint.

use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use extprs::data::PrState;
use extprs::services::{create_client, fetch_open_prs, FetchError, FetchParams};

const PULLS_PATH: &str = "/repos/owner/repo/pulls";

fn pr_json(number: u64, login: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 100_000 + number,
        "number": number,
        "title": format!("PR {number}"),
        "state": "open",
        "html_url": format!("https://github.com/owner/repo/pull/{number}"),
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-02T00:00:00Z",
        "user": { "login": login, "avatar_url": "https://avatars.example/u/1" },
        "labels": [{ "name": "bug", "color": "d73a4a" }],
        "assignees": [],
        "requested_reviewers": [{ "login": "maintainer", "avatar_url": null }]
    })
}

fn page_json(start: u64, count: u64, login: &str) -> serde_json::Value {
    let prs: Vec<serde_json::Value> = (start..start + count)
        .map(|n| pr_json(n, login))
        .collect();
    serde_json::Value::Array(prs)
}

fn params(per_page: u8, max_pages: u32) -> FetchParams {
    FetchParams {
        owner: "owner".to_string(),
        repo: "repo".to_string(),
        per_page,
        max_pages,
    }
}

#[test]
fn stops_on_empty_page_and_accumulates_everything() {
    let rt = Runtime::new().expect("runtime should start");
    rt.block_on(async {
        let server = MockServer::start().await;

        for (page, body) in [
            ("1", page_json(1, 100, "alice")),
            ("2", page_json(101, 100, "bob")),
            ("3", serde_json::json!([])),
        ] {
            Mock::given(method("GET"))
                .and(path(PULLS_PATH))
                .and(query_param("state", "open"))
                .and(query_param("per_page", "100"))
                .and(query_param("page", page))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = create_client(None).expect("client should build");
        let prs = fetch_open_prs(&client, &server.uri(), &params(100, 5), |_| {})
            .await
            .expect("fetch should succeed");

        assert_eq!(prs.len(), 200);
        // accumulated order follows page order
        let numbers: Vec<u64> = prs.iter().map(|pr| pr.number).collect();
        assert_eq!(numbers, (1..=200).collect::<Vec<u64>>());
        assert_eq!(prs[0].author.login, "alice");
        assert_eq!(prs[0].state, PrState::Open);
        assert_eq!(prs[0].labels[0].name, "bug");
        assert_eq!(prs[0].requested_reviewers[0].login, "maintainer");
        assert!(prs[0].assignees.is_empty());
        assert_eq!(prs[199].author.login, "bob");
    });
}

#[test]
fn stops_at_the_page_cap_when_pages_never_empty() {
    let rt = Runtime::new().expect("runtime should start");
    rt.block_on(async {
        let server = MockServer::start().await;

        // Every page is full; only the cap can end this fetch.
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("state", "open"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1, 2, "alice")))
            .expect(5)
            .mount(&server)
            .await;

        let client = create_client(None).expect("client should build");
        let prs = fetch_open_prs(&client, &server.uri(), &params(2, 5), |_| {})
            .await
            .expect("fetch should succeed");

        assert_eq!(prs.len(), 10);
    });
}

#[test]
fn aborts_on_error_status_and_requests_no_further_pages() {
    let rt = Runtime::new().expect("runtime should start");
    rt.block_on(async {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1, 2, "alice")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let client = create_client(None).expect("client should build");
        let mut delivered_pages = 0;
        let error = fetch_open_prs(&client, &server.uri(), &params(2, 5), |_| {
            delivered_pages += 1;
        })
        .await
        .expect_err("fetch should fail");

        match &error {
            FetchError::Status { status, .. } => assert_eq!(*status, 403),
            other => panic!("expected Status error, got {other:?}"),
        }
        assert!(
            error.to_string().contains("403"),
            "message should carry the status code, got `{error}`"
        );
        // the page fetched before the failure was already surfaced
        assert_eq!(delivered_pages, 1);
    });
}

#[test]
fn surfaces_each_page_before_requesting_the_next() {
    let rt = Runtime::new().expect("runtime should start");
    rt.block_on(async {
        let server = MockServer::start().await;

        for (page, body) in [
            ("1", page_json(1, 2, "alice")),
            ("2", page_json(3, 1, "bob")),
            ("3", serde_json::json!([])),
        ] {
            Mock::given(method("GET"))
                .and(path(PULLS_PATH))
                .and(query_param("page", page))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&server)
                .await;
        }

        let client = create_client(None).expect("client should build");
        let mut sink: Vec<Vec<u64>> = Vec::new();
        fetch_open_prs(&client, &server.uri(), &params(2, 5), |page| {
            sink.push(page.iter().map(|pr| pr.number).collect());
        })
        .await
        .expect("fetch should succeed");

        // page 1 reached the sink as its own delivery, before page 2's
        // records existed anywhere
        assert_eq!(sink, vec![vec![1, 2], vec![3]]);
    });
}

#[test]
fn attaches_bearer_token_when_present() {
    let rt = Runtime::new().expect("runtime should start");
    rt.block_on(async {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(header("authorization", "Bearer t0k3n"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(Some("t0k3n")).expect("client should build");
        let prs = fetch_open_prs(&client, &server.uri(), &params(50, 5), |_| {})
            .await
            .expect("fetch should succeed");

        assert!(prs.is_empty());
    });
}

#[test]
fn clamps_per_page_to_the_api_maximum() {
    let rt = Runtime::new().expect("runtime should start");
    rt.block_on(async {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(None).expect("client should build");
        fetch_open_prs(&client, &server.uri(), &params(250, 5), |_| {})
            .await
            .expect("fetch should succeed");
    });
}

#[test]
fn unparseable_success_body_is_a_malformed_error() {
    let rt = Runtime::new().expect("runtime should start");
    rt.block_on(async {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "message": "unexpected shape" })),
            )
            .mount(&server)
            .await;

        let client = create_client(None).expect("client should build");
        let error = fetch_open_prs(&client, &server.uri(), &params(50, 5), |_| {})
            .await
            .expect_err("fetch should fail");

        assert!(
            matches!(error, FetchError::Malformed(_)),
            "expected Malformed, got {error:?}"
        );
    });
}

#[test]
fn missing_author_falls_back_to_unknown() {
    let rt = Runtime::new().expect("runtime should start");
    rt.block_on(async {
        let server = MockServer::start().await;

        let mut ghost_pr = pr_json(7, "ghost");
        ghost_pr["user"] = serde_json::Value::Null;
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([ghost_pr])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(PULLS_PATH))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let client = create_client(None).expect("client should build");
        let prs = fetch_open_prs(&client, &server.uri(), &params(50, 5), |_| {})
            .await
            .expect("fetch should succeed");

        assert_eq!(prs.len(), 1);
        assert_eq!(prs[0].author.login, "unknown");
    });
}
