//! Shared harness: a wiremock server driven from blocking tests
//!
//! The mock server runs on its own thread; the tokio runtime here only
//! drives mounting and inspection, so the blocking client is always
//! called from outside any async context.

#![allow(dead_code)]

use askomics_core::domain::ServerEndpoint;
use askomics_core::Session;
use askomics_infra_http::ReqwestTransport;
use serde_json::json;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";
pub const SESSION_COOKIE: &str = "session=abc123";

pub struct TestServer {
    // Dropped before the runtime
    server: MockServer,
    runtime: Runtime,
}

impl TestServer {
    pub fn start() -> Self {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn received(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    pub fn received_on(&self, endpoint: &str) -> Vec<Request> {
        self.received()
            .into_iter()
            .filter(|request| request.url.path() == endpoint)
            .collect()
    }

    pub fn session(&self, forced_type: &str) -> Session<ReqwestTransport> {
        let endpoint = ServerEndpoint::new(&self.uri(), None).unwrap();
        let transport = ReqwestTransport::new(endpoint).unwrap();
        Session::new(transport, API_KEY, forced_type)
    }

    /// Login that accepts `API_KEY` and sets `SESSION_COOKIE`
    pub fn mount_login(&self) {
        self.mount(
            Mock::given(method("POST"))
                .and(path("/login_api"))
                .and(body_json(json!({"apikey": API_KEY})))
                .respond_with(
                    ResponseTemplate::new(200)
                        .insert_header("set-cookie", format!("{SESSION_COOKIE}; Path=/; HttpOnly"))
                        .set_body_json(json!({"error": false, "user": {"username": "jdoe"}})),
                )
                .expect(1),
        );
    }

    /// Upload endpoint that only answers requests carrying the session cookie
    pub fn mount_upload(&self) {
        self.mount(
            Mock::given(method("POST"))
                .and(path("/up/file"))
                .and(header("cookie", SESSION_COOKIE))
                .and(header("x-requested-with", "XMLHttpRequest"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "files": [{"name": "uploaded", "path": "/tmp/askomics/upload_1"}]
                })))
                .expect(1),
        );
    }
}

/// Write a file into a fresh temp dir; keep the dir alive while testing
pub fn fixture(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
