// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! MCP server sessions over an in-memory transport against a mock Telegraph API

use serde_json::{json, Value};
use std::io::{self, Cursor, Write};
use std::sync::{Arc, Mutex};
use telegraph_mcp::config::Settings;
use telegraph_mcp::mcp::{McpServer, StdioTransport};
use telegraph_mcp::telegraph::TelegraphClient;
use telegraph_mcp::tools::{ToolContext, ToolRegistry};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn settings(token: Option<&str>) -> Settings {
    let mut settings = Settings::default();
    settings.telegraph.access_token = token.map(str::to_string);
    settings.telegraph.access_token_env = "TELEGRAPH_MCP_IT_TOKEN_UNSET".to_string();
    settings
}

/// Feed `lines` to a fresh server and collect every response line
async fn session(base_url: &str, settings: Settings, lines: &[Value]) -> Vec<Value> {
    let input: String = lines.iter().map(|line| format!("{}\n", line)).collect();
    run_raw(base_url, settings, &input).await
}

async fn run_raw(base_url: &str, settings: Settings, input: &str) -> Vec<Value> {
    let out = SharedBuf::default();
    let transport = StdioTransport::from_io(
        Box::new(Cursor::new(input.as_bytes().to_vec())),
        Box::new(out.clone()),
    );
    let client = TelegraphClient::with_base_url(base_url).unwrap();
    let context = ToolContext::new(Arc::new(client), Arc::new(settings));
    let server = McpServer::with_transport(ToolRegistry::with_builtins(), context, transport);

    server.run().await.unwrap();

    let written = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
    written
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn call(id: i64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
}

fn text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn test_handshake_and_listing() {
    let responses = session(
        "http://127.0.0.1:9",
        settings(None),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "it", "version": "1"}
            }}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "prompts/list"}),
        ],
    )
    .await;

    // The notification produces no line
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "telegraph-mcp");

    let names: Vec<&str> = responses[1]["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    for expected in [
        "create_account",
        "create_page",
        "edit_page",
        "get_views",
        "upload_image",
        "export_page",
        "backup_account",
        "create_from_template",
    ] {
        assert!(names.contains(&expected), "missing {}", expected);
    }
    assert_eq!(responses[2]["id"], 3);
}

#[tokio::test]
async fn test_parse_error_keeps_the_loop_alive() {
    let responses = run_raw(
        "http://127.0.0.1:9",
        settings(None),
        "this is not json\n{\"jsonrpc\":\"2.0\",\"id\":5,\"method\":\"ping\"}\n",
    )
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[1]["id"], 5);
    assert_eq!(responses[1]["result"], json!({}));
}

#[tokio::test]
async fn test_invalid_request_echoes_id() {
    let responses = run_raw("http://127.0.0.1:9", settings(None), "{\"id\":9,\"params\":1}\n").await;
    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[0]["id"], 9);
}

#[tokio::test]
async fn test_create_page_from_markdown_uses_configured_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/createPage"))
        .and(body_partial_json(json!({
            "access_token": "configured-token",
            "title": "Hello",
            "content": [
                {"tag": "h3", "children": ["Hi"]},
                {"tag": "p", "children": [{"tag": "b", "children": ["bold"]}]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {
                "path": "Hello-10-14",
                "url": "https://telegra.ph/Hello-10-14",
                "title": "Hello",
                "description": "",
                "views": 0
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let responses = session(
        &server.uri(),
        settings(Some("configured-token")),
        &[call(
            1,
            "create_page",
            json!({"title": "Hello", "content": "# Hi\n\n**bold**", "format": "markdown"}),
        )],
    )
    .await;

    let result = &responses[0]["result"];
    assert!(result.get("isError").is_none());
    let page: Value = serde_json::from_str(text(&responses[0])).unwrap();
    assert_eq!(page["url"], "https://telegra.ph/Hello-10-14");
}

#[tokio::test]
async fn test_telegraph_rejection_is_tool_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getAccountInfo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": false, "error": "ACCESS_TOKEN_INVALID"})),
        )
        .mount(&server)
        .await;

    let responses = session(
        &server.uri(),
        settings(None),
        &[call(1, "get_account_info", json!({"access_token": "nope"}))],
    )
    .await;

    assert_eq!(responses[0]["result"]["isError"], true);
    assert!(text(&responses[0]).contains("ACCESS_TOKEN_INVALID"));
}

#[tokio::test]
async fn test_missing_token_is_invalid_params() {
    let responses = session(
        "http://127.0.0.1:9",
        settings(None),
        &[call(1, "create_page", json!({"title": "x", "content": "y"}))],
    )
    .await;

    assert_eq!(responses[0]["error"]["code"], -32602);
}

#[tokio::test]
async fn test_export_page_as_markdown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getPage/Notes-01-01"))
        .and(body_partial_json(json!({"return_content": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {
                "path": "Notes-01-01",
                "url": "https://telegra.ph/Notes-01-01",
                "title": "Notes",
                "views": 7,
                "content": [
                    {"tag": "h3", "children": ["Notes"]},
                    {"tag": "p", "children": ["Some ", {"tag": "i", "children": ["text"]}]}
                ]
            }
        })))
        .mount(&server)
        .await;

    let responses = session(
        &server.uri(),
        settings(None),
        &[
            call(1, "export_page", json!({"path": "Notes-01-01"})),
            json!({"jsonrpc": "2.0", "id": 2, "method": "resources/read",
                   "params": {"uri": "telegraph://page/Notes-01-01"}}),
        ],
    )
    .await;

    let exported = text(&responses[0]);
    assert!(exported.contains("# Notes"));
    assert!(exported.contains("*text*"));

    let contents = &responses[1]["result"]["contents"][0];
    assert_eq!(contents["mimeType"], "text/markdown");
    assert_eq!(contents["text"].as_str().unwrap(), exported);
}

#[tokio::test]
async fn test_export_page_to_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getPage/Notes-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {
                "path": "Notes-01-01",
                "url": "https://telegra.ph/Notes-01-01",
                "title": "Notes",
                "content": [{"tag": "p", "children": ["body"]}]
            }
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out").join("notes.html");
    session(
        &server.uri(),
        settings(None),
        &[call(
            1,
            "export_page",
            json!({"path": "Notes-01-01", "format": "html", "output_path": output}),
        )],
    )
    .await;

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "<p>body</p>");
}

#[tokio::test]
async fn test_create_from_template() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/createPage"))
        .and(body_partial_json(json!({"title": "Release 1.0"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {
                "path": "Release-10-14",
                "url": "https://telegra.ph/Release-10-14",
                "title": "Release 1.0"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let responses = session(
        &server.uri(),
        settings(Some("tok")),
        &[
            call(
                1,
                "create_from_template",
                json!({"template": "no_such_template", "title": "x"}),
            ),
            call(
                2,
                "create_from_template",
                json!({
                    "template": "announcement",
                    "title": "Release 1.0",
                    "fields": {
                        "headline": "We shipped",
                        "details": "Everything works.",
                        "link_text": "Download",
                        "link_url": "https://example.com/download"
                    }
                }),
            ),
        ],
    )
    .await;

    assert_eq!(responses[0]["result"]["isError"], true);
    assert!(responses[1]["result"].get("isError").is_none());
}
