mod common;

use mcp_skill::call::CallRequest;
use mcp_skill::dispatch::{self, Mode};
use mcp_skill::SkillError;
use serde_json::{json, Value};

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("utf-8 output")
}

#[tokio::test]
async fn test_list_prints_name_description_pairs_in_order() {
    let session = common::connect_in_process().await;
    let mut out = Vec::new();
    dispatch::run(&session, &Mode::List, &mut out).await.unwrap();
    session.close().await;

    let listed: Value = serde_json::from_str(&output(out)).unwrap();
    assert_eq!(
        listed,
        json!([
            {"name": "add", "description": "Add two integers"},
            {"name": "echo", "description": "Echo the arguments back"},
            {"name": "snapshot", "description": "Return a caption and an image"}
        ])
    );
}

#[tokio::test]
async fn test_describe_prints_full_descriptor() {
    let session = common::connect_in_process().await;
    let mut out = Vec::new();
    dispatch::run(&session, &Mode::Describe("add".into()), &mut out)
        .await
        .unwrap();
    session.close().await;

    let text = output(out);
    assert!(text.starts_with("{\n  \"name\": \"add\""), "{text}");
    let described: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(described["description"], "Add two integers");
    assert_eq!(described["inputSchema"]["required"], json!(["a", "b"]));
}

#[tokio::test]
async fn test_describe_unknown_tool_writes_nothing() {
    let session = common::connect_in_process().await;
    let mut out = Vec::new();
    let err = dispatch::run(&session, &Mode::Describe("subtract".into()), &mut out)
        .await
        .unwrap_err();
    session.close().await;

    assert!(matches!(err, SkillError::ToolNotFound(ref name) if name == "subtract"));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_call_prints_text_result() {
    let session = common::connect_in_process().await;
    let request: CallRequest = r#"{"tool": "add", "arguments": {"a": 1, "b": 2}}"#
        .parse()
        .unwrap();
    let mut out = Vec::new();
    dispatch::run(&session, &Mode::Call(request), &mut out)
        .await
        .unwrap();
    session.close().await;

    assert_eq!(output(out), "3\n");
}

#[tokio::test]
async fn test_call_without_arguments_sends_empty_object() {
    let session = common::connect_in_process().await;
    let request: CallRequest = r#"{"tool": "echo"}"#.parse().unwrap();
    let mut out = Vec::new();
    dispatch::run(&session, &Mode::Call(request), &mut out)
        .await
        .unwrap();
    session.close().await;

    assert_eq!(output(out), "{}\n");
}

#[tokio::test]
async fn test_call_prints_items_in_order_with_structured_as_pretty_json() {
    let session = common::connect_in_process().await;
    let request: CallRequest = r#"{"tool": "snapshot", "arguments": {}}"#.parse().unwrap();
    let mut out = Vec::new();
    dispatch::run(&session, &Mode::Call(request), &mut out)
        .await
        .unwrap();
    session.close().await;

    let text = output(out);
    let (first, rest) = text.split_once('\n').unwrap();
    assert_eq!(first, "caption");
    assert!(rest.starts_with('{'), "{rest}");
    assert!(rest.contains("\n  \"mimeType\": \"image/png\""), "{rest}");
    let image: Value = serde_json::from_str(rest.trim_end()).unwrap();
    assert_eq!(image["type"], "image");
    assert_eq!(image["data"], "aGVsbG8=");
}

#[tokio::test]
async fn test_call_unknown_tool_surfaces_provider_error() {
    let session = common::connect_in_process().await;
    let request: CallRequest = r#"{"tool": "nope"}"#.parse().unwrap();
    let mut out = Vec::new();
    let err = dispatch::run(&session, &Mode::Call(request), &mut out)
        .await
        .unwrap_err();
    session.close().await;

    assert!(matches!(err, SkillError::ToolCall { ref tool, .. } if tool == "nope"));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_dispatch_over_http_from_persisted_config() {
    let url = common::spawn_http_provider().await;
    let dir = tempfile::tempdir().unwrap();
    let config = common::write_http_config(dir.path(), &url);

    let mut out = Vec::new();
    dispatch::dispatch(&config, &Mode::List, &mut out).await.unwrap();
    let listed: Value = serde_json::from_str(&output(out)).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 3);

    let request: CallRequest = r#"{"tool": "add", "arguments": {"a": 20, "b": 22}}"#
        .parse()
        .unwrap();
    let mut out = Vec::new();
    dispatch::dispatch(&config, &Mode::Call(request), &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "42\n");
}

#[tokio::test]
async fn test_dispatch_missing_config_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("mcp-config.json");
    let mut out = Vec::new();
    let err = dispatch::dispatch(&config, &Mode::List, &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, SkillError::ConfigNotFound(ref p) if *p == config));
    assert!(err.to_string().contains(&*config.to_string_lossy()));
    assert!(out.is_empty());
}
