//! End-to-end dashboard flow tests.
//!
//! Drives the running service the way the browser pages do.

mod integration;
use integration::common::test_server::{is_ready_panel, next_json, read_until, TestServer};

use futures_util::SinkExt;
use reqwest::StatusCode;
use tokio_tungstenite::tungstenite::Message;

#[tokio::test]
async fn test_search_navigates_to_dashboard() {
    let server = TestServer::start().await;
    let client = server.client();

    let response = client
        .get(server.url("/search?addr=sei1demoaddress"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()["location"].to_str().unwrap().to_string();
    assert_eq!(location, "/dashboard?addr=sei1demoaddress");

    let response = client.get(server.url(&location)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("SeiScout"));

    let snapshot: serde_json::Value = client
        .get(server.url("/api/panels/overview?addr=sei1demoaddress"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot["address"], "sei1demoaddress");
    assert_eq!(snapshot["data"]["panel"], "overview");

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_search_stays_on_entry() {
    let server = TestServer::start().await;
    let response = server
        .client()
        .get(server.url("/search?addr=+++"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.headers().get("location").is_none());
    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_dashboard_without_address_redirects_to_entry() {
    let server = TestServer::start().await;
    let response = server
        .client()
        .get(server.url("/dashboard"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");
    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_status_connects_after_handshake() {
    let server = TestServer::start().await;
    let client = server.client();

    let mut connected = false;
    for _ in 0..50 {
        let status: serde_json::Value = client
            .get(server.url("/api/status"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        if status["connected"] == true {
            connected = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(connected, "feed should connect shortly after start");
    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_ws_streams_status_feed_and_panel() {
    let server = TestServer::start().await;
    let mut ws = server.ws("sei1demoaddress", "pulse").await;

    let first = next_json(&mut ws).await;
    assert_eq!(first["type"], "status");

    let (ready, _) = read_until(&mut ws, |m| is_ready_panel(m, "pulse")).await;
    assert_eq!(ready["state"]["address"], "sei1demoaddress");
    assert_eq!(ready["state"]["data"]["panel"], "pulse");

    let (feed, _) = read_until(&mut ws, |m| m["type"] == "feed").await;
    assert!(feed["message"]["payload"]["type"].is_string());

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_ws_select_tab_switches_panel() {
    let server = TestServer::start().await;
    let mut ws = server.ws("sei1demoaddress", "overview").await;
    read_until(&mut ws, |m| is_ready_panel(m, "overview")).await;

    ws.send(Message::Text(
        r#"{"type":"select_tab","tab":"network"}"#.to_string(),
    ))
    .await
    .unwrap();

    let (tab, _) = read_until(&mut ws, |m| m["type"] == "tab").await;
    assert_eq!(tab["active"], "network");
    assert_eq!(tab["previous"], "overview");

    let (ready, before) = read_until(&mut ws, |m| is_ready_panel(m, "network")).await;
    assert_eq!(ready["state"]["data"]["panel"], "network");
    assert!(before
        .iter()
        .filter(|m| m["type"] == "panel")
        .all(|m| m["tab"] == "network"));

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_ws_rejects_unknown_command() {
    let server = TestServer::start().await;
    let mut ws = server.ws("sei1demoaddress", "alerts").await;

    ws.send(Message::Text(r#"{"type":"dance"}"#.to_string()))
        .await
        .unwrap();
    let (error, _) = read_until(&mut ws, |m| m["type"] == "error").await;
    assert!(error["message"]
        .as_str()
        .unwrap()
        .starts_with("invalid command"));

    ws.send(Message::Text(
        r#"{"type":"send","message":{"type":"ping"}}"#.to_string(),
    ))
    .await
    .unwrap();

    // A feed frame may already be in flight, so wait for two.
    let mut seen = Vec::new();
    for _ in 0..2 {
        let (feed, before) = read_until(&mut ws, |m| m["type"] == "feed").await;
        seen.extend(before);
        seen.push(feed);
    }
    assert!(seen.iter().all(|m| m["type"] != "error"));

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_new_address_never_sees_previous_data() {
    let server = TestServer::start().await;

    let mut first = server.ws("sei1firstaddress", "overview").await;
    let (ready, _) = read_until(&mut first, |m| is_ready_panel(m, "overview")).await;
    assert_eq!(ready["state"]["address"], "sei1firstaddress");
    first.close(None).await.unwrap();

    let mut second = server.ws("sei1secondaddress", "overview").await;
    let (ready, before) = read_until(&mut second, |m| is_ready_panel(m, "overview")).await;
    assert_eq!(ready["state"]["address"], "sei1secondaddress");
    for msg in before.iter().filter(|m| m["type"] == "panel") {
        assert_ne!(msg["state"]["address"], "sei1firstaddress");
    }

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_wallet_routes_in_demo_mode() {
    let server = TestServer::start().await;
    let client = server.client();

    let connect: serde_json::Value = client
        .post(server.url("/api/wallet/connect"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(connect["ok"], true);
    assert_eq!(connect["session"]["demo"], true);

    let trade = client
        .post(server.url("/api/wallet/copy-trade"))
        .json(&serde_json::json!({
            "action": "Stake 5000 SEI",
            "to_address": "sei1validator",
            "amount": "5000",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(trade.status(), StatusCode::OK);
    let trade: serde_json::Value = trade.json().await.unwrap();
    assert_eq!(trade["trade"]["signer"], connect["session"]["address"]);

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_wallet_without_extension_fails_explicitly() {
    let mut config = integration::common::test_server::fast_config();
    config.wallet.demo = false;
    let server = TestServer::start_with(config).await;

    let response = server
        .client()
        .post(server.url("/api/wallet/connect"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FAILED_DEPENDENCY);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["ok"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("wallet connection failed: "));

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_metrics_exposed() {
    let server = TestServer::start().await;
    let client = server.client();
    client
        .get(server.url("/api/panels/pulse?addr=sei1demoaddress"))
        .send()
        .await
        .unwrap();

    let body = client
        .get(server.url("/metrics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("seiscout_"));

    server.shutdown().await.unwrap();
}
