//! Integration tests for the JSON HTTP helpers
//!
//! Each test starts a one-shot TCP server that records the raw request and
//! answers with a canned response.

use client::services::HttpClient;
use client::ClientError;
use serde_json::{json, Value};
use shared::models::{ApiReply, Produto};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });
    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

#[tokio::test]
async fn test_get_returns_parsed_json() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{"id": 1, "nome": "Leite", "preco": 4.5, "estoque": 10, "codigo_barras": "12345678", "categoria": "Laticínios", "ativo": true}]"#,
    )
    .await;
    let client = HttpClient::new(base).unwrap();

    let produtos: Vec<Produto> = client.get("/api/produtos").await.unwrap();
    assert_eq!(produtos.len(), 1);
    assert_eq!(produtos[0].nome, "Leite");

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /api/produtos HTTP/1.1"));
    assert!(request.to_lowercase().contains("content-type: application/json"));
}

#[tokio::test]
async fn test_non_success_status_is_an_error_with_the_code() {
    let (base, server) = serve_once("404 Not Found", r#"{"error": "not found"}"#).await;
    let client = HttpClient::new(base).unwrap();

    let err = client.get::<Value>("/api/produto/00000000").await.unwrap_err();
    assert!(matches!(err, ClientError::HttpStatus { method: "GET", status: 404 }));
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("404"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let (base, server) = serve_once("200 OK", r#"{"success": true, "venda_id": 42}"#).await;
    let client = HttpClient::new(base).unwrap();

    let payload = json!({"itens": [{"produto_id": 7, "quantidade": 2}]});
    let reply: Value = client.post("/api/venda", &payload).await.unwrap();
    assert_eq!(reply["venda_id"], 42);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/venda HTTP/1.1"));
    assert!(request.to_lowercase().contains("content-type: application/json"));
    let body = request.split("\r\n\r\n").nth(1).unwrap();
    assert_eq!(serde_json::from_str::<Value>(body).unwrap(), payload);
}

#[tokio::test]
async fn test_put_parses_reply_envelope() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"success": true, "produto": {"id": 3, "nome": "Café", "preco": 15.0, "estoque": 4, "codigo_barras": "78900001", "categoria": "Bebidas", "ativo": true}}"#,
    )
    .await;
    let client = HttpClient::new(base).unwrap();

    let reply: ApiReply<Produto> = client.put("/api/produtos/3", &json!({"preco": 15.0})).await.unwrap();
    assert_eq!(reply.into_result().unwrap().preco, 15.0);

    let request = server.await.unwrap();
    assert!(request.starts_with("PUT /api/produtos/3 HTTP/1.1"));
}

#[tokio::test]
async fn test_delete_server_error() {
    let (base, server) = serve_once("500 Internal Server Error", "{}").await;
    let client = HttpClient::new(base).unwrap();

    let err = client.delete::<Value>("/api/produtos/3").await.unwrap_err();
    assert!(matches!(err, ClientError::HttpStatus { method: "DELETE", status: 500 }));

    let request = server.await.unwrap();
    assert!(request.starts_with("DELETE /api/produtos/3 HTTP/1.1"));
}

#[tokio::test]
async fn test_success_with_invalid_json_is_an_error() {
    let (base, server) = serve_once("200 OK", "<html>oops</html>").await;
    let client = HttpClient::new(base).unwrap();

    let err = client.get::<Value>("/").await.unwrap_err();
    assert!(matches!(err, ClientError::JsonError { .. }));
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpClient::new(format!("http://{}", addr)).unwrap();
    let err = client.get::<Value>("/api/produtos").await.unwrap_err();
    assert!(matches!(err, ClientError::TransportError { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_session_cookie_is_sent_back() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let mut requests = Vec::new();
        for set_cookie in ["Set-Cookie: session=abc123; Path=/\r\n", ""] {
            let (mut socket, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut socket).await);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n{}Content-Length: 2\r\nConnection: close\r\n\r\n{{}}",
                set_cookie
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
        requests
    });
    let client = HttpClient::new(format!("http://{}", addr)).unwrap();

    let _: Value = client.post("/login", &json!({"usuario": "caixa"})).await.unwrap();
    let _: Value = client.get("/api/produtos").await.unwrap();

    let requests = server.await.unwrap();
    assert!(!requests[0].to_lowercase().contains("cookie: session=abc123"));
    assert!(requests[1].to_lowercase().contains("cookie: session=abc123"));
}
