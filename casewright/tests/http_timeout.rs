#![cfg(feature = "provider-ollama")]

use std::time::{Duration, Instant};

use casewright::{
    AppConfig, ModelRequest, PipelineErrorKind, PipelineStep, ProviderBuildConfig,
    ProviderErrorKind, ProviderId, SessionState, build_provider_with_config, build_runtime,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

const CALL_TIMEOUT: Duration = Duration::from_millis(300);

const HELLO_BODY: &str = r#"{"model":"llama3.2","choices":[{"message":{"role":"assistant","content":"Hello!"},"finish_reason":"stop"}]}"#;

/// Local server that answers the first `answered` requests with a greeting
/// and then accepts connections without ever replying.
async fn stalling_server(answered: usize) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        let mut served = 0;
        while let Ok((mut stream, _)) = listener.accept().await {
            if served < answered {
                served += 1;
                answer_hello(&mut stream).await;
            } else {
                held.push(stream);
            }
        }
    });

    (format!("http://{address}/v1"), handle)
}

async fn answer_hello(stream: &mut TcpStream) {
    let mut request = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let read = stream.read(&mut chunk).await.expect("read request");
        if read == 0 {
            return;
        }
        request.extend_from_slice(&chunk[..read]);
        if request_complete(&request) {
            break;
        }
    }

    let response = format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{HELLO_BODY}",
        HELLO_BODY.len()
    );
    stream
        .write_all(response.as_bytes())
        .await
        .expect("write response");
    stream.shutdown().await.expect("shutdown");
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= header_end + 4 + content_length
}

#[tokio::test]
async fn unresponsive_server_fails_the_call_with_timeout() {
    let (base_url, server) = stalling_server(0).await;
    let provider = build_provider_with_config(
        ProviderBuildConfig::new(ProviderId::Ollama)
            .with_timeout(CALL_TIMEOUT)
            .with_base_url(base_url),
    )
    .expect("provider should build");

    let started = Instant::now();
    let error = provider
        .complete(ModelRequest::prompt("llama3.2", "hi"))
        .await
        .expect_err("hung server should time out");

    assert_eq!(error.kind, ProviderErrorKind::Timeout);
    assert!(started.elapsed() >= CALL_TIMEOUT);
    assert!(started.elapsed() < Duration::from_secs(10));
    server.abort();
}

#[tokio::test]
async fn step_that_exceeds_the_timeout_fails_the_run_with_timeout() {
    let (base_url, server) = stalling_server(1).await;
    let mut config = AppConfig::new(ProviderId::Ollama).with_timeout(CALL_TIMEOUT);
    config.base_url = Some(base_url);
    let runtime = build_runtime(&config, false).expect("runtime should build");

    let mut state = SessionState::generate("As a user I can log in", "Lock after 5 failures");
    let error = runtime
        .pipeline
        .run(&mut state)
        .await
        .expect_err("second call should time out");

    assert_eq!(error.kind, PipelineErrorKind::Timeout);
    assert_eq!(error.step, Some(PipelineStep::GenerateUserTests));
    assert!(runtime.client.is_validated());
    assert_eq!(
        state,
        SessionState::generate("As a user I can log in", "Lock after 5 failures")
    );
    assert!(!runtime.handle_failure(&error));
    server.abort();
}
