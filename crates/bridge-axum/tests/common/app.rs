//! Router fixtures backed by a temp publish directory and a scripted
//! interpreter.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use bridge_axum::{ServerConfig, bootstrap, create_router};
use bridge_core::{FrameInterpreter, FrameRequest, TokenStream};
use futures_util::StreamExt;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

/// Interpreter that replays fixed tokens and records what it was asked.
#[derive(Default)]
pub struct ScriptedInterpreter {
    tokens: Vec<String>,
    pub requests: Mutex<Vec<FrameRequest>>,
}

impl ScriptedInterpreter {
    pub fn new(tokens: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| (*t).to_string()).collect(),
            requests: Mutex::default(),
        }
    }
}

impl FrameInterpreter for ScriptedInterpreter {
    fn interpret(&self, request: FrameRequest) -> TokenStream {
        self.requests.lock().unwrap().push(request);
        futures_util::stream::iter(self.tokens.clone()).boxed()
    }
}

pub struct TestApp {
    pub dir: TempDir,
    pub router: Router,
    pub interpreter: Arc<ScriptedInterpreter>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with(|config| config, ScriptedInterpreter::default()).await
    }

    pub async fn with(
        configure: impl FnOnce(ServerConfig) -> ServerConfig,
        interpreter: ScriptedInterpreter,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = configure(ServerConfig::new(dir.path()));
        let interpreter = Arc::new(interpreter);
        let ctx = bootstrap(&config, interpreter.clone()).await.unwrap();
        let router = create_router(ctx, &config);
        Self {
            dir,
            router,
            interpreter,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Minimal payloads that pass the sniffer.
pub const WEBM: &[u8] = b"\x1a\x45\xdf\xa3\x9f\x42\x86\x81\x01\x42\xf7\x81segment";
pub const MP4: &[u8] = b"\x00\x00\x00\x18ftypisom\x00\x00\x02\x00segment";
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";
pub const JPEG: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF\x00\x01";
