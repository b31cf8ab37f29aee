//! Integration tests for the publish and latest-pointer routes.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use common::app::{JPEG, MP4, PNG, ScriptedInterpreter, TestApp, WEBM, body_bytes, body_json};
use common::multipart::Form;

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({"ok": true}));
}

#[tokio::test]
async fn index_and_favicon_are_served() {
    let app = TestApp::new().await;

    let index = app.get("/").await;
    assert_eq!(index.status(), StatusCode::OK);
    let html = String::from_utf8(body_bytes(index).await).unwrap();
    assert!(html.contains("/api/stream/latest"));

    let favicon = app.get("/favicon.ico").await;
    assert_eq!(favicon.status(), StatusCode::OK);
    assert!(body_bytes(favicon).await.is_empty());
}

#[tokio::test]
async fn latest_is_404_before_first_publish() {
    let app = TestApp::new().await;

    let response = app.get("/api/stream/latest").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "no file yet");

    let response = app.get("/api/stream/frame/latest").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn webm_segment_is_published_and_served() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Form::new()
                .file("video", "seg.webm", "video/webm;codecs=vp8", WEBM)
                .post("/api/stream/segment"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["url"], "/static/current.webm");
    assert_eq!(body["bytes"], WEBM.len());
    assert_eq!(body["detected"], "webm");
    assert_eq!(body["contentType"], "video/webm;codecs=vp8");

    let latest = body_json(app.get("/api/stream/latest").await).await;
    assert_eq!(
        latest,
        serde_json::json!({"url": "/static/current.webm", "contentType": "video/webm"})
    );

    let file = app.get("/static/current.webm").await;
    assert_eq!(file.status(), StatusCode::OK);
    assert_eq!(body_bytes(file).await, WEBM);
}

#[tokio::test]
async fn sniffed_kind_overrides_declared_type() {
    let app = TestApp::new().await;

    // Declared webm, bytes are mp4.
    let body = body_json(
        app.send(
            Form::new()
                .file("blob", "blob", "video/webm", MP4)
                .post("/api/stream/segment"),
        )
        .await,
    )
    .await;
    assert_eq!(body["url"], "/static/current.mp4");
    assert_eq!(body["detected"], "mp4");
}

#[tokio::test]
async fn switching_kind_retires_previous_segment() {
    let app = TestApp::new().await;

    app.send(
        Form::new()
            .file("video", "a.webm", "video/webm", WEBM)
            .post("/api/stream/segment"),
    )
    .await;
    app.send(
        Form::new()
            .file("video", "b.mp4", "video/mp4", MP4)
            .post("/api/stream/segment"),
    )
    .await;

    assert!(!app.dir.path().join("current.webm").exists());
    assert!(app.dir.path().join("current.mp4").exists());

    let latest = body_json(app.get("/api/stream/latest").await).await;
    assert_eq!(latest["url"], "/static/current.mp4");
    assert_eq!(latest["contentType"], "video/mp4");
}

#[tokio::test]
async fn empty_segment_is_skipped() {
    let app = TestApp::new().await;
    app.send(
        Form::new()
            .file("video", "a.webm", "video/webm", WEBM)
            .post("/api/stream/segment"),
    )
    .await;

    let response = app
        .send(
            Form::new()
                .file("video", "empty.webm", "video/webm", b"")
                .post("/api/stream/segment"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"ok": false, "skipped": true, "reason": "empty"})
    );
    assert_eq!(
        std::fs::read(app.dir.path().join("current.webm")).unwrap(),
        WEBM
    );
}

#[tokio::test]
async fn frame_publish_and_latest() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Form::new()
                .file("frame", "frame.png", "image/png", PNG)
                .post("/api/stream/frame"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["url"], "/static/latest.png");
    assert_eq!(body["bytes"], PNG.len());
    assert_eq!(body["contentType"], "image/png");

    let latest = body_json(app.get("/api/stream/frame/latest").await).await;
    assert_eq!(latest["url"], "/static/latest.png");

    // Segment slot is untouched by frames.
    let segment = app.get("/api/stream/latest").await;
    assert_eq!(segment.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn jpeg_frame_replaces_png() {
    let app = TestApp::new().await;
    app.send(
        Form::new()
            .file("frame", "f.png", "image/png", PNG)
            .post("/api/stream/frame"),
    )
    .await;

    let body = body_json(
        app.send(
            Form::new()
                .file("frame", "f.jpg", "image/jpeg", JPEG)
                .post("/api/stream/frame"),
        )
        .await,
    )
    .await;
    assert_eq!(body["url"], "/static/latest.jpg");
    assert!(!app.dir.path().join("latest.png").exists());

    let latest = body_json(app.get("/api/stream/frame/latest").await).await;
    assert_eq!(latest["contentType"], "image/jpeg");
}

#[tokio::test]
async fn empty_frame_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Form::new()
                .file("frame", "f.png", "image/png", b"")
                .post("/api/stream/frame"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, b"empty frame");
    assert!(!app.dir.path().join("latest.png").exists());
}

#[tokio::test]
async fn missing_file_part_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .send(Form::new().text("note", "no file here").post("/api/stream/segment"))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "missing file part");
}

#[tokio::test]
async fn non_multipart_body_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/stream/frame")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], 400);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = TestApp::with(
        |config| config.with_max_upload_bytes(1024),
        ScriptedInterpreter::default(),
    )
    .await;

    let mut big = WEBM.to_vec();
    big.resize(8 * 1024, 0);
    let response = app
        .send(
            Form::new()
                .file("video", "big.webm", "video/webm", &big)
                .post("/api/stream/segment"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(!app.dir.path().join("current.webm").exists());
}

#[tokio::test]
async fn history_lists_bounded_copies() {
    let app = TestApp::with(
        |config| {
            let store = config.store.clone().with_history_limit(2);
            config.with_store(store)
        },
        ScriptedInterpreter::default(),
    )
    .await;

    for _ in 0..3 {
        app.send(
            Form::new()
                .file("video", "a.webm", "video/webm", WEBM)
                .post("/api/stream/segment"),
        )
        .await;
    }

    let listing = body_json(app.get("/api/stream/history?slot=segment").await).await;
    assert_eq!(listing["slot"], "segment");
    let urls = listing["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 2);
    for url in urls {
        let url = url.as_str().unwrap();
        assert!(url.starts_with("/static/history/current_"), "{url}");
        assert_eq!(app.get(url).await.status(), StatusCode::OK);
    }

    let frames = body_json(app.get("/api/stream/history?slot=frame").await).await;
    assert!(frames["urls"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::builder()
                .uri("/api/stream/latest")
                .header(header::ORIGIN, "http://viewer.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn cors_restricts_to_configured_origins() {
    let app = TestApp::with(
        |config| config.with_allowed_origins(vec!["http://viewer.example".into()]),
        ScriptedInterpreter::default(),
    )
    .await;

    let allowed = app
        .send(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://viewer.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(
        allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://viewer.example"
    );

    let denied = app
        .send(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://elsewhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert!(
        denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
