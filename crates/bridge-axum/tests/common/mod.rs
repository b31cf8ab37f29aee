//! Shared helpers for bridge-axum integration tests.

#![allow(dead_code)]

pub mod app;
pub mod multipart;
