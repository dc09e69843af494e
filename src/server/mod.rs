//! HTTP route serving `GET /w/{token}/image.png`.

pub mod app;
pub mod error;
pub mod handlers;
pub mod store;
