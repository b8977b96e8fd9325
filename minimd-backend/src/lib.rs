//! Minimd note store: durable CRUD over markdown notes, served as HTTP/JSON.
//!
//! The binary in `main.rs` wires these pieces into an actix-web server; tests
//! and embedders can build the same app from [`AppState`], [`json_config`],
//! [`path_config`] and [`controllers::config`].

use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use minimd_types::ErrorBody;
use std::sync::Arc;
use std::time::Instant;

pub mod config;
pub mod controllers;
pub mod db;
pub mod error;

pub use config::Config;
pub use db::Database;
pub use error::{StoreError, StoreResult};

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: Arc<Database>, config: Config) -> Self {
        Self {
            db,
            config,
            started_at: Instant::now(),
        }
    }
}

/// JSON extractor settings: bodies over `limit` bytes, bodies that are not
/// JSON, and bodies missing `title`/`content` all answer 400.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, req| {
            log::warn!("[API] Rejected body for {} {}: {}", req.method(), req.path(), err);
            let response =
                HttpResponse::BadRequest().json(ErrorBody::new(format!("Malformed request: {}", err)));
            InternalError::from_response(err, response).into()
        })
}

/// A path id that is not an integer cannot name a note, so it is a 404.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound().json(ErrorBody::new("Note not found"));
        InternalError::from_response(err, response).into()
    })
}
