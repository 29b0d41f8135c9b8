//! # HTTP Server Module
//!
//! JSON API over the journal services.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/v1/boards` - Board creation and board-level operations
//! - `/api/v1/boards/{edit,public}/:token` - Open a board by secret
//! - `/api/v1/boards/:board_id/pages` - Pages and their elements
//! - `/api/v1/boards/:board_id/recap` - Day/week/month recap
//!
//! Secrets are passed as `edit_token` or `public_token` query parameters.

pub mod board_routes;
pub mod config;
pub mod element_routes;
pub mod health_routes;
pub mod page_routes;
pub mod recap_routes;
pub mod response;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use server::HttpServer;

use std::sync::Arc;

use crate::service::Journal;
use crate::store::InMemoryDocumentStore;

/// Journal state shared by every handler
pub type SharedJournal = Arc<Journal<InMemoryDocumentStore>>;
