//! API Module
//!
//! HTTP handlers and routing for the player registry REST API.
//!
//! # Endpoints
//! - `GET|POST /players` - List / create players
//! - `GET|PUT|DELETE /players/:id` - Read / update / delete one player
//! - `POST /refresh` - Manual reload from the remote store
//! - `PUT|DELETE /refresh/auto` - Toggle background auto refresh
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
