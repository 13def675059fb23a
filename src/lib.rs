//! Netscribe Server Library
//!
//! In-memory infrastructure inventory and document intake service.
//!
//! # Modules
//!
//! - `inventory`: record store for servers and documents
//! - `notify`: bounded notification queue and background worker
//! - `routes`: HTTP handlers and router assembly
//! - `server`: process lifecycle and graceful shutdown

pub mod config;
pub mod error;
pub mod inventory;
pub mod notify;
pub mod routes;
pub mod server;
pub mod state;
