//! trivia-server: HTTP backend for the trivia game
//!
//! Lists and paginates questions, lists categories, creates, deletes and
//! searches questions, and serves random quiz questions that skip those
//! already asked. Storage is reached through an explicit [`db::TriviaStore`]
//! handle (PostgreSQL or in-memory).

pub mod catalog;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod quiz;
pub mod seed;

pub use db::{MemoryStore, PgStore, TriviaStore};
pub use error::{Error, Result};
pub use http::{build_router, run_server, AppState, ServerConfig};
