//! Travelog core
//!
//! Travel post records, the validators that guard incoming payloads, and the two
//! interchangeable storage backends (SQLite through SeaORM, or a single JSON file).

pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod repository;
pub mod validation;

pub use domain::post::{PostDraft, PostPatch, TravelPost};
pub use error::{PostError, Result};
pub use repository::PostRepository;
