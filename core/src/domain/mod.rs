//! Core domain models
//!
//! A travel post is exchanged as one flat record; the relational backend splits it
//! across several tables and folds it back together on read.

pub mod date;
pub mod post;

pub use date::{format_wire_date, parse_wire_date};
pub use post::{PostDraft, PostPatch, TravelPost};
