//! Storage infrastructure

pub mod db;
