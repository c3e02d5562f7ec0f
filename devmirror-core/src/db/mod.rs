//! Database layer for devmirror
//!
//! This module provides the storage layer using SQLite with:
//! - Schema migrations
//! - Repository for the analysis history

pub mod repo;
pub mod schema;

pub use repo::{Database, HistoryFilter};
