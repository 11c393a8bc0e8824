//! # TaskLists Core Library
//!
//! This crate contains the domain models, store contracts, and the
//! access-control and mutation services for the TaskLists system.
//!
//! ## Module Organization
//!
//! - `models`: Domain entities (users, collections, shares, task items)
//! - `store`: Store contracts plus Postgres and in-memory implementations
//! - `service`: Access-control and mutation services
//! - `result`: The uniform service result envelope
//! - `db`: Connection pool and migration runner

pub mod db;
pub mod models;
pub mod result;
pub mod service;
pub mod store;

/// Current version of the TaskLists core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
