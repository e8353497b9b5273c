//! Healthcare admin dashboard client library
//!
//! An async client for the dashboard's REST backend with a tag-invalidated
//! query cache, a persisted session store, a headless data table engine and
//! the feature pages built on top of them.

pub mod api;
pub mod auth;
pub mod cache;
pub mod error;
pub mod model;
pub mod pages;
pub mod response;
pub mod retry;
pub mod store;
pub mod table;

mod client;

pub use client::*;
pub use response::CacheStatus;
pub use response::Response;
