//! Sensorboard Core Types
//!
//! This crate provides the fundamental types shared by the dashboard crates:
//! - Page requests and the query builder that produces them
//! - Paginated response envelopes
//! - Remote resources and their row records
//! - Admin session data

pub mod models;
pub mod page;
pub mod query;
pub mod resource;
pub mod session;
pub mod time;

pub use page::PageEnvelope;
pub use query::{DateRange, PageRequest, RawPageQuery, build_query};
pub use resource::Resource;
pub use session::{AdminRole, Session};
