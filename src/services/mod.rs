pub mod insight_service;

pub use insight_service::{InsightService, InsightSnapshot};
