#![doc(test(attr(deny(warnings))))]

//! Budget Buddy computes spending insights, budget and goal ratios, and advisor
//! prompts from a user's transactions.
//!
//! The insight functions in [`insights`] are pure; [`storage`] and [`config`]
//! cover loading data and settings from disk.

pub mod advisor;
pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod insights;
pub mod notifications;
pub mod services;
pub mod storage;
pub mod time;
pub mod utils;

pub use errors::{BuddyError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Buddy tracing initialized.");
    });
}
