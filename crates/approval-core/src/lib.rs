pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod github;
pub mod memory;
pub mod policy;
pub mod report;
pub mod tally;
pub mod tracker;
pub mod types;
pub mod vote;

pub use error::{ApprovalError, Result};
