//! Content model, edit operations, persistence and configuration

pub mod config;
pub mod content;
pub mod edit;
pub mod error;
pub mod gate;
pub mod storage;
pub mod store;
