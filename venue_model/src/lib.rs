//! # Venue Model
//!
//! The venue catalogue crate - zones, walkways between them, exhibitors and
//! events. This crate is the single source of truth for venue data and does
//! not contain any query logic.

pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;

pub use catalog::*;
pub use config::*;
pub use error::*;
pub use layout::*;
