//! # Venue Core
//!
//! The query engine behind the salon guide. This crate reads a venue from
//! `venue_model`, turns it into an immutable snapshot, and answers the
//! questions visitors ask: where something is, how to walk there, what is
//! nearby, which exhibitors or talks match a few words, and what is on now.
//!
//! ## Core Components
//!
//! - **zone_graph**: Weighted zone graph and the booth-to-zone index
//! - **resolver**: Maps free text, zone ids and booth numbers to zones
//! - **navigation**: Shortest routes between two locations
//! - **proximity**: What is in and around a zone
//! - **search**: Deterministic relevance ranking of exhibitors and events
//! - **schedule**: Time-window queries and event status
//! - **snapshot**: The immutable venue state and its atomic reload
//!
//! All queries are pure functions of a snapshot; results are data, not text.

pub mod error;
pub mod navigation;
pub mod proximity;
pub mod resolver;
pub mod schedule;
pub mod search;
pub mod snapshot;
pub mod zone_graph;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::*;
pub use navigation::*;
pub use proximity::*;
pub use resolver::*;
pub use schedule::*;
pub use search::*;
pub use snapshot::*;
pub use zone_graph::*;
