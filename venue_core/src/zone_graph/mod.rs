//! Zone graph module - the spatial model of the venue.
//!
//! The model consists of:
//! - **Zones**: Nodes, kept in the venue's declared order
//! - **Walkways**: Undirected weighted edges in meters
//! - **Booth index**: Which zone each exhibitor's booth sits in

mod booth;
mod graph;

pub use booth::*;
pub use graph::*;
