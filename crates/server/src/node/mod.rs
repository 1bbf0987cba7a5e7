//! Blockchain node REST client

pub mod client;

pub use client::{NodeClient, NodeError};
