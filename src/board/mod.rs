//! Kanban board ordering, mutation and reconciliation engine.
//!
//! Boards hold ordered lists and lists hold ordered cards. Every user action
//! is applied to the local board first and, where the remote store of record
//! cares about it, queued for reconciliation. The module follows hexagonal
//! architecture:
//!
//! - Domain types and pure transformations in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Engine tunables in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
