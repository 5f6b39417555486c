//! Corkboard: Kanban board engine.
//!
//! This crate keeps an ordered board of lists and cards consistent while a
//! user drags, edits and deletes things, and reconciles those local changes
//! with a remote store of record.
//!
//! # Architecture
//!
//! Corkboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board model and ordering logic
//! - **Ports**: Abstract trait interfaces for the remote store, local
//!   preferences and user feedback
//! - **Adapters**: Concrete implementations of ports (in-memory, file,
//!   `PostgreSQL`)
//!
//! # Modules
//!
//! - [`ordering`]: Index-based move and transfer primitives
//! - [`board`]: Board model, ports, adapters and session services

pub mod board;
pub mod ordering;
