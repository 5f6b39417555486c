//! Unit tests for the board module.
//!
//! Tests are organised by concern: the pure domain model, drag handling,
//! rendering projections, reconciliation against a mocked remote store,
//! preference persistence and the session facade.

mod support;
