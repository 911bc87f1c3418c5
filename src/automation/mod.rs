//! Automation lifecycle for pipeline stages.
//!
//! A run processes the leads of one pipeline stage through the stage's
//! configured actions on one outreach platform. This module decides whether
//! a run may start, selects its leads and actions, records its status, and
//! cancels earlier runs it supersedes. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
