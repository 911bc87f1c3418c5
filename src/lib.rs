//! Lead Maestro: automation lifecycle core for a lead-management CRM.
//!
//! Users move leads through sales pipelines made of stages, and each stage
//! can carry outbound actions. This crate holds the logic the HTTP routes
//! call when a user starts, cancels, or polls an automation run.
//!
//! # Architecture
//!
//! Lead Maestro follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`automation`]: Run conflict checks, lead selection, action resolution,
//!   status persistence, and cancellation
//! - [`config`]: Environment-driven settings and connection pool setup

pub mod automation;
pub mod config;
