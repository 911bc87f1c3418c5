//! Adapter implementations for the automation ports.

pub mod memory;
pub mod postgres;
