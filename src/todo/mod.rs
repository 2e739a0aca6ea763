//! Hierarchical todo list management.
//!
//! Lists own parent tasks and parent tasks own child tasks. The module
//! implements the completion cascade (completing a parent force-completes
//! its children; completing the last open child closes the parent) and
//! recurrence expansion (one template task expanded across a date range at a
//! fixed step), plus the CRUD surface those behaviours hang off. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
