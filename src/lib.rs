//! Eisenhower: hierarchical to-do list service core.
//!
//! This crate provides the core functionality for managing to-do lists whose
//! tasks nest one level deep: lists own parent tasks, parent tasks own child
//! tasks. Completion cascades both ways: completing a parent force-completes
//! its children, and completing the last open child closes the parent. A
//! recurrence expander turns one template task into a series across a date
//! range.
//!
//! # Architecture
//!
//! Eisenhower follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`todo`]: Lists, tasks, completion cascade, and recurrence expansion
//! - [`rest`]: Transport-agnostic resource endpoints over the todo services

pub mod rest;
pub mod todo;
