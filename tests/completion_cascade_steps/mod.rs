//! Step definitions for completion cascade behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
