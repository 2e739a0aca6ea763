//! Resource endpoint layer for the todo services.
//!
//! Transport-agnostic: handlers consume parsed JSON values and path
//! segments, and produce status codes plus JSON bodies. Binding them to an
//! HTTP framework, routing, and authentication are left to the embedding.

pub mod dto;
pub mod endpoints;
mod error;

pub use endpoints::{ApiReply, TodoApi};

#[cfg(test)]
mod tests;
