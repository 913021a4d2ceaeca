//! # Domain Models
//!
//! Shared, dependency-light types used by every HR Hub crate: configuration, well-known
//! constants and the slice registry. No I/O, networking, or business logic lives here.

pub mod config;
pub mod constants;
pub mod registry;
