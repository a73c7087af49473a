//! # stride-core
//!
//! Core types shared across all Stride crates:
//! - Record structs for every persisted entity (tasks, initiatives, products, ...)
//! - Integer code tables (task status, priority, claim kind, product right)
//! - Input types accepted by the write side of the schema
//! - Cross-cutting error types
//! - The viewer identity threaded through field resolution

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod inputs;
