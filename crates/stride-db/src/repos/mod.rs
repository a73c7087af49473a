//! Repository modules implementing reads and writes for all Stride records.
//!
//! Each module adds methods to `StrideService` via `impl StrideService` blocks.

pub mod attachment;
pub mod capability;
pub mod claim;
pub mod code_repository;
pub mod initiative;
pub mod listing;
pub mod membership;
pub mod person;
pub mod product;
pub mod task;
pub mod taxonomy;
