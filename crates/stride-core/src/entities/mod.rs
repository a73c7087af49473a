//! Record structs for all Stride entities.
//!
//! Each record maps to one table in the libSQL store (see
//! `stride-db/migrations`). Coded columns (status, priority, kind, right) keep
//! the stored integer; see `crate::enums` for their names.

mod attachment;
mod capability;
mod claim;
mod code_repository;
mod initiative;
mod listing;
mod membership;
mod person;
mod product;
mod task;
mod taxonomy;

pub use attachment::Attachment;
pub use capability::Capability;
pub use claim::{TaskClaim, TaskDepend};
pub use code_repository::CodeRepository;
pub use initiative::Initiative;
pub use listing::TaskListing;
pub use membership::{ProductPerson, ProductTask};
pub use person::Person;
pub use product::Product;
pub use task::Task;
pub use taxonomy::{Expertise, Tag, TaskCategory};
