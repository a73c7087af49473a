//! Object types of the schema.
//!
//! Record-backed types (`TaskType`, `ProductType`, ...) wrap one record and
//! expose each computed field as an async resolver taking a
//! [`ResolveContext`](crate::context::ResolveContext). `resolve()` runs all of
//! them and returns a serializable `*Node`. Snapshot and plain types are
//! ordinary structs.

pub mod capability;
pub mod initiative;
pub mod listing;
pub mod plain;
pub mod product;
pub mod task;

pub use capability::{CapabilityNode, CapabilityType};
pub use initiative::{InitiativeNode, InitiativeType};
pub use listing::{CapabilityTaskType, InitiativeTaskType, TaskListingNode, TaskListingType};
pub use plain::{
    AssignedToPersonType, AttachmentType, BreadcrumbType, CodeRepositoryType, ExpertiseType,
    InitiativeDictType, PersonJsonData, PersonType, ProductDictType, ProductTaskType,
    TagType, TaskCategoryType,
};
pub use product::{ProductNode, ProductType};
pub use task::{TaskNode, TaskSummary, TaskType};
