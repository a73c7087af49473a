//! # stride-schema
//!
//! Object and input types of the Stride work-tracking schema, with the field
//! resolvers that compute derived values from the store.
//!
//! - [`types`]: object types; each record-backed type resolves its computed
//!   fields on demand against a [`context::ResolveContext`]
//! - [`status`], [`video`], [`link`]: derivation helpers shared by resolvers
//! - [`sdl`]: GraphQL SDL of the object and input types
//! - [`registry`]: JSON Schemas of inputs and resolved nodes, with validation
//!
//! Missing related records resolve to `None`, `false`, or an empty list.
//! Only store failures surface as [`error::SchemaError`]. Nothing is cached:
//! every resolver reads the store when called.

pub mod context;
pub mod error;
pub mod link;
pub mod registry;
pub mod sdl;
pub mod status;
pub mod types;
pub mod video;

pub use context::ResolveContext;
pub use error::SchemaError;
pub use sdl::schema_sdl;
