//! # ecode-resolve: Error-Code Graph Resolution
//!
//! Computes the complete, deduplicated list of error codes an operation can
//! return by walking the graph of annotations reachable from it.
//!
//! ## Components
//!
//! - [`Registry`]: an immutable snapshot of every declared operation, the
//!   validator bound to each validated type, and an optional catalog of
//!   allowed codes. Built once at startup through [`RegistryBuilder`].
//! - [`Resolver`]: resolves one operation at a time against a registry.
//!
//! ## Resolution Order
//!
//! Annotations are processed in declaration order. Literal codes are
//! emitted as-is; operation delegations are expanded in place; validator
//! delegations are replaced in place by the validator's extracted codes. A
//! final stable pass drops structural duplicates, keeping first occurrences.
//!
//! ## Cycles
//!
//! Each resolve call tracks the operations it has expanded. A delegation to
//! an already-expanded operation is skipped silently, so mutually
//! referencing operations terminate and contribute their codes once.
//!
//! ## Crate Policy
//!
//! - The registry is read-only after [`RegistryBuilder::build`]; resolution
//!   never mutates it and holds no shared mutable state, so concurrent calls
//!   need no locking.
//! - Errors are fatal to the resolve call that hit them: no partial results.

pub mod registry;
pub mod resolver;

pub use registry::{Registry, RegistryBuilder};
pub use resolver::Resolver;
