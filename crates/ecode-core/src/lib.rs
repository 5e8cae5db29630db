//! # ecode-core: Annotation Model for the Error-Code Aggregator
//!
//! This crate defines the metadata every other crate in the workspace reads:
//! what an error code looks like, how operations and validated types are
//! named, and how an operation declares the codes it can return.
//!
//! ## Key Design Principles
//!
//! 1. **Structural error-code values.** [`ErrorCodeDescription`] is an
//!    immutable `(property?, code, description?)` triple. Equality and hashing
//!    cover all three fields, so two entries that differ only in description
//!    are distinct.
//!
//! 2. **Validated reference names.** [`OperationId`] and [`TypeName`] are
//!    newtypes with parsing constructors. A malformed delegation target is
//!    rejected when the annotation is built, never later during resolution.
//!
//! 3. **Explicit declaration order.** An [`Operation`] owns an ordered
//!    `Vec<Annotation>`. Nothing downstream re-sorts it.
//!
//! 4. **One error taxonomy.** [`ResolutionError`] covers missing references,
//!    malformed references, and registry configuration defects. Cycles are
//!    not errors.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ecode-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod annotation;
pub mod catalog;
pub mod description;
pub mod documentation;
pub mod error;
pub mod identity;

// Re-export primary types for ergonomic imports.
pub use annotation::{Annotation, Operation};
pub use catalog::{check_code, CatalogEntry, ErrorCodeCatalog};
pub use description::{dedup_stable, ErrorCodeDescription};
pub use documentation::DocumentationOptions;
pub use error::{ReferenceKind, ResolutionError};
pub use identity::{OperationId, TypeName};
