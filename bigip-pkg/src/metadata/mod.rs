//! Extension component metadata.
//!
//! Everything the workflow needs to know about a component that is not on
//! the device itself: which version is current, where its RPM lives, what
//! the installed package is called, and which other components depend on it.
//!
//! - `traits`: the `MetadataProvider` seam and version resolution
//! - `types`: `VersionSpec`, `PackageReference`, `DependencyRecord`
//! - `catalog`: `MetadataCatalog`, a JSON-backed provider with a bundled
//!   default catalog
//! - `error`: `MetadataError`

mod catalog;
mod error;
mod traits;
mod types;

pub use catalog::{ComponentInfo, MetadataCatalog};
pub use error::{MetadataError, MetadataResult};
pub use traits::MetadataProvider;
pub use types::{DependencyRecord, PackageReference, VersionConstraint, VersionSpec};
