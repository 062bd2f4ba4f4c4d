//! bigip-pkg - Extension package management for BIG-IP devices
//!
//! This library installs, removes and queries extension component packages
//! (RPMs such as AS3, DO or TS) on a BIG-IP through its iControl REST API.
//!
//! # Architecture
//!
//! ```text
//! PackageManager (manager)
//!         │
//!         ├── MetadataProvider (metadata)   resolves versions, URLs, names
//!         ├── Downloader (download)         fetches the RPM locally
//!         ├── ChunkedUploader (upload)      streams the RPM to the device
//!         └── TaskClient (task)             submits and polls package tasks
//!                 │
//!                 └── Transport (transport) authenticated JSON requests
//! ```
//!
//! Everything is synchronous and blocking; operations against one device run
//! strictly one step after another.

pub mod config;
pub mod download;
pub mod logging;
pub mod manager;
pub mod metadata;
pub mod task;
pub mod transport;
pub mod upload;
pub mod version;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent with every request to the device.
pub const USER_AGENT: &str = concat!("bigip-pkg/", env!("CARGO_PKG_VERSION"));
