//! JSON-backed metadata catalog.
//!
//! # Format
//!
//! ```json
//! {
//!   "components": {
//!     "as3": {
//!       "componentPackageName": "f5-appsvcs",
//!       "componentDependencies": {
//!         "fast": {
//!           "versions": [{ "version": "3.16.0", "operation": ">=" }],
//!           "uninstallDocumentation": "https://..."
//!         }
//!       },
//!       "versions": {
//!         "3.20.0": {
//!           "downloadUrl": "https://.../f5-appsvcs-3.20.0-3.noarch.rpm",
//!           "packageName": "f5-appsvcs-3.20.0-3.noarch",
//!           "latest": true,
//!           "checksum": "<optional sha256>"
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Exactly one version per component should carry `"latest": true`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::error::{MetadataError, MetadataResult};
use super::traits::MetadataProvider;
use super::types::{DependencyRecord, VersionConstraint};
use crate::version::parse_version;

/// Catalog shipped with the crate.
const BUNDLED_CATALOG: &str = include_str!("../../data/metadata.json");

#[derive(Debug, Clone, Deserialize)]
struct CatalogFile {
    components: BTreeMap<String, ComponentEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComponentEntry {
    component_package_name: String,
    #[serde(default)]
    component_dependencies: BTreeMap<String, DependencyEntry>,
    versions: BTreeMap<String, VersionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionEntry {
    download_url: String,
    package_name: String,
    #[serde(default)]
    latest: bool,
    #[serde(default)]
    checksum: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DependencyEntry {
    #[serde(default)]
    versions: Vec<ConstraintEntry>,
    #[serde(default)]
    uninstall_documentation: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ConstraintEntry {
    version: String,
    operation: String,
}

/// Summary of a catalog component, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    /// Component name, e.g. `as3`.
    pub name: String,
    /// Package name prefix on the device.
    pub package_name: String,
    /// Known versions, oldest first.
    pub versions: Vec<String>,
    /// Version flagged as latest, if exactly one is.
    pub latest: Option<String>,
}

/// Metadata provider backed by a JSON catalog.
#[derive(Debug, Clone)]
pub struct MetadataCatalog {
    components: BTreeMap<String, ComponentEntry>,
}

impl MetadataCatalog {
    /// The catalog bundled with this crate.
    pub fn bundled() -> MetadataResult<Self> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> MetadataResult<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| MetadataError::ParseFailed(e.to_string()))?;
        Ok(Self {
            components: file.components,
        })
    }

    /// Load a catalog from a file.
    pub fn from_file(path: &Path) -> MetadataResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| MetadataError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Names of all components in the catalog.
    pub fn component_names(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    /// Summaries of every component, sorted by name.
    pub fn components(&self) -> Vec<ComponentInfo> {
        self.components
            .iter()
            .map(|(name, entry)| {
                let mut versions: Vec<String> = entry.versions.keys().cloned().collect();
                versions.sort_by(|a, b| match (parse_version(a), parse_version(b)) {
                    (Ok(a), Ok(b)) => a.cmp(&b),
                    _ => a.cmp(b),
                });
                ComponentInfo {
                    name: name.clone(),
                    package_name: entry.component_package_name.clone(),
                    versions,
                    latest: self.latest_version(name).ok(),
                }
            })
            .collect()
    }

    fn component(&self, component: &str) -> MetadataResult<&ComponentEntry> {
        self.components
            .get(component)
            .ok_or_else(|| MetadataError::UnknownComponent(component.to_string()))
    }

    fn version(&self, component: &str, version: &str) -> MetadataResult<&VersionEntry> {
        self.component(component)?
            .versions
            .get(version)
            .ok_or_else(|| MetadataError::UnknownVersion {
                component: component.to_string(),
                version: version.to_string(),
            })
    }
}

impl MetadataProvider for MetadataCatalog {
    fn latest_version(&self, component: &str) -> MetadataResult<String> {
        let latest: Vec<&String> = self
            .component(component)?
            .versions
            .iter()
            .filter(|(_, v)| v.latest)
            .map(|(k, _)| k)
            .collect();

        match latest.as_slice() {
            [] => Err(MetadataError::NoLatestVersion(component.to_string())),
            [only] => Ok((*only).clone()),
            many => Err(MetadataError::MultipleLatestVersions {
                component: component.to_string(),
                versions: many.iter().map(|v| (*v).clone()).collect(),
            }),
        }
    }

    fn download_url(&self, component: &str, version: &str) -> MetadataResult<String> {
        Ok(self.version(component, version)?.download_url.clone())
    }

    fn package_name(&self, component: &str, version: &str) -> MetadataResult<String> {
        Ok(self.version(component, version)?.package_name.clone())
    }

    fn component_package_name(&self, component: &str) -> MetadataResult<String> {
        Ok(self.component(component)?.component_package_name.clone())
    }

    fn component_dependencies(&self, component: &str) -> MetadataResult<Vec<DependencyRecord>> {
        let entry = self.component(component)?;

        Ok(entry
            .component_dependencies
            .iter()
            .map(|(name, dep)| DependencyRecord {
                name: name.clone(),
                constraints: dep
                    .versions
                    .iter()
                    .map(|c| VersionConstraint::new(c.operation.as_str(), c.version.as_str()))
                    .collect(),
                uninstall_documentation: dep.uninstall_documentation.clone(),
            })
            .collect())
    }

    fn checksum(&self, component: &str, version: &str) -> MetadataResult<Option<String>> {
        Ok(self.version(component, version)?.checksum.clone())
    }
}
