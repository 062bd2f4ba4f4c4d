//! The metadata provider seam.

use super::error::MetadataResult;
use super::types::{DependencyRecord, PackageReference, VersionSpec};

/// Source of component metadata.
///
/// Implementations only answer lookups for concrete versions; resolving the
/// `latest` alias is done once, in [`MetadataProvider::resolve_version`].
pub trait MetadataProvider: Send + Sync {
    /// Version currently flagged as latest.
    fn latest_version(&self, component: &str) -> MetadataResult<String>;

    /// Download URL of the RPM for a version.
    fn download_url(&self, component: &str, version: &str) -> MetadataResult<String>;

    /// Installed package name for a version, e.g. `f5-appsvcs-3.20.0-3.noarch`.
    fn package_name(&self, component: &str, version: &str) -> MetadataResult<String>;

    /// Version-independent prefix shared by every package of the component,
    /// e.g. `f5-appsvcs`.
    fn component_package_name(&self, component: &str) -> MetadataResult<String>;

    /// Components that declare a dependency on this one.
    fn component_dependencies(&self, component: &str) -> MetadataResult<Vec<DependencyRecord>>;

    /// Published SHA-256 of the RPM, if any.
    fn checksum(&self, _component: &str, _version: &str) -> MetadataResult<Option<String>> {
        Ok(None)
    }

    /// Turn a version spec into a concrete version.
    fn resolve_version(&self, component: &str, spec: &VersionSpec) -> MetadataResult<String> {
        match spec {
            VersionSpec::Latest => self.latest_version(component),
            VersionSpec::Exact(version) => Ok(version.clone()),
        }
    }

    /// Resolve everything needed to install or uninstall a version.
    fn resolve(&self, component: &str, spec: &VersionSpec) -> MetadataResult<PackageReference> {
        let version = self.resolve_version(component, spec)?;
        Ok(PackageReference {
            component: component.to_string(),
            download_url: self.download_url(component, &version)?,
            package_name: self.package_name(component, &version)?,
            checksum: self.checksum(component, &version)?,
            version,
        })
    }
}

impl<M: MetadataProvider + ?Sized> MetadataProvider for &M {
    fn latest_version(&self, component: &str) -> MetadataResult<String> {
        (**self).latest_version(component)
    }

    fn download_url(&self, component: &str, version: &str) -> MetadataResult<String> {
        (**self).download_url(component, version)
    }

    fn package_name(&self, component: &str, version: &str) -> MetadataResult<String> {
        (**self).package_name(component, version)
    }

    fn component_package_name(&self, component: &str) -> MetadataResult<String> {
        (**self).component_package_name(component)
    }

    fn component_dependencies(&self, component: &str) -> MetadataResult<Vec<DependencyRecord>> {
        (**self).component_dependencies(component)
    }

    fn checksum(&self, component: &str, version: &str) -> MetadataResult<Option<String>> {
        (**self).checksum(component, version)
    }
}
