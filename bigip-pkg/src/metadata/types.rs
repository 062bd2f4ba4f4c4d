//! Metadata value types.

use std::fmt;
use std::str::FromStr;

use crate::version::{compare_versions, VersionError};

/// A requested version: the `latest` alias or a concrete version string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VersionSpec {
    /// Whatever metadata currently flags as latest.
    #[default]
    Latest,
    /// A specific version, e.g. `3.20.0`.
    Exact(String),
}

impl VersionSpec {
    /// Alias accepted for [`VersionSpec::Latest`].
    pub const LATEST: &'static str = "latest";
}

impl FromStr for VersionSpec {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(Self::LATEST) {
            Ok(Self::Latest)
        } else {
            Ok(Self::Exact(s.to_string()))
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(Self::LATEST),
            Self::Exact(v) => f.write_str(v),
        }
    }
}

/// A fully resolved package for one install or uninstall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReference {
    /// Component name, e.g. `as3`.
    pub component: String,
    /// Concrete version; never the `latest` alias.
    pub version: String,
    /// Where the RPM can be downloaded.
    pub download_url: String,
    /// Installed package name on the device.
    pub package_name: String,
    /// Expected SHA-256 of the RPM, when published.
    pub checksum: Option<String>,
}

impl PackageReference {
    /// File name of the RPM: the last segment of the download URL.
    pub fn artifact_name(&self) -> &str {
        let path = self.download_url.split(['?', '#']).next().unwrap_or_default();
        path.rsplit('/').next().unwrap_or_default()
    }
}

/// One `operator version` constraint a dependent declares on a component.
///
/// The operator is kept as written so a malformed one only affects the
/// dependent that declared it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    pub operator: String,
    pub version: String,
}

impl VersionConstraint {
    /// Create a constraint, e.g. `VersionConstraint::new(">=", "3.16.0")`.
    pub fn new(operator: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            operator: operator.into(),
            version: version.into(),
        }
    }

    /// Whether `version` satisfies this constraint.
    pub fn matches(&self, version: &str) -> Result<bool, VersionError> {
        compare_versions(version, &self.operator, &self.version)
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator.trim(), self.version)
    }
}

/// A component that declares a dependency on another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    /// Name of the dependent component.
    pub name: String,
    /// Constraints the dependent places on the depended-upon component.
    pub constraints: Vec<VersionConstraint>,
    /// Where to read about removing the dependent.
    pub uninstall_documentation: String,
}

impl DependencyRecord {
    /// Whether every constraint holds for `version`.
    ///
    /// A record without constraints is vacuously satisfied.
    pub fn all_satisfied_by(&self, version: &str) -> Result<bool, VersionError> {
        for constraint in &self.constraints {
            if !constraint.matches(version)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(url: &str) -> PackageReference {
        PackageReference {
            component: "as3".to_string(),
            version: "3.20.0".to_string(),
            download_url: url.to_string(),
            package_name: "f5-appsvcs-3.20.0-3.noarch".to_string(),
            checksum: None,
        }
    }

    #[test]
    fn test_version_spec_parsing() {
        assert_eq!("latest".parse::<VersionSpec>().unwrap(), VersionSpec::Latest);
        assert_eq!("LATEST".parse::<VersionSpec>().unwrap(), VersionSpec::Latest);
        assert_eq!(
            "3.20.0".parse::<VersionSpec>().unwrap(),
            VersionSpec::Exact("3.20.0".to_string())
        );
        assert_eq!(VersionSpec::default(), VersionSpec::Latest);
        assert_eq!(VersionSpec::Latest.to_string(), "latest");
    }

    #[test]
    fn test_artifact_name() {
        let r = reference(
            "https://github.com/F5Networks/f5-appsvcs-extension/releases/download/v3.20.0/f5-appsvcs-3.20.0-3.noarch.rpm",
        );
        assert_eq!(r.artifact_name(), "f5-appsvcs-3.20.0-3.noarch.rpm");

        let r = reference("https://cdn.example.com/pkg.rpm?sig=abc");
        assert_eq!(r.artifact_name(), "pkg.rpm");
    }

    #[test]
    fn test_all_satisfied_by() {
        let record = DependencyRecord {
            name: "fast".to_string(),
            constraints: vec![
                VersionConstraint::new(">=", "3.16.0"),
                VersionConstraint::new("<", "4.0.0"),
            ],
            uninstall_documentation: "https://example.com/docs".to_string(),
        };

        assert!(record.all_satisfied_by("3.20.0").unwrap());
        assert!(!record.all_satisfied_by("3.15.0").unwrap());
        assert!(!record.all_satisfied_by("4.1.0").unwrap());
    }

    #[test]
    fn test_no_constraints_is_satisfied() {
        let record = DependencyRecord {
            name: "fast".to_string(),
            constraints: Vec::new(),
            uninstall_documentation: String::new(),
        };
        assert!(record.all_satisfied_by("1.0.0").unwrap());
    }

    #[test]
    fn test_constraint_display() {
        let c = VersionConstraint::new(">=", "1.2.0");
        assert_eq!(c.to_string(), ">=1.2.0");
    }

    #[test]
    fn test_invalid_operator_fails_only_its_record() {
        let record = DependencyRecord {
            name: "legacy".to_string(),
            constraints: vec![VersionConstraint::new("~>", "1.0.0")],
            uninstall_documentation: String::new(),
        };
        assert!(matches!(
            record.all_satisfied_by("1.0.0"),
            Err(VersionError::InvalidOperator(_))
        ));
    }
}
