//! Version comparison and extraction.
//!
//! Metadata versions are mostly strict `MAJOR.MINOR.PATCH`, but constraints
//! sometimes omit trailing components (`">=1.2"`) so parsing pads them with
//! zeros before handing off to [`semver`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use semver::Version;
use thiserror::Error;

/// Errors from version parsing and comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The string is not a recognisable version.
    #[error("invalid version '{0}'")]
    InvalidVersion(String),

    /// The comparison operator is not supported.
    #[error("invalid version operator '{0}'")]
    InvalidOperator(String),
}

/// A comparison operator from a version constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparator {
    /// Operator as written in metadata.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Evaluate `left <op> right`.
    pub fn evaluate(&self, left: &Version, right: &Version) -> bool {
        match self {
            Self::Eq => left == right,
            Self::Ne => left != right,
            Self::Lt => left < right,
            Self::Le => left <= right,
            Self::Gt => left > right,
            Self::Ge => left >= right,
        }
    }
}

impl FromStr for Comparator {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "==" | "=" => Ok(Self::Eq),
            "!=" => Ok(Self::Ne),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Le),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Ge),
            other => Err(VersionError::InvalidOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parse a version, tolerating a leading `v` and missing minor/patch parts.
pub fn parse_version(s: &str) -> Result<Version, VersionError> {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

    if let Ok(version) = Version::parse(trimmed) {
        return Ok(version);
    }

    let parts: Vec<&str> = trimmed.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(VersionError::InvalidVersion(s.to_string()));
    }

    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| VersionError::InvalidVersion(s.to_string()))?;
    }

    Ok(Version::new(numbers[0], numbers[1], numbers[2]))
}

/// Evaluate `version <op> other`, e.g. `compare_versions("3.20.0", ">=", "3.16.0")`.
pub fn compare_versions(version: &str, op: &str, other: &str) -> Result<bool, VersionError> {
    let comparator: Comparator = op.parse()?;
    Ok(comparator.evaluate(&parse_version(version)?, &parse_version(other)?))
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+\.[0-9]+\.[0-9]+").expect("valid regex"))
}

/// Extract the first `N.N.N` version embedded in a package name.
///
/// ```
/// use bigip_pkg::version::extract_version;
///
/// assert_eq!(extract_version("f5-appsvcs-3.20.0-3.noarch"), Some("3.20.0"));
/// assert_eq!(extract_version("f5-appsvcs"), None);
/// ```
pub fn extract_version(package_name: &str) -> Option<&str> {
    version_pattern().find(package_name).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparator_parsing() {
        assert_eq!(">=".parse::<Comparator>().unwrap(), Comparator::Ge);
        assert_eq!("=".parse::<Comparator>().unwrap(), Comparator::Eq);
        assert_eq!(" < ".parse::<Comparator>().unwrap(), Comparator::Lt);
        assert!("~>".parse::<Comparator>().is_err());
    }

    #[test]
    fn test_comparator_display_roundtrips() {
        for op in ["==", "!=", "<", "<=", ">", ">="] {
            assert_eq!(op.parse::<Comparator>().unwrap().to_string(), op);
        }
    }

    #[test]
    fn test_compare_versions() {
        assert!(compare_versions("3.20.0", ">=", "3.16.0").unwrap());
        assert!(!compare_versions("3.15.1", ">=", "3.16.0").unwrap());
        assert!(compare_versions("3.10.0", ">", "3.9.9").unwrap());
        assert!(compare_versions("1.2.0", "==", "1.2").unwrap());
        assert!(compare_versions("1.2.0", "!=", "1.2.1").unwrap());
        assert!(compare_versions("1.2.0", "<=", "1.2.0").unwrap());
    }

    #[test]
    fn test_parse_version_lenient() {
        assert_eq!(parse_version("v1.13.0").unwrap(), Version::new(1, 13, 0));
        assert_eq!(parse_version("2").unwrap(), Version::new(2, 0, 0));
        assert!(parse_version("latest").is_err());
        assert!(parse_version("1.2.3.4").is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            compare_versions("abc", ">=", "1.0.0"),
            Err(VersionError::InvalidVersion(_))
        ));
        assert!(matches!(
            compare_versions("1.0.0", "=>", "1.0.0"),
            Err(VersionError::InvalidOperator(_))
        ));
    }

    #[test]
    fn test_extract_version() {
        assert_eq!(
            extract_version("f5-declarative-onboarding-1.13.0-5.noarch"),
            Some("1.13.0")
        );
        assert_eq!(extract_version("f5-telemetry-1.12.0-3.noarch"), Some("1.12.0"));
        assert_eq!(extract_version("f5-appsvcs-3"), None);
    }
}
