//! INI parsing: the single place INI keys are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use super::size::parse_size;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [device] section
    if let Some(section) = ini.section(Some("device")) {
        if let Some(v) = non_empty(section, "host") {
            config.device.host = Some(v.to_string());
        }
        if let Some(v) = non_empty(section, "username") {
            config.device.username = v.to_string();
        }
        if let Some(v) = non_empty(section, "password") {
            config.device.password = Some(v.to_string());
        }
        if let Some(v) = non_empty(section, "token") {
            config.device.token = Some(v.to_string());
        }
        if let Some(v) = section.get("verify_tls") {
            config.device.verify_tls = parse_bool(v);
        }
        if let Some(v) = section.get("timeout_secs") {
            config.device.timeout_secs = parse_positive(v, "device", "timeout_secs")?;
        }
    }

    // [packages] section
    if let Some(section) = ini.section(Some("packages")) {
        if let Some(v) = non_empty(section, "metadata_file") {
            config.packages.metadata_file = Some(expand_tilde(v));
        }
        if let Some(v) = non_empty(section, "temp_dir") {
            config.packages.temp_dir = expand_tilde(v);
        }
        if let Some(v) = section.get("chunk_size") {
            let size = parse_size(v).map_err(|_| ConfigFileError::InvalidValue {
                section: "packages".to_string(),
                key: "chunk_size".to_string(),
                value: v.to_string(),
                reason: "expected format like '1MB', '512KB', or a byte count".to_string(),
            })?;
            if size == 0 {
                return Err(ConfigFileError::InvalidValue {
                    section: "packages".to_string(),
                    key: "chunk_size".to_string(),
                    value: v.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.packages.chunk_size = size;
        }
        if let Some(v) = section.get("keep_downloads") {
            config.packages.keep_downloads = parse_bool(v);
        }
        if let Some(v) = non_empty(section, "remote_download_dir") {
            config.packages.remote_download_dir = v.to_string();
        }
    }

    // [tasks] section
    if let Some(section) = ini.section(Some("tasks")) {
        if let Some(v) = section.get("poll_interval_secs") {
            config.tasks.poll_interval_secs =
                v.trim()
                    .parse()
                    .map_err(|_| ConfigFileError::InvalidValue {
                        section: "tasks".to_string(),
                        key: "poll_interval_secs".to_string(),
                        value: v.to_string(),
                        reason: "must be a whole number of seconds".to_string(),
                    })?;
        }
        if let Some(v) = section.get("max_polls") {
            config.tasks.max_polls = parse_positive(v, "tasks", "max_polls")?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section, "directory") {
            config.logging.directory = expand_tilde(v);
        }
        if let Some(v) = non_empty(section, "file") {
            config.logging.file = v.to_string();
        }
    }

    Ok(config)
}

fn non_empty<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(str::trim).filter(|v| !v.is_empty())
}

fn parse_positive<T>(value: &str, section: &str, key: &str) -> Result<T, ConfigFileError>
where
    T: FromStr + PartialEq + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n != T::default() => Ok(n),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a positive whole number".to_string(),
        }),
    }
}

/// Parse a boolean value leniently.
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
