//! User configuration from `~/.bigip-pkg/config.ini`.
//!
//! ```ini
//! [device]
//! host = 192.0.2.10
//! username = admin
//! verify_tls = false
//!
//! [packages]
//! chunk_size = 1MB
//! keep_downloads = false
//!
//! [tasks]
//! poll_interval_secs = 1
//! max_polls = 120
//! ```
//!
//! Every key is optional; a missing file yields the defaults.

mod file;
mod parser;
mod settings;
mod size;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, DeviceSettings, LoggingSettings, PackageSettings, TaskSettings,
    DEFAULT_DEVICE_TIMEOUT_SECS, DEFAULT_LOG_FILE, DEFAULT_USERNAME,
};
pub use size::{format_size, parse_size, SizeParseError};
