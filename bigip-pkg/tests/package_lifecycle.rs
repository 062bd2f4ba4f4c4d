//! Integration tests for the package lifecycle against a simulated device.
//!
//! The simulated device keeps real state: uploaded files are reassembled
//! from their byte ranges, INSTALL moves an uploaded RPM into the installed
//! set, UNINSTALL removes it, and QUERY lists what is installed. Each task
//! reports RUNNING once before reaching its terminal state.
//!
//! Run with: `cargo test --test package_lifecycle`

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{json, Value};
use tempfile::TempDir;

use bigip_pkg::download::{DownloadResult, Downloader};
use bigip_pkg::manager::{ManagerConfig, ManagerError, PackageManager};
use bigip_pkg::metadata::{MetadataCatalog, MetadataProvider, VersionSpec};
use bigip_pkg::task::{PollPolicy, TaskError, PACKAGE_TASKS_URI};
use bigip_pkg::transport::{
    ApiRequest, Method, RequestBody, Transport, TransportError, TransportResult,
};
use bigip_pkg::upload::{UploadConfig, UPLOAD_URI};

// ============================================================================
// Simulated device
// ============================================================================

#[derive(Default)]
struct DeviceState {
    uploads: HashMap<String, Vec<u8>>,
    installed: BTreeSet<String>,
    tasks: HashMap<String, (u32, Value)>,
    next_task: u32,
}

#[derive(Default)]
struct SimulatedDevice {
    state: Mutex<DeviceState>,
}

impl SimulatedDevice {
    fn with_installed(packages: &[&str]) -> Self {
        let device = Self::default();
        device
            .state
            .lock()
            .unwrap()
            .installed
            .extend(packages.iter().map(|p| p.to_string()));
        device
    }

    fn installed(&self) -> Vec<String> {
        self.state.lock().unwrap().installed.iter().cloned().collect()
    }

    fn uploaded(&self, name: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().uploads.get(name).cloned()
    }

    fn bad_request(uri: &str, body: &str) -> TransportError {
        TransportError::Status {
            method: "POST".to_string(),
            uri: uri.to_string(),
            status: 400,
            body: body.to_string(),
        }
    }

    fn upload_chunk(state: &mut DeviceState, request: &ApiRequest) -> TransportResult<Value> {
        let name = request.uri[UPLOAD_URI.len() + 1..].to_string();
        let range = request
            .header("Content-Range")
            .ok_or_else(|| Self::bad_request(&request.uri, "missing Content-Range"))?;
        let start: usize = range
            .split('-')
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Self::bad_request(&request.uri, "bad Content-Range"))?;

        let bytes = match &request.body {
            RequestBody::Raw(bytes) => bytes,
            _ => return Err(Self::bad_request(&request.uri, "expected raw body")),
        };

        let file = state.uploads.entry(name).or_default();
        if start == 0 {
            file.clear();
        }
        if file.len() != start {
            return Err(Self::bad_request(&request.uri, "out of order chunk"));
        }
        file.extend_from_slice(bytes);
        Ok(Value::Null)
    }

    fn run_task(state: &mut DeviceState, operation: &Value) -> Value {
        let failed = |message: String| json!({"status": "FAILED", "errorMessage": message});

        match operation["operation"].as_str() {
            Some("INSTALL") => {
                let path = operation["packageFilePath"].as_str().unwrap_or_default();
                let file = path.rsplit('/').next().unwrap_or_default();
                if !path.starts_with("/var/config/rest/downloads/")
                    || !state.uploads.contains_key(file)
                {
                    return failed(format!("{} not found", path));
                }
                let package = file.trim_end_matches(".rpm").to_string();
                if !state.installed.insert(package.clone()) {
                    return failed(format!("Package {} is already installed", package));
                }
                json!({"status": "FINISHED"})
            }
            Some("UNINSTALL") => {
                let package = operation["packageName"].as_str().unwrap_or_default();
                if !state.installed.remove(package) {
                    return failed(format!("Package {} is not installed", package));
                }
                json!({"status": "FINISHED"})
            }
            Some("QUERY") => {
                let entries: Vec<Value> = state
                    .installed
                    .iter()
                    .map(|p| json!({"packageName": p, "name": p}))
                    .collect();
                json!({"status": "FINISHED", "queryResponse": entries})
            }
            _ => failed("unsupported operation".to_string()),
        }
    }
}

impl Transport for SimulatedDevice {
    fn request(&self, request: ApiRequest) -> TransportResult<Value> {
        let mut state = self.state.lock().unwrap();

        if request.method == Method::POST && request.uri.starts_with(UPLOAD_URI) {
            return Self::upload_chunk(&mut state, &request);
        }

        if request.method == Method::POST && request.uri == PACKAGE_TASKS_URI {
            let operation = request.json().cloned().unwrap_or(Value::Null);
            let result = Self::run_task(&mut state, &operation);
            state.next_task += 1;
            let id = format!("task-{}", state.next_task);
            state.tasks.insert(id.clone(), (1, result));
            return Ok(json!({"id": id, "status": "CREATED"}));
        }

        if request.method == Method::GET {
            if let Some(id) = request.uri.strip_prefix(&format!("{}/", PACKAGE_TASKS_URI)) {
                let (pending, result) = state
                    .tasks
                    .get_mut(id)
                    .ok_or_else(|| Self::bad_request(&request.uri, "unknown task"))?;
                if *pending > 0 {
                    *pending -= 1;
                    return Ok(json!({"id": id, "status": "RUNNING"}));
                }
                let mut result = result.clone();
                result["id"] = json!(id);
                return Ok(result);
            }
        }

        Err(Self::bad_request(&request.uri, "unexpected request"))
    }
}

/// Downloader that synthesises an RPM whose contents depend on the URL.
struct FakeRelease;

fn release_bytes(url: &str) -> Vec<u8> {
    url.bytes().cycle().take(2500).collect()
}

impl Downloader for FakeRelease {
    fn fetch(&self, url: &str, dest: &Path, _checksum: Option<&str>) -> DownloadResult<u64> {
        let bytes = release_bytes(url);
        fs::create_dir_all(dest.parent().unwrap()).unwrap();
        fs::write(dest, &bytes).unwrap();
        Ok(bytes.len() as u64)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn manager<'a>(
    device: &'a SimulatedDevice,
    temp: &TempDir,
) -> PackageManager<&'a SimulatedDevice, MetadataCatalog, FakeRelease> {
    let config = ManagerConfig::new(temp.path().join("rpms"))
        .with_upload(UploadConfig::default().with_chunk_size(1024))
        .with_poll_policy(PollPolicy::new(Duration::ZERO, 10));

    PackageManager::new(
        device,
        MetadataCatalog::bundled().unwrap(),
        FakeRelease,
        config,
    )
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_install_then_query_then_uninstall() {
    let temp = TempDir::new().unwrap();
    let device = SimulatedDevice::default();
    let pm = manager(&device, &temp);

    let latest = pm.metadata().resolve("do", &VersionSpec::Latest).unwrap();

    let status = pm.is_installed("do").unwrap();
    assert!(!status.installed);

    let result = pm.install("do", &VersionSpec::Latest).unwrap();
    assert_eq!(result.version, latest.version);
    assert_eq!(device.installed(), vec![latest.package_name.clone()]);

    // The device reassembled exactly what was downloaded.
    assert_eq!(
        device.uploaded(latest.artifact_name()).unwrap(),
        release_bytes(&latest.download_url)
    );
    assert!(!temp.path().join("rpms").join(latest.artifact_name()).exists());

    let status = pm.is_installed("do").unwrap();
    assert!(status.installed);
    assert_eq!(status.installed_version.as_deref(), Some(latest.version.as_str()));
    assert_eq!(status.latest_version, latest.version);
    assert!(!status.is_outdated());

    let removed = pm.uninstall("do", &VersionSpec::Latest).unwrap();
    assert!(removed.warnings.is_empty());
    assert!(device.installed().is_empty());
    assert!(!pm.is_installed("do").unwrap().installed);
}

#[test]
fn test_outdated_install_is_reported() {
    let temp = TempDir::new().unwrap();
    let catalog = MetadataCatalog::bundled().unwrap();
    let old = catalog.package_name("ts", "1.11.0").unwrap();
    let device = SimulatedDevice::with_installed(&[old.as_str()]);
    let pm = manager(&device, &temp);

    let status = pm.is_installed("ts").unwrap();
    assert!(status.installed);
    assert_eq!(status.installed_version.as_deref(), Some("1.11.0"));
    assert!(status.is_outdated());
}

#[test]
fn test_installing_twice_fails_with_device_message() {
    let temp = TempDir::new().unwrap();
    let device = SimulatedDevice::default();
    let pm = manager(&device, &temp);

    pm.install("ts", &VersionSpec::Latest).unwrap();
    let err = pm.install("ts", &VersionSpec::Latest).unwrap_err();

    match err {
        ManagerError::Task(TaskError::Failed { message, .. }) => {
            assert!(message.contains("already installed"), "{}", message);
        }
        other => panic!("expected task failure, got {:?}", other),
    }
}

#[test]
fn test_uninstall_as3_warns_about_fast() {
    let temp = TempDir::new().unwrap();
    let device = SimulatedDevice::default();
    let pm = manager(&device, &temp);

    pm.install("as3", &VersionSpec::Latest).unwrap();
    let result = pm.uninstall("as3", &VersionSpec::Latest).unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].dependent, "fast");
    assert!(result.warnings[0].documentation.starts_with("https://"));
}

#[test]
fn test_uninstall_missing_package_fails() {
    let temp = TempDir::new().unwrap();
    let device = SimulatedDevice::default();
    let pm = manager(&device, &temp);

    let err = pm.uninstall("ts", &VersionSpec::Latest).unwrap_err();
    assert!(matches!(err, ManagerError::Task(TaskError::Failed { .. })));
}

#[test]
fn test_as3_and_fast_together_are_ambiguous_for_as3() {
    let temp = TempDir::new().unwrap();
    let device = SimulatedDevice::default();
    let pm = manager(&device, &temp);

    pm.install("fast", &VersionSpec::Latest).unwrap();
    assert!(pm.is_installed("fast").unwrap().installed);

    pm.install("as3", &VersionSpec::Latest).unwrap();
    assert!(!pm.is_installed("as3").unwrap().installed);
}
