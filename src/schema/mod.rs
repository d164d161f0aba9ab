use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::BuildError;
use crate::models::Device;

pub const SCHEMA_EXTENSION: &str = "json";

/// Path of the schema artifact for a device name
pub fn schema_path(dir: &Path, device_name: &str) -> PathBuf {
    dir.join(format!("{}.{}", device_name, SCHEMA_EXTENSION))
}

/// Write the schema artifact for one enriched device: `<dir>/<name>.json`,
/// pretty-printed with deterministic field and key order, so re-running with
/// unchanged input produces a byte-identical file. Overwrites any prior
/// artifact of the same name.
pub fn write_schema(device: &Device, dir: &Path) -> Result<PathBuf, BuildError> {
    let path = schema_path(dir, &device.name);
    let mut json = serde_json::to_string_pretty(device).map_err(|source| BuildError::Schema {
        device: device.name.clone(),
        source,
    })?;
    json.push('\n');

    fs::write(&path, json).map_err(|source| BuildError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::debug!("Wrote schema {}", path.display());
    Ok(path)
}

/// Discover every schema artifact under a directory, sorted by file name.
/// Picks up whatever `.json` files are present, including ones left behind
/// by earlier runs; callers own the hygiene of the schema directory.
pub fn discover_schemas(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let entries = fs::read_dir(dir).map_err(|source| BuildError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BuildError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(SCHEMA_EXTENSION) {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Read a schema artifact back into a Device
pub fn read_schema(path: &Path) -> Result<Device, BuildError> {
    let text = fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let device_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("<unknown>")
        .to_string();

    serde_json::from_str(&text).map_err(|source| BuildError::Schema {
        device: device_name,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::device::DeviceRecord;
    use pretty_assertions::assert_eq;

    fn sample_device() -> Device {
        let record: DeviceRecord = serde_yaml::from_str(
            r#"
name: R2
serial: BX110
model: MX10008
platform: juniper
mgmt: 10.0.0.2/31
role: leaf
interfaces:
  - name: et-0/0/0
    ipv4: 192.168.1.5/31
    description: core_link
"#,
        )
        .unwrap();
        Device::from_record(record).unwrap()
    }

    #[test]
    fn writing_twice_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let device = sample_device();

        let path = write_schema(&device, dir.path()).unwrap();
        let first = fs::read(&path).unwrap();
        write_schema(&device, dir.path()).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn artifact_is_named_after_the_device() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_schema(&sample_device(), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "R2.json");
    }

    #[test]
    fn schema_round_trips_through_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let device = sample_device();

        let path = write_schema(&device, dir.path()).unwrap();
        let rehydrated = read_schema(&path).unwrap();

        assert_eq!(rehydrated, device);
    }

    #[test]
    fn discovery_finds_only_schema_artifacts_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut b = sample_device();
        b.name = "B1".to_string();
        let mut a = sample_device();
        a.name = "A1".to_string();

        write_schema(&b, dir.path()).unwrap();
        write_schema(&a, dir.path()).unwrap();
        fs::write(dir.path().join("README.txt"), "not a schema").unwrap();

        let found = discover_schemas(dir.path()).unwrap();
        let names: Vec<&str> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["A1.json", "B1.json"]);
    }

    #[test]
    fn unreadable_artifact_surfaces_an_io_error() {
        let err = read_schema(Path::new("/nonexistent/R9.json")).unwrap_err();
        assert!(matches!(err, BuildError::Io { .. }));
    }
}
