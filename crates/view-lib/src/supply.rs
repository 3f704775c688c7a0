//! Record file supplier
//!
//! Reads a JSON array of node records, as exported by the farm manager,
//! and checks each record before it can reach a table model.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::{NodeRecord, RecordError};

#[derive(Debug, Error)]
pub enum SupplyError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed node records: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("record {index} ({name}) is invalid: {source}")]
    InvalidRecord {
        index: usize,
        name: String,
        #[source]
        source: RecordError,
    },
}

/// Load and validate the records stored at `path`
pub fn load_records(path: &Path) -> Result<Vec<NodeRecord>, SupplyError> {
    let content = std::fs::read_to_string(path).map_err(|source| SupplyError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&content)?;
    debug!(path = %path.display(), count = records.len(), "Loaded record file");
    Ok(records)
}

/// Decode a JSON array of records, rejecting the batch at the first invalid record
pub fn parse_records(json: &str) -> Result<Vec<NodeRecord>, SupplyError> {
    let records: Vec<NodeRecord> = serde_json::from_str(json)?;
    validate_batch(&records)?;
    Ok(records)
}

pub fn validate_batch(records: &[NodeRecord]) -> Result<(), SupplyError> {
    for (index, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|source| SupplyError::InvalidRecord {
                index,
                name: record.name.clone(),
                source,
            })?;
    }
    Ok(())
}

/// Write `records` to `path` as pretty-printed JSON
pub fn save_records(path: &Path, records: &[NodeRecord]) -> Result<(), SupplyError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).map_err(|source| SupplyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FleetFixture;
    use crate::models::NodeState;
    use tempfile::TempDir;

    const ONE_NODE: &str = r#"[
        {
            "name": "render-01",
            "clusterName": "General",
            "state": "DOWN",
            "lockState": "LOCKED",
            "totalCores": 4,
            "idleCores": 1,
            "bootTime": 1700000000,
            "platform": "Linux",
            "cpuModel": "Xeon 3.0Ghz",
            "totalRamMb": 8192,
            "freeRamMb": 2048,
            "totalSwapMb": 4096,
            "freeSwapMb": 4096
        }
    ]"#;

    #[test]
    fn test_parse_records() {
        let records = parse_records(ONE_NODE).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].state, NodeState::Down);
        assert_eq!(records[0].idle_cores, 1);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_state_rejected() {
        let json = ONE_NODE.replace("\"DOWN\"", "\"SLEEPING\"");
        assert!(matches!(parse_records(&json), Err(SupplyError::Decode(_))));
    }

    #[test]
    fn test_invariant_violation_reports_index() {
        let json = ONE_NODE.replace("\"idleCores\": 1", "\"idleCores\": 5");
        match parse_records(&json) {
            Err(SupplyError::InvalidRecord { index, name, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(name, "render-01");
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nodes.json");
        let records = FleetFixture::new().generate_seeded(20, 3);

        save_records(&path, &records).unwrap();
        assert_eq!(load_records(&path).unwrap(), records);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_records(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SupplyError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
