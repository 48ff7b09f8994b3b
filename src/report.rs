use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::PipelineError;

/// JSON sidecar summarizing one run, written next to the matrix on request.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub generator: String,
    pub created_at: String,
    pub feature_file: String,
    /// Hex SHA-256 of the feature file, for reproducibility checks.
    pub feature_sha256: String,
    pub output_file: String,
    pub stats: RunStats,
    pub timings_ms: PhaseTimings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunStats {
    pub vector_count: usize,
    pub nonzero_entries: usize,
    pub matrix_cells: usize,
    /// N·(N+1)/2 — one kernel invocation per unordered pair.
    pub kernel_invocations: usize,
    /// Cells left NaN/infinite by zero-norm vectors (0 under --clamp-degenerate).
    pub non_finite_cells: usize,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct PhaseTimings {
    pub load: f64,
    pub compute: f64,
    pub write: f64,
}

impl RunReport {
    pub fn new(
        feature_file: String,
        feature_sha256: String,
        output_file: String,
        stats: RunStats,
        timings_ms: PhaseTimings,
    ) -> Self {
        Self {
            generator: format!("pairsim v{}", env!("CARGO_PKG_VERSION")),
            created_at: Utc::now().to_rfc3339(),
            feature_file,
            feature_sha256,
            output_file,
            stats,
            timings_ms,
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_to_file(&self, path: &Path) -> Result<(), PipelineError> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::ReportWrite(e.to_string()))?;
        json.push('\n');
        fs::write(path, json)
            .map_err(|e| PipelineError::ReportWrite(format!("{}: {}", path.display(), e)))
    }
}

/// Hex-encoded SHA-256 of a file's contents, streamed in chunks.
pub fn sha256_file(path: &Path) -> Result<String, PipelineError> {
    let file = File::open(path)
        .map_err(|e| PipelineError::InputOpen(format!("{}: {}", path.display(), e)))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader
            .read(&mut buf)
            .map_err(|e| PipelineError::InputRead(e.to_string()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> RunReport {
        RunReport::new(
            "features.vec".to_string(),
            "00".repeat(32),
            "matrix.tsv".to_string(),
            RunStats {
                vector_count: 3,
                nonzero_entries: 7,
                matrix_cells: 9,
                kernel_invocations: 6,
                non_finite_cells: 0,
            },
            PhaseTimings::default(),
        )
    }

    #[test]
    fn test_report_serializes_documented_fields() {
        let json = serde_json::to_string_pretty(&sample_report()).unwrap();
        for field in [
            "generator",
            "created_at",
            "feature_sha256",
            "vector_count",
            "kernel_invocations",
            "timings_ms",
        ] {
            assert!(json.contains(field), "missing field {}", field);
        }
    }

    #[test]
    fn test_sha256_of_known_content() {
        let path = std::env::temp_dir().join(format!("pairsim-digest-{}.tmp", std::process::id()));
        fs::write(&path, b"abc").unwrap();
        let digest = sha256_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
