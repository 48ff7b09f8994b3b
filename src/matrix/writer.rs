use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::types::SimilarityMatrix;
use crate::error::PipelineError;

/// Write the matrix as N lines of N tab-separated values, no trailing tab,
/// each line newline-terminated. Values use the default `f64` formatting, so
/// non-finite cells appear as `NaN`/`inf` tokens.
pub fn write_matrix<W: Write>(matrix: &SimilarityMatrix, out: &mut W) -> io::Result<()> {
    for row in 0..matrix.size() {
        for (col, value) in matrix.row(row).iter().enumerate() {
            if col > 0 {
                out.write_all(b"\t")?;
            }
            write!(out, "{}", value)?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Create `path` and write the matrix to it.
///
/// The file is only created here, after the matrix is fully materialized, so
/// an earlier failure leaves no partial output behind.
pub fn write_matrix_to_path(matrix: &SimilarityMatrix, path: &Path) -> Result<(), PipelineError> {
    let file = File::create(path)
        .map_err(|e| PipelineError::OutputWrite(format!("{}: {}", path.display(), e)))?;
    let mut out = BufWriter::new(file);
    write_matrix(matrix, &mut out)
        .map_err(|e| PipelineError::OutputWrite(format!("{}: {}", path.display(), e)))
}
