use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::PipelineError;
use crate::vector::{parse_line, SparseVector};

/// Ordered collection of parsed feature vectors.
///
/// Line i of the input (0-indexed) is row/column i of the output matrix.
/// Every line is parsed exactly once at load time; the builder then looks
/// vectors up by row index.
#[derive(Debug, Default)]
pub struct VectorStore {
    vectors: Vec<SparseVector>,
}

impl VectorStore {
    /// Open and parse a feature file.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let file = File::open(path)
            .map_err(|e| PipelineError::InputOpen(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse vectors from any buffered source, one per line.
    ///
    /// Empty lines become empty (zero-norm) vectors; a trailing final newline
    /// contributes no vector.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, PipelineError> {
        let mut vectors = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| PipelineError::InputRead(e.to_string()))?;
            vectors.push(parse_line(&line));
        }
        Ok(Self { vectors })
    }

    /// Number of vectors, which is also the matrix dimension N.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector for matrix row/column `row`.
    pub fn get(&self, row: usize) -> &SparseVector {
        &self.vectors[row]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SparseVector> {
        self.vectors.iter()
    }

    /// Summed entry count across all vectors.
    pub fn total_nonzeros(&self) -> usize {
        self.vectors.iter().map(|v| v.nnz()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_rows_follow_line_order() {
        let store = VectorStore::from_reader(Cursor::new("0:1\n1:2\n2:3\n")).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1).get(1), Some(2.0));
        assert_eq!(store.get(2).get(2), Some(3.0));
    }

    #[test]
    fn test_blank_line_is_a_zero_norm_row() {
        let store = VectorStore::from_reader(Cursor::new("0:1\n\n1:1\n")).unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.get(1).is_empty());
    }

    #[test]
    fn test_trailing_newline_adds_no_row() {
        let store = VectorStore::from_reader(Cursor::new("0:1\n1:1\n")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_total_nonzeros() {
        let store = VectorStore::from_reader(Cursor::new("0:1 1:2\n2:3\n")).unwrap();
        assert_eq!(store.total_nonzeros(), 3);
    }

    #[test]
    fn test_load_missing_file_is_input_open_error() {
        let err = VectorStore::load(Path::new("/nonexistent/pairsim-features.vec")).unwrap_err();
        assert!(matches!(err, PipelineError::InputOpen(_)));
    }
}
