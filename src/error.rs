use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to open feature file: {0}")]
    InputOpen(String),

    #[error("Failed to read feature file: {0}")]
    InputRead(String),

    #[error("Failed to write similarity matrix: {0}")]
    OutputWrite(String),

    #[error("Failed to write run report: {0}")]
    ReportWrite(String),
}
