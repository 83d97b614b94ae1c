use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read contact file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse contact file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Contact file {} has no '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Invalid client URL: {0}")]
    ClientUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
