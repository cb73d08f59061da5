pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Invalid talk record (row {row}): {message}")]
    InvalidRecord { row: usize, message: String },

    #[error("The talk data set is empty")]
    EmptyDataset,

    #[error("Unknown tag: {tag}")]
    UnknownTag { tag: String },

    #[error("Unknown occupation path: {path}")]
    UnknownOccupation { path: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Chart error ({chart}): {message}")]
    Chart { chart: String, message: String },
}
