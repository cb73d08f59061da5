#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("circle radius must be finite and non-negative, got {radius}")]
    InvalidRadius { radius: f64 },
    #[error("failed to compute an enclosing circle for {circles} circles")]
    EnclosureFailed { circles: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
