//! Error types for hrgate

/// The main error type for hrgate operations
#[derive(Debug, Clone)]
pub struct HrgateError(pub String);

impl std::fmt::Display for HrgateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for HrgateError {}

/// Result type alias for hrgate operations
pub type Result<T> = std::result::Result<T, HrgateError>;

/// Convert any error to HrgateError
pub fn err<E: std::error::Error>(e: E) -> HrgateError {
    HrgateError(e.to_string())
}
