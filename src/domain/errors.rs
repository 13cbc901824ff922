#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    InvalidScore(u8),
    UnknownProduct(String),
    IndexOutOfRange(usize),
    MissingField(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidScore(score) => {
                write!(f, "Invalid review score: {} (must be 1-5)", score)
            }
            DomainError::UnknownProduct(id) => {
                write!(f, "Unknown product: {}", id)
            }
            DomainError::IndexOutOfRange(index) => {
                write!(f, "Catalog index out of range: {}", index)
            }
            DomainError::MissingField(msg) => {
                write!(f, "{}", msg)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure reported by the email relay. Transient from the user's point of
/// view: the order draft is kept so the send can be retried as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayError {
    Transport(String),
    Status(u16, String),
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::Transport(msg) => {
                write!(f, "Could not reach the email service: {}", msg)
            }
            RelayError::Status(code, body) => {
                write!(f, "Email service rejected the order ({}): {}", code, body)
            }
        }
    }
}

impl std::error::Error for RelayError {}
