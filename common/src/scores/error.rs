#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    Http(reqwest::Error),
    Status(u16),
    InvalidSubmission(String),
    InvalidUrl(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Serialization(e) => write!(f, "Serialization error: {}", e),
            StoreError::Http(e) => write!(f, "HTTP error: {}", e),
            StoreError::Status(code) => write!(f, "Leaderboard server responded with status {}", code),
            StoreError::InvalidSubmission(reason) => write!(f, "Invalid submission: {}", reason),
            StoreError::InvalidUrl(url) => write!(f, "Invalid leaderboard URL: {}", url),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => StoreError::Status(status.as_u16()),
            None => StoreError::Http(e),
        }
    }
}
