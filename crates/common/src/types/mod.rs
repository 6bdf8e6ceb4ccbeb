use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// JSON envelope returned with every non-2xx response.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: Option<String>) -> Self {
        Self { error: error.into(), message }
    }
}
