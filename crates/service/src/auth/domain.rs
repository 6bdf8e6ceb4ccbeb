use serde::{Deserialize, Serialize};

/// JWT payload carried by bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

/// Caller resolved from a bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
}

/// Persisted session (business view)
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedSession {
    pub user_id: i32,
    pub token: String,
}
