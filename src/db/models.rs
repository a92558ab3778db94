use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post. Bodies are capped at 140 characters by the API layer
/// before they reach the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: i64,
    pub body: String,
    pub author_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub is_upgraded: bool,
}

/// A long-lived opaque credential exchanged for fresh session tokens.
/// Keyed by its own token string in the document; at most one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// The entire persisted state. Serialized as one JSON object with exactly
/// three top-level keys; integer map keys become JSON object keys as
/// decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub chirps: BTreeMap<i64, Chirp>,
    #[serde(default)]
    pub users: BTreeMap<i64, User>,
    #[serde(default)]
    pub refresh_tokens: BTreeMap<String, RefreshToken>,
}

/// Next primary key for an integer-keyed collection: one past the current
/// maximum, starting at 1. Unique only because every allocation happens
/// inside an exclusive store transaction.
pub(crate) fn next_id<V>(map: &BTreeMap<i64, V>) -> i64 {
    map.keys().next_back().copied().unwrap_or(0) + 1
}
