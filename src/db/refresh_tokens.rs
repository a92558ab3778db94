use chrono::{DateTime, Utc};

use crate::db::models::{RefreshToken, User};
use crate::db::{Db, StoreError, StoreResult};

impl Db {
    /// Record a refresh token for a user, replacing any token the user
    /// already holds. At most one live token exists per user.
    pub fn issue_refresh_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> StoreResult<RefreshToken> {
        self.update(|doc| {
            if !doc.users.contains_key(&user_id) {
                return Err(StoreError::NotFound(format!("user {user_id}")));
            }

            doc.refresh_tokens
                .retain(|_, record| record.user_id != user_id);

            let record = RefreshToken {
                user_id,
                token: token.to_string(),
                expires_at,
            };
            doc.refresh_tokens.insert(token.to_string(), record.clone());
            Ok(record)
        })
    }

    /// Look up a refresh token and join it to its owning user. Expiry is
    /// the caller's concern; expired records are returned, not swept.
    pub fn resolve_refresh_token(&self, token: &str) -> StoreResult<(User, RefreshToken)> {
        self.read(|doc| {
            let record = doc
                .refresh_tokens
                .get(token)
                .cloned()
                .ok_or_else(|| StoreError::NotFound("refresh token".into()))?;
            let user = doc
                .users
                .get(&record.user_id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("user {}", record.user_id)))?;
            Ok((user, record))
        })
    }

    pub fn revoke_refresh_token(&self, token: &str) -> StoreResult<()> {
        self.update(|doc| {
            doc.refresh_tokens
                .remove(token)
                .map(|_| ())
                .ok_or_else(|| StoreError::NotFound("refresh token".into()))
        })
    }
}
