use crate::db::models::{next_id, User};
use crate::db::{Db, StoreError, StoreResult};

impl Db {
    /// Create a user. Emails are unique (case-sensitive) across all users.
    pub fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<User> {
        self.update(|doc| {
            if doc.users.values().any(|user| user.email == email) {
                return Err(StoreError::AlreadyExists(format!("email {email}")));
            }

            let user = User {
                id: next_id(&doc.users),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                is_upgraded: false,
            };
            doc.users.insert(user.id, user.clone());
            Ok(user)
        })
    }

    pub fn get_user(&self, id: i64) -> StoreResult<User> {
        self.read(|doc| {
            doc.users
                .get(&id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("user {id}")))
        })
    }

    /// Linear scan over the full collection; only concludes not-found after
    /// every user has been checked.
    pub fn get_user_by_email(&self, email: &str) -> StoreResult<User> {
        self.read(|doc| {
            doc.users
                .values()
                .find(|user| user.email == email)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("email {email}")))
        })
    }

    /// Replace a user's email and password hash. The new email must not
    /// collide with any other user's.
    pub fn update_credentials(
        &self,
        id: i64,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<User> {
        self.update(|doc| {
            let taken = doc
                .users
                .values()
                .any(|user| user.id != id && user.email == email);
            if taken {
                return Err(StoreError::AlreadyExists(format!("email {email}")));
            }

            let user = doc
                .users
                .get_mut(&id)
                .ok_or_else(|| StoreError::NotFound(format!("user {id}")))?;
            user.email = email.to_string();
            user.password_hash = password_hash.to_string();
            Ok(user.clone())
        })
    }

    /// Set the upgrade flag. Idempotent.
    pub fn upgrade_user(&self, id: i64) -> StoreResult<User> {
        self.update(|doc| {
            let user = doc
                .users
                .get_mut(&id)
                .ok_or_else(|| StoreError::NotFound(format!("user {id}")))?;
            user.is_upgraded = true;
            Ok(user.clone())
        })
    }
}
