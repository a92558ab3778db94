use crate::db::models::{next_id, Chirp};
use crate::db::{Db, StoreError, StoreResult};

/// Listing order for chirps. Callers always get a deterministic order;
/// ascending by id is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl Db {
    /// Create a chirp with the next free id. The author must exist.
    pub fn create_chirp(&self, author_id: i64, body: &str) -> StoreResult<Chirp> {
        self.update(|doc| {
            if !doc.users.contains_key(&author_id) {
                return Err(StoreError::NotFound(format!("user {author_id}")));
            }

            let chirp = Chirp {
                id: next_id(&doc.chirps),
                body: body.to_string(),
                author_id,
            };
            doc.chirps.insert(chirp.id, chirp.clone());
            Ok(chirp)
        })
    }

    /// List chirps, optionally filtered by author, ordered by id.
    pub fn list_chirps(&self, author_id: Option<i64>, order: SortOrder) -> StoreResult<Vec<Chirp>> {
        self.read(|doc| {
            let mut chirps: Vec<Chirp> = doc
                .chirps
                .values()
                .filter(|chirp| author_id.is_none_or(|id| chirp.author_id == id))
                .cloned()
                .collect();
            if order == SortOrder::Desc {
                chirps.reverse();
            }
            Ok(chirps)
        })
    }

    pub fn get_chirp(&self, id: i64) -> StoreResult<Chirp> {
        self.read(|doc| {
            doc.chirps
                .get(&id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(format!("chirp {id}")))
        })
    }

    /// Delete by id. Author-level authorization is the caller's job; the
    /// repository deletes unconditionally.
    pub fn delete_chirp(&self, id: i64) -> StoreResult<()> {
        self.update(|doc| {
            doc.chirps
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| StoreError::NotFound(format!("chirp {id}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn db_with_users(n: i64) -> (TempDir, Db) {
        let tmp = TempDir::new().unwrap();
        let db = Db::open(&tmp.path().join("database.json"), false).unwrap();
        for i in 0..n {
            db.create_user(&format!("user{i}@example.com", i = i), "hash")
                .unwrap();
        }
        (tmp, db)
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let (_tmp, db) = db_with_users(1);
        for expected in 1..=5 {
            let chirp = db.create_chirp(1, "hello").unwrap();
            assert_eq!(chirp.id, expected);
        }
    }

    #[test]
    fn create_rejects_unknown_author() {
        let (_tmp, db) = db_with_users(1);
        let err = db.create_chirp(99, "ghost writer");
        assert!(matches!(err, Err(StoreError::NotFound(_))));
        assert!(db.list_chirps(None, SortOrder::Asc).unwrap().is_empty());
    }

    #[test]
    fn list_is_ascending_by_default() {
        let (_tmp, db) = db_with_users(1);
        for body in ["first", "second", "third"] {
            db.create_chirp(1, body).unwrap();
        }
        let ids: Vec<i64> = db
            .list_chirps(None, SortOrder::Asc)
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn list_descending_reverses() {
        let (_tmp, db) = db_with_users(1);
        for _ in 0..3 {
            db.create_chirp(1, "x").unwrap();
        }
        let ids: Vec<i64> = db
            .list_chirps(None, SortOrder::Desc)
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn list_filters_by_author() {
        let (_tmp, db) = db_with_users(2);
        db.create_chirp(1, "mine").unwrap();
        db.create_chirp(2, "theirs").unwrap();
        db.create_chirp(1, "also mine").unwrap();

        let chirps = db.list_chirps(Some(1), SortOrder::Asc).unwrap();
        assert_eq!(chirps.len(), 2);
        assert!(chirps.iter().all(|c| c.author_id == 1));
    }

    #[test]
    fn get_missing_chirp_is_not_found() {
        let (_tmp, db) = db_with_users(1);
        assert!(matches!(db.get_chirp(1), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn delete_removes_and_then_fails() {
        let (_tmp, db) = db_with_users(1);
        let chirp = db.create_chirp(1, "short lived").unwrap();
        db.delete_chirp(chirp.id).unwrap();
        assert!(matches!(
            db.delete_chirp(chirp.id),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn id_reuses_gap_after_max_deleted() {
        let (_tmp, db) = db_with_users(1);
        db.create_chirp(1, "one").unwrap();
        let two = db.create_chirp(1, "two").unwrap();
        db.delete_chirp(two.id).unwrap();
        // max+1 allocation: deleting the max frees its id
        assert_eq!(db.create_chirp(1, "two again").unwrap().id, 2);
    }
}
