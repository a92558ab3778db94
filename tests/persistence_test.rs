use chirpy::auth::{password, tokens};
use chirpy::db::chirps::SortOrder;
use chirpy::db::Db;
use tempfile::TempDir;

#[test]
fn state_survives_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("database.json");

    {
        let db = Db::open(&path, false).unwrap();
        let user = db.create_user("user@example.com", "hash").unwrap();
        db.create_chirp(user.id, "persisted").unwrap();
        let (token, expires_at) = tokens::generate_refresh_token();
        db.issue_refresh_token(user.id, &token, expires_at).unwrap();
    }

    let db = Db::open(&path, false).unwrap();
    let user = db.get_user_by_email("user@example.com").unwrap();
    assert_eq!(user.id, 1);
    let chirps = db.list_chirps(None, SortOrder::Asc).unwrap();
    assert_eq!(chirps.len(), 1);
    assert_eq!(chirps[0].body, "persisted");
    assert_eq!(db.load().unwrap().refresh_tokens.len(), 1);
}

#[test]
fn on_disk_format_matches_the_documented_shape() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("database.json");

    let db = Db::open(&path, false).unwrap();
    let user = db.create_user("user@example.com", "hash").unwrap();
    db.create_chirp(user.id, "hello").unwrap();
    let (token, expires_at) = tokens::generate_refresh_token();
    db.issue_refresh_token(user.id, &token, expires_at).unwrap();

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();

    let chirp = &raw["chirps"]["1"];
    assert_eq!(chirp["id"], 1);
    assert_eq!(chirp["body"], "hello");
    assert_eq!(chirp["author_id"], 1);

    let user = &raw["users"]["1"];
    assert_eq!(user["email"], "user@example.com");
    assert_eq!(user["password_hash"], "hash");
    assert_eq!(user["is_upgraded"], false);

    let record = &raw["refresh_tokens"][&token];
    assert_eq!(record["user_id"], 1);
    assert_eq!(record["token"], token.as_str());
    // RFC 3339 timestamp
    let stored = record["expires_at"].as_str().unwrap();
    let parsed = chrono::DateTime::parse_from_rfc3339(stored).unwrap();
    assert_eq!(parsed.timestamp(), expires_at.timestamp());
}

#[test]
fn full_login_flow_against_the_library() {
    let tmp = TempDir::new().unwrap();
    let db = Db::open(&tmp.path().join("database.json"), false).unwrap();
    let secret = "integration-secret";

    // signup
    let hash = password::hash_password("hunter2").unwrap();
    let user = db.create_user("user@example.com", &hash).unwrap();

    // login
    let found = db.get_user_by_email("user@example.com").unwrap();
    password::verify_password("hunter2", &found.password_hash).unwrap();
    let session = tokens::issue_session_token(found.id, secret, 0).unwrap();
    let (refresh, expires_at) = tokens::generate_refresh_token();
    db.issue_refresh_token(found.id, &refresh, expires_at).unwrap();

    // the session token proves identity
    assert_eq!(tokens::validate_session_token(&session, secret).unwrap(), user.id);

    // refresh: resolve, rotate, reissue
    let (owner, record) = db.resolve_refresh_token(&refresh).unwrap();
    assert_eq!(owner.id, user.id);
    assert!(record.expires_at > chrono::Utc::now());
    let (rotated, rotated_expiry) = tokens::generate_refresh_token();
    db.issue_refresh_token(owner.id, &rotated, rotated_expiry).unwrap();
    assert!(db.resolve_refresh_token(&refresh).is_err());

    // revoke ends the chain
    db.revoke_refresh_token(&rotated).unwrap();
    assert!(db.resolve_refresh_token(&rotated).is_err());
}
