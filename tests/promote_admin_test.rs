use std::path::Path;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, Row, SqliteConnection};
use tempfile::TempDir;

use scoreprobe::services::{promote_to_admin, PromoteOutcome};

const SEEDED_PHONE: &str = "13800138000";
const OTHER_PHONE: &str = "13900139000";

async fn seed_user_store(path: &Path) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await.unwrap();

    sqlx::query(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            phone TEXT NOT NULL UNIQUE,
            nickname TEXT NOT NULL,
            password TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user'
        )",
    )
    .execute(&mut conn)
    .await
    .unwrap();

    for phone in [SEEDED_PHONE, OTHER_PHONE] {
        sqlx::query("INSERT INTO users (phone, nickname, password) VALUES (?, ?, ?)")
            .bind(phone)
            .bind("Test User")
            .bind("secret")
            .execute(&mut conn)
            .await
            .unwrap();
    }

    conn.close().await.unwrap();
}

async fn role_of(path: &Path, phone: &str) -> String {
    let options = SqliteConnectOptions::new().filename(path);
    let mut conn = SqliteConnection::connect_with(&options).await.unwrap();
    let row = sqlx::query("SELECT role FROM users WHERE phone = ?")
        .bind(phone)
        .fetch_one(&mut conn)
        .await
        .unwrap();
    let role: String = row.get("role");
    conn.close().await.unwrap();
    role
}

#[tokio::test]
async fn test_promote_existing_user_sets_admin_role() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("database.db");
    seed_user_store(&db).await;

    let outcome = promote_to_admin(db.to_str().unwrap(), SEEDED_PHONE)
        .await
        .unwrap();

    assert_eq!(outcome, PromoteOutcome::Promoted);
    assert_eq!(role_of(&db, SEEDED_PHONE).await, "admin");
    // only the matching row changed
    assert_eq!(role_of(&db, OTHER_PHONE).await, "user");
}

#[tokio::test]
async fn test_promote_unknown_phone_is_not_found() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("database.db");
    seed_user_store(&db).await;

    let outcome = promote_to_admin(db.to_str().unwrap(), "10000000000")
        .await
        .unwrap();

    assert_eq!(outcome, PromoteOutcome::UserNotFound);
    assert_eq!(role_of(&db, SEEDED_PHONE).await, "user");
}

#[tokio::test]
async fn test_promote_twice_still_reports_promoted() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("database.db");
    seed_user_store(&db).await;

    let db_path = db.to_str().unwrap();
    assert_eq!(
        promote_to_admin(db_path, SEEDED_PHONE).await.unwrap(),
        PromoteOutcome::Promoted
    );
    assert_eq!(
        promote_to_admin(db_path, SEEDED_PHONE).await.unwrap(),
        PromoteOutcome::Promoted
    );
    assert_eq!(role_of(&db, SEEDED_PHONE).await, "admin");
}

#[tokio::test]
async fn test_missing_store_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no-such-file.db");

    let result = promote_to_admin(missing.to_str().unwrap(), SEEDED_PHONE).await;
    assert!(result.is_err());
}
