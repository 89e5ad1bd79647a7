use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};

use crate::error::AppResult;

/// Outcome of a promotion attempt. "Not found" is a result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoteOutcome {
    Promoted,
    UserNotFound,
}

/// Set a user's role to administrator by phone number, directly in the
/// backend's SQLite user store.
///
/// Shared by the promote-admin binary and the harness's admin scenario so
/// there is exactly one copy of the mutation. Single attempt: the connection
/// is opened, the one conditional update runs, and the connection is closed.
pub async fn promote_to_admin(db_path: &str, phone: &str) -> AppResult<PromoteOutcome> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(false);

    let mut conn = SqliteConnection::connect_with(&options).await?;

    let result = sqlx::query("UPDATE users SET role = 'admin' WHERE phone = ?")
        .bind(phone)
        .execute(&mut conn)
        .await?;

    conn.close().await?;

    if result.rows_affected() == 0 {
        Ok(PromoteOutcome::UserNotFound)
    } else {
        Ok(PromoteOutcome::Promoted)
    }
}
