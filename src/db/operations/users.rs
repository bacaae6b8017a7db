use chrono::Utc;

use crate::db::operations::format_timestamp;
use crate::db::Database;
use crate::word::UserId;

/// Registers a user on first contact. Returns `true` for a new user, `false`
/// (with no mutation) when the id is already present. A single
/// `INSERT OR IGNORE` keeps the check and the insert atomic.
pub async fn register_user(
    db: &Database,
    user_id: UserId,
    display_name: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO users (id, display_name, created_at) VALUES ($1, $2, $3)",
    )
    .bind(user_id)
    .bind(display_name)
    .bind(format_timestamp(Utc::now()))
    .execute(db.pool())
    .await?;

    Ok(result.rows_affected() == 1)
}
