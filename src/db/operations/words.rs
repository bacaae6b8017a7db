use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::db::operations::{format_timestamp, parse_timestamp};
use crate::db::Database;
use crate::word::{FormPair, UserId, Word, WordEntry, WordId, WordKind};

/// Inserts a word for `user_id` and returns the store-assigned id.
pub async fn add_word(
    db: &Database,
    user_id: UserId,
    entry: &WordEntry,
) -> Result<WordId, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO words (user_id, kind, term1, term2, form_pair, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(user_id)
    .bind(entry.kind().as_str())
    .bind(entry.first_term())
    .bind(entry.second_term())
    .bind(entry.form_pair().map(|pair| pair.as_str()))
    .bind(format_timestamp(Utc::now()))
    .execute(db.pool())
    .await?;

    Ok(result.last_insert_rowid())
}

/// All words of a user, oldest first, optionally restricted to one kind.
pub async fn list_words(
    db: &Database,
    user_id: UserId,
    kind: Option<WordKind>,
) -> Result<Vec<Word>, sqlx::Error> {
    let rows = match kind {
        Some(kind) => {
            sqlx::query(
                "SELECT id, user_id, kind, term1, term2, form_pair, created_at FROM words \
                 WHERE user_id = $1 AND kind = $2 ORDER BY created_at ASC, id ASC",
            )
            .bind(user_id)
            .bind(kind.as_str())
            .fetch_all(db.pool())
            .await?
        }
        None => {
            sqlx::query(
                "SELECT id, user_id, kind, term1, term2, form_pair, created_at FROM words \
                 WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
            )
            .bind(user_id)
            .fetch_all(db.pool())
            .await?
        }
    };

    rows.iter().map(word_from_row).collect()
}

/// The most recently added words, newest first, capped at `limit`.
pub async fn list_recent(
    db: &Database,
    user_id: UserId,
    limit: i64,
    kind: Option<WordKind>,
) -> Result<Vec<Word>, sqlx::Error> {
    let rows = match kind {
        Some(kind) => {
            sqlx::query(
                "SELECT id, user_id, kind, term1, term2, form_pair, created_at FROM words \
                 WHERE user_id = $1 AND kind = $2 ORDER BY created_at DESC, id DESC LIMIT $3",
            )
            .bind(user_id)
            .bind(kind.as_str())
            .bind(limit)
            .fetch_all(db.pool())
            .await?
        }
        None => {
            sqlx::query(
                "SELECT id, user_id, kind, term1, term2, form_pair, created_at FROM words \
                 WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
            )
            .bind(user_id)
            .bind(limit)
            .fetch_all(db.pool())
            .await?
        }
    };

    rows.iter().map(word_from_row).collect()
}

pub async fn count_words(
    db: &Database,
    user_id: UserId,
    kind: Option<WordKind>,
) -> Result<i64, sqlx::Error> {
    match kind {
        Some(kind) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM words WHERE user_id = $1 AND kind = $2")
                .bind(user_id)
                .bind(kind.as_str())
                .fetch_one(db.pool())
                .await
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM words WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(db.pool())
                .await
        }
    }
}

/// One page of a user's words, newest first.
pub async fn list_page(
    db: &Database,
    user_id: UserId,
    offset: i64,
    limit: i64,
) -> Result<Vec<Word>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, user_id, kind, term1, term2, form_pair, created_at FROM words \
         WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db.pool())
    .await?;

    rows.iter().map(word_from_row).collect()
}

/// Deletes `word_id` iff it belongs to `user_id`; ownership check and removal
/// are one statement. Returns whether a row was removed.
pub async fn delete_word(
    db: &Database,
    user_id: UserId,
    word_id: WordId,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM words WHERE id = $1 AND user_id = $2")
        .bind(word_id)
        .bind(user_id)
        .execute(db.pool())
        .await?;

    Ok(result.rows_affected() > 0)
}

fn word_from_row(row: &SqliteRow) -> Result<Word, sqlx::Error> {
    let kind_raw: String = row.try_get("kind")?;
    let kind = WordKind::parse(&kind_raw).ok_or_else(|| sqlx::Error::ColumnDecode {
        index: "kind".to_string(),
        source: format!("unknown word kind {kind_raw:?}").into(),
    })?;

    let term1: String = row.try_get("term1")?;
    let term2: String = row.try_get("term2")?;

    let entry = match kind {
        WordKind::Translation => WordEntry::Translation {
            source: term1,
            target: term2,
        },
        WordKind::IrregularVerb => {
            let pair_raw: Option<String> = row.try_get("form_pair")?;
            let pair = pair_raw
                .as_deref()
                .and_then(FormPair::parse)
                .ok_or_else(|| sqlx::Error::ColumnDecode {
                    index: "form_pair".to_string(),
                    source: format!("invalid form pair {pair_raw:?} for irregular verb").into(),
                })?;
            WordEntry::IrregularVerb {
                pair,
                from_form: term1,
                to_form: term2,
            }
        }
    };

    let created_raw: String = row.try_get("created_at")?;

    Ok(Word {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        entry,
        created_at: parse_timestamp("created_at", &created_raw)?,
    })
}
