use sqlx::SqlitePool;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

pub(crate) async fn apply(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in split_statements(SCHEMA_SQL) {
        sqlx::query(&statement).execute(pool).await?;
    }
    Ok(())
}

/// The schema contains no string literals, so splitting on `;` and dropping
/// comment lines is sufficient.
fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|chunk| {
            chunk
                .lines()
                .filter(|line| !line.trim_start().starts_with("--"))
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        })
        .filter(|statement| !statement.is_empty())
        .collect()
}
