use sqlx::Row;

use crate::db::Database;
use crate::engine::types::PathState;

pub async fn get_path_state(
    db: &Database,
    user_id: &str,
) -> Result<Option<PathState>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT "state" FROM "learning_paths"
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db.pool())
    .await?;

    row.map(|r| {
        let value: serde_json::Value = r.try_get("state")?;
        serde_json::from_value(value).map_err(|e| sqlx::Error::Decode(Box::new(e)))
    })
    .transpose()
}

pub async fn upsert_path_state(db: &Database, path: &PathState) -> Result<(), sqlx::Error> {
    let value = serde_json::to_value(path).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    sqlx::query(
        r#"
        INSERT INTO "learning_paths" ("userId", "state", "updatedAt")
        VALUES ($1, $2, NOW())
        ON CONFLICT ("userId")
        DO UPDATE SET "state" = EXCLUDED."state", "updatedAt" = NOW()
        "#,
    )
    .bind(&path.user_id)
    .bind(value)
    .execute(db.pool())
    .await?;

    Ok(())
}
