use sqlx::Row;

use crate::db::Database;
use crate::engine::types::PerformanceProfile;

pub async fn get_profile(
    db: &Database,
    user_id: &str,
) -> Result<Option<PerformanceProfile>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT "profile" FROM "performance_profiles"
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db.pool())
    .await?;

    row.map(|r| {
        let value: serde_json::Value = r.try_get("profile")?;
        serde_json::from_value(value).map_err(|e| sqlx::Error::Decode(Box::new(e)))
    })
    .transpose()
}

/// Whole-aggregate replace; field-level patching would break the
/// averages-match-history invariant on concurrent retries.
pub async fn upsert_profile(
    db: &Database,
    user_id: &str,
    profile: &PerformanceProfile,
) -> Result<(), sqlx::Error> {
    let value = serde_json::to_value(profile).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    sqlx::query(
        r#"
        INSERT INTO "performance_profiles" ("userId", "profile", "updatedAt")
        VALUES ($1, $2, NOW())
        ON CONFLICT ("userId")
        DO UPDATE SET "profile" = EXCLUDED."profile", "updatedAt" = NOW()
        "#,
    )
    .bind(user_id)
    .bind(value)
    .execute(db.pool())
    .await?;

    Ok(())
}
