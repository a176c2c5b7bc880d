use sqlx::Row;

use crate::catalog::{ContentItem, ContentKind};
use crate::db::Database;

pub async fn get_all_lessons(db: &Database) -> Result<Vec<ContentItem>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT "id", "title", "difficulty", "topics"
        FROM "lessons"
        ORDER BY "position", "id"
        "#,
    )
    .fetch_all(db.pool())
    .await?;

    rows.iter()
        .map(|row| row_to_item(row, ContentKind::Lesson, None))
        .collect()
}

pub async fn get_all_quizzes(db: &Database) -> Result<Vec<ContentItem>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT "id", "lessonId", "title", "difficulty", "topics"
        FROM "quizzes"
        ORDER BY "position", "id"
        "#,
    )
    .fetch_all(db.pool())
    .await?;

    rows.iter()
        .map(|row| {
            let lesson_id: Option<String> = row.try_get("lessonId")?;
            row_to_item(row, ContentKind::Quiz, lesson_id)
        })
        .collect()
}

pub async fn get_content_item(
    db: &Database,
    content_id: &str,
    kind: ContentKind,
) -> Result<Option<ContentItem>, sqlx::Error> {
    match kind {
        ContentKind::Lesson => {
            let row = sqlx::query(
                r#"
                SELECT "id", "title", "difficulty", "topics"
                FROM "lessons"
                WHERE "id" = $1
                "#,
            )
            .bind(content_id)
            .fetch_optional(db.pool())
            .await?;

            row.map(|r| row_to_item(&r, ContentKind::Lesson, None))
                .transpose()
        }
        ContentKind::Quiz => {
            let row = sqlx::query(
                r#"
                SELECT "id", "lessonId", "title", "difficulty", "topics"
                FROM "quizzes"
                WHERE "id" = $1
                "#,
            )
            .bind(content_id)
            .fetch_optional(db.pool())
            .await?;

            row.map(|r| {
                let lesson_id: Option<String> = r.try_get("lessonId")?;
                row_to_item(&r, ContentKind::Quiz, lesson_id)
            })
            .transpose()
        }
    }
}

fn row_to_item(
    row: &sqlx::postgres::PgRow,
    kind: ContentKind,
    lesson_id: Option<String>,
) -> Result<ContentItem, sqlx::Error> {
    let topics_json: serde_json::Value = row.try_get("topics")?;
    let topics: Vec<String> =
        serde_json::from_value(topics_json).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(ContentItem {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        kind,
        difficulty: row.try_get("difficulty")?,
        topics,
        lesson_id,
    })
}
