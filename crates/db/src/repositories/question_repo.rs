//! Repository for the `questions` table.

use sqlx::PgPool;
use traitmatch_core::question::Question;

use crate::models::question::QuestionRow;

const COLUMNS: &str = "id, question, trait, options, created_at";

/// Read access to the question bank plus bulk replacement for seeding.
pub struct QuestionRepo;

impl QuestionRepo {
    /// List questions ordered by id, optionally truncated to `limit`.
    pub async fn list(pool: &PgPool, limit: Option<i64>) -> Result<Vec<QuestionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions ORDER BY id ASC LIMIT $1");
        sqlx::query_as::<_, QuestionRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Replace the whole bank in one transaction. Returns the number of
    /// questions inserted.
    pub async fn replace_all(pool: &PgPool, questions: &[Question]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM questions").execute(&mut *tx).await?;

        let mut inserted = 0;
        for question in questions {
            let options = serde_json::to_value(&question.options)
                .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            sqlx::query(
                "INSERT INTO questions (id, question, trait, options) VALUES ($1, $2, $3, $4)",
            )
            .bind(question.id)
            .bind(&question.prompt)
            .bind(question.dimension.name())
            .bind(options)
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
            .fetch_one(pool)
            .await
    }
}
