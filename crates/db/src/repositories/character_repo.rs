//! Repository for the `characters` table.

use sqlx::PgPool;
use traitmatch_core::matching::Character;

use crate::models::character::CharacterRow;

const COLUMNS: &str = "id, name, alias, universe, series, image_url, bio, traits, created_at";

/// Read access to the character catalog plus bulk replacement for seeding.
pub struct CharacterRepo;

impl CharacterRepo {
    /// List characters ordered by name, optionally filtered to one universe.
    pub async fn list(
        pool: &PgPool,
        universe: Option<&str>,
        limit: i64,
    ) -> Result<Vec<CharacterRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE ($1::TEXT IS NULL OR universe = $1)
             ORDER BY name ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, CharacterRow>(&query)
            .bind(universe)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Every character in any of `universes`, ordered by name.
    pub async fn list_in_universes(
        pool: &PgPool,
        universes: &[String],
    ) -> Result<Vec<CharacterRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE universe = ANY($1)
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, CharacterRow>(&query)
            .bind(universes)
            .fetch_all(pool)
            .await
    }

    /// Distinct universe names, alphabetically.
    pub async fn universes(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT universe FROM characters ORDER BY universe")
            .fetch_all(pool)
            .await
    }

    /// Replace the whole catalog in one transaction. Returns the number of
    /// characters inserted.
    pub async fn replace_all(pool: &PgPool, characters: &[Character]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM characters").execute(&mut *tx).await?;

        let mut inserted = 0;
        for character in characters {
            let traits = serde_json::to_value(character.traits)
                .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            sqlx::query(
                "INSERT INTO characters (name, alias, universe, series, image_url, bio, traits)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(&character.name)
            .bind(&character.alias)
            .bind(&character.universe)
            .bind(&character.series)
            .bind(&character.image_url)
            .bind(&character.bio)
            .bind(traits)
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }

        tx.commit().await?;
        Ok(inserted)
    }
}
