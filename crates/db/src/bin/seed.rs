//! Seed the question bank, character catalog and (optionally) curated
//! title mappings from JSON files.
//!
//! ```text
//! traitmatch-seed <characters.json> <questions.json> [curated.json]
//! ```
//!
//! Questions and characters are replaced wholesale; curated mappings are
//! upserted. Reads `DATABASE_URL` from the environment or `.env`.

use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use traitmatch_core::matching::Character;
use traitmatch_core::media::{MappingSource, MediaKey, MediaTraitMapping, MediaType};
use traitmatch_core::question::Question;
use traitmatch_core::trait_vector::TraitVector;
use traitmatch_db::repositories::{
    CharacterRepo, CuratedMediaRepo, MediaTraitCacheRepo, QuestionRepo,
};

/// One entry of the curated mappings file.
#[derive(Debug, Deserialize)]
struct CuratedEntry {
    title: String,
    #[serde(rename = "type")]
    media_type: MediaType,
    canonical_title: Option<String>,
    traits: TraitVector,
    #[serde(default)]
    notes: String,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn curated_mapping(entry: CuratedEntry) -> anyhow::Result<MediaTraitMapping> {
    let key = MediaKey::new(&entry.title, entry.media_type)
        .with_context(|| format!("invalid curated title '{}'", entry.title))?;
    Ok(MediaTraitMapping {
        canonical_title: entry
            .canonical_title
            .unwrap_or_else(|| entry.title.trim().to_string()),
        input: entry.title,
        normalized_title: key.normalized_title().to_string(),
        media_type: entry.media_type,
        confidence: 1.0,
        traits: entry.traits,
        notes: entry.notes,
        source: MappingSource::Curated,
        created_at: chrono::Utc::now(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "traitmatch_db=info,traitmatch_seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("usage: traitmatch-seed <characters.json> <questions.json> [curated.json]");
    }

    let characters: Vec<Character> = read_json(Path::new(&args[0]))?;
    let questions: Vec<Question> = read_json(Path::new(&args[1]))?;
    let curated: Vec<MediaTraitMapping> = match args.get(2) {
        Some(path) => read_json::<Vec<CuratedEntry>>(Path::new(path))?
            .into_iter()
            .map(curated_mapping)
            .collect::<anyhow::Result<_>>()?,
        None => Vec::new(),
    };

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = traitmatch_db::create_pool(&database_url)
        .await
        .context("failed to connect to database")?;
    traitmatch_db::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let inserted = CharacterRepo::replace_all(&pool, &characters).await?;
    tracing::info!(count = inserted, "Seeded characters");

    let inserted = QuestionRepo::replace_all(&pool, &questions).await?;
    tracing::info!(count = inserted, "Seeded questions");

    for mapping in &curated {
        CuratedMediaRepo::upsert(&pool, mapping).await?;
    }
    tracing::info!(count = curated.len(), "Seeded curated mappings");

    let universes = CharacterRepo::universes(&pool).await?;
    let question_count = QuestionRepo::count(&pool).await?;
    let cached = MediaTraitCacheRepo::count(&pool).await?;

    println!("Seeding completed.");
    println!("- Characters: {}", characters.len());
    println!("- Questions: {question_count}");
    println!("- Curated mappings: {}", curated.len());
    println!("- Cached mappings: {cached}");
    println!("- Universes: {}", universes.join(", "));

    Ok(())
}
