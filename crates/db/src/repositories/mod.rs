//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod character_repo;
pub mod media_trait_repo;
pub mod question_repo;

pub use character_repo::CharacterRepo;
pub use media_trait_repo::{CuratedMediaRepo, MediaTraitCacheRepo};
pub use question_repo::QuestionRepo;
