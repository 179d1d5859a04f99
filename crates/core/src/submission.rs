//! Quiz submission payload and its input validation.

use serde::Deserialize;

use crate::error::CoreError;
use crate::matching::MatchMode;
use crate::media::MediaType;
use crate::question::Answer;
use crate::types::QuestionId;

/// Upper bound on `top_n` in global mode.
pub const MAX_TOP_N: usize = 50;

/// A user's completed quiz. Missing fields deserialize empty so that
/// [`QuizSubmission::validate`] can report them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuizSubmission {
    pub name: String,
    /// Selected universes, in the order the user picked them.
    #[serde(rename = "universe")]
    pub universes: Vec<String>,
    pub answers: Vec<Answer>,
    pub songs: Vec<String>,
    pub movies: Vec<String>,
    pub favorite_actors: Option<String>,
    pub favorite_cricketer: Option<String>,
    pub favorite_personality: Option<String>,
    /// Questions that were delivered to the user.
    pub question_ids: Option<Vec<QuestionId>>,
    /// The `count` the questions were fetched with, when ids are not sent.
    pub question_count: Option<usize>,
    pub mode: MatchMode,
    pub top_n: Option<usize>,
}

impl QuizSubmission {
    /// Reject submissions missing the name, universe selection or answers.
    pub fn validate(&self) -> Result<(), CoreError> {
        let has_universe = self.universes.iter().any(|u| !u.trim().is_empty());
        if self.name.trim().is_empty() || !has_universe || self.answers.is_empty() {
            return Err(CoreError::Validation("Missing required fields".into()));
        }
        if self.top_n == Some(0) {
            return Err(CoreError::Validation("top_n must be at least 1".into()));
        }
        Ok(())
    }

    /// Free-text titles to resolve, paired with their type, in submission
    /// order. Songs and movies come first, then the named preferences.
    pub fn titles(&self) -> Vec<(&str, MediaType)> {
        let media = self
            .songs
            .iter()
            .map(|s| (s.as_str(), MediaType::Song))
            .chain(self.movies.iter().map(|m| (m.as_str(), MediaType::Movie)));

        let preferences = [
            &self.favorite_actors,
            &self.favorite_cricketer,
            &self.favorite_personality,
        ]
        .into_iter()
        .flatten()
        .map(|p| (p.as_str(), MediaType::Person));

        media
            .chain(preferences)
            .filter(|(title, _)| !title.trim().is_empty())
            .collect()
    }

    /// Selected universes with blanks removed.
    pub fn selected_universes(&self) -> Vec<String> {
        self.universes
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect()
    }
}
