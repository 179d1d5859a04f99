//! Question bank row.

use serde::Serialize;
use sqlx::FromRow;
use traitmatch_core::question::{AnswerOption, Question};
use traitmatch_core::store::StoreError;
use traitmatch_core::trait_vector::TraitDimension;
use traitmatch_core::types::{QuestionId, Timestamp};

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionRow {
    pub id: QuestionId,
    pub question: String,
    #[sqlx(rename = "trait")]
    pub dimension: String,
    /// JSONB array of `{id, text, score}`.
    pub options: serde_json::Value,
    pub created_at: Timestamp,
}

impl QuestionRow {
    pub fn into_domain(self) -> Result<Question, StoreError> {
        let dimension = TraitDimension::from_name(&self.dimension).ok_or_else(|| {
            StoreError::Malformed(format!(
                "question {} has unknown trait '{}'",
                self.id, self.dimension
            ))
        })?;
        let options: Vec<AnswerOption> = serde_json::from_value(self.options).map_err(|e| {
            StoreError::Malformed(format!("question {} has invalid options: {e}", self.id))
        })?;

        Ok(Question {
            id: self.id,
            prompt: self.question,
            dimension,
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(dimension: &str, options: serde_json::Value) -> QuestionRow {
        QuestionRow {
            id: 7,
            question: "Friday night plans?".into(),
            dimension: dimension.into(),
            options,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn converts_valid_row() {
        let q = row(
            "introversion",
            serde_json::json!([
                {"id": "7A", "text": "Stay in", "score": 0.9},
                {"id": "7B", "text": "Party", "score": 0.1}
            ]),
        )
        .into_domain()
        .unwrap();

        assert_eq!(q.dimension, TraitDimension::Introversion);
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.option("7B").unwrap().score, 0.1);
    }

    #[test]
    fn unknown_trait_is_malformed() {
        let err = row("wit", serde_json::json!([])).into_domain().unwrap_err();
        assert!(matches!(err, StoreError::Malformed(msg) if msg.contains("wit")));
    }

    #[test]
    fn invalid_options_are_malformed() {
        let err = row("humor", serde_json::json!({"id": 1}))
            .into_domain()
            .unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
