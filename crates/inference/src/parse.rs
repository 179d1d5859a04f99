//! Parsing of the model's text answer into a [`Classification`].

use serde::Deserialize;

use traitmatch_core::classifier::{Classification, ClassifierError};
use traitmatch_core::trait_vector::{TraitMap, TraitVector};

/// JSON object the prompt asks for. `input` and `type` are echoed back by
/// the model and ignored.
#[derive(Debug, Deserialize)]
struct RawMapping {
    #[serde(default)]
    canonical_title: Option<String>,
    confidence: f64,
    traits: TraitMap,
    #[serde(default)]
    notes: Option<String>,
}

/// Parse the model's reply.
///
/// Markdown code fences and surrounding prose are tolerated. Confidence and
/// all ten traits must be present; their values are clamped into `[0, 1]`.
pub fn parse_classification(text: &str) -> Result<Classification, ClassifierError> {
    let json = extract_json_object(text)
        .ok_or_else(|| ClassifierError::InvalidResponse("no JSON object in response".into()))?;

    let raw: RawMapping = serde_json::from_str(json)
        .map_err(|e| ClassifierError::InvalidResponse(format!("malformed mapping: {e}")))?;

    Ok(Classification {
        traits: TraitVector::clamped(raw.traits.into_values()),
        confidence: raw.confidence.max(0.0).min(1.0),
        canonical_title: raw.canonical_title.filter(|t| !t.trim().is_empty()),
        notes: raw.notes.filter(|n| !n.trim().is_empty()),
    })
}

/// Slice from the first `{` to the last `}`, which also drops any
/// ```` ```json ```` fence around the object.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use traitmatch_core::trait_vector::TraitDimension;

    const TRAITS: &str = r#"{"introversion":0.2,"humor":0.1,"bravery":0.9,"loyalty":0.7,
        "ambition":0.8,"compassion":0.4,"cunning":0.3,"responsibility":0.6,
        "sarcasm":0.1,"optimism":0.8}"#;

    fn reply(confidence: &str, traits: &str) -> String {
        format!(
            r#"{{"input":"eye of the tiger","canonical_title":"Eye of the Tiger (1982)",
            "type":"song","confidence":{confidence},"traits":{traits},"notes":"Survivor"}}"#
        )
    }

    #[test]
    fn parses_plain_json() {
        let c = parse_classification(&reply("0.92", TRAITS)).unwrap();
        assert_eq!(c.confidence, 0.92);
        assert_eq!(c.traits[TraitDimension::Bravery], 0.9);
        assert_eq!(c.canonical_title.as_deref(), Some("Eye of the Tiger (1982)"));
        assert_eq!(c.notes.as_deref(), Some("Survivor"));
    }

    #[test]
    fn strips_markdown_fences() {
        let fenced = format!("```json\n{}\n```", reply("0.5", TRAITS));
        let c = parse_classification(&fenced).unwrap();
        assert_eq!(c.confidence, 0.5);
    }

    #[test]
    fn clamps_out_of_range_values() {
        let traits = TRAITS.replace("\"bravery\":0.9", "\"bravery\":1.7");
        let c = parse_classification(&reply("1.4", &traits)).unwrap();
        assert_eq!(c.traits[TraitDimension::Bravery], 1.0);
        assert_eq!(c.confidence, 1.0);
    }

    #[test]
    fn missing_trait_is_invalid() {
        let traits = TRAITS.replace("\"optimism\":0.8", "\"hope\":0.8");
        assert_matches!(
            parse_classification(&reply("0.9", &traits)),
            Err(ClassifierError::InvalidResponse(_))
        );
    }

    #[test]
    fn missing_confidence_is_invalid() {
        let text = format!(r#"{{"canonical_title":"Up","traits":{TRAITS},"notes":"Pixar"}}"#);
        assert_matches!(
            parse_classification(&text),
            Err(ClassifierError::InvalidResponse(msg)) if msg.contains("confidence")
        );
    }

    #[test]
    fn prose_without_json_is_invalid() {
        assert_matches!(
            parse_classification("I could not identify that title."),
            Err(ClassifierError::InvalidResponse(_))
        );
    }

    #[test]
    fn empty_canonical_title_becomes_none() {
        let text = format!(
            r#"{{"canonical_title":"","confidence":0.3,"traits":{TRAITS},"notes":""}}"#
        );
        let c = parse_classification(&text).unwrap();
        assert!(c.canonical_title.is_none());
        assert!(c.notes.is_none());
    }
}
