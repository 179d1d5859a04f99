//! Prompt text sent to the model for one title.

use traitmatch_core::media::MediaType;
use traitmatch_core::trait_vector::TraitDimension;

const SYSTEM_PROMPT: &str = "You are an assistant that maps a song, movie or public figure \
to a numeric personality trait vector.
Return ONLY valid JSON (no extra text). Must follow the schema exactly.
If the input is ambiguous or unknown, return a 'confidence' below 0.7 and explain in \"notes\".";

/// How the subject of a title is described to the model.
fn subject(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Song => "the lyrics, mood and tone of the song",
        MediaType::Movie => "the plot, protagonists, themes and tone of the movie",
        MediaType::Person => "the public persona, career and reputation of the person",
    }
}

/// Build the full prompt for `title`.
pub fn build_prompt(title: &str, media_type: MediaType) -> String {
    let keys = TraitDimension::ALL
        .iter()
        .map(|d| d.name())
        .collect::<Vec<_>>()
        .join(", ");
    let schema_traits = TraitDimension::ALL
        .iter()
        .map(|d| format!("     \"{}\": 0.00", d.name()))
        .collect::<Vec<_>>()
        .join(",\n");
    let input = serde_json::Value::String(title.to_string());

    format!(
        r#"{SYSTEM_PROMPT}

Title: {input}
Type: "{media_type}"

Task:
1) Identify the canonical title (and year if applicable).
2) Based on {subject}, map it to the following trait keys with numeric values between 0.0 and 1.0 (two decimal places):
   {keys}

Rules:
- Output EXACTLY one JSON object (no markdown, no commentary) with keys:
  {{
   "input": "<the exact user string>",
   "canonical_title": "<canonical title or empty string>",
   "type": "{media_type}",
   "confidence": 0.00,
   "traits": {{
{schema_traits}
   }},
   "notes": "<short reason or empty string>"
  }}
- Confidence is a float 0.00-1.00 (0.00 unknown, 1.00 exact match).
- Every trait value must be between 0.00 and 1.00.
- If unsure about the title, set confidence low and keep notes explaining why.
- Keep "notes" short (1-2 sentences)."#,
        subject = subject(media_type),
    )
}
