//! Gemini-backed trait inference.
//!
//! Provides the REST client for the `generateContent` endpoint, the prompt
//! sent for each title, response parsing, and a [`TraitClassifier`]
//! implementation the resolver can use.
//!
//! [`TraitClassifier`]: traitmatch_core::classifier::TraitClassifier

pub mod api;
pub mod classifier;
pub mod parse;
pub mod prompt;
