//! Trait-matching domain logic.
//!
//! Turns quiz answers and free-text preferences into a ten-dimensional
//! trait vector and ranks fictional characters against it. Storage and the
//! inference provider are reached only through the traits in [`store`] and
//! [`classifier`], so everything here runs without a database or network.

pub mod aggregation;
pub mod classifier;
pub mod composer;
pub mod error;
pub mod listing;
pub mod matching;
pub mod media;
pub mod memory;
pub mod question;
pub mod resolver;
pub mod result;
pub mod scoring;
pub mod store;
pub mod submission;
pub mod trait_vector;
pub mod types;
