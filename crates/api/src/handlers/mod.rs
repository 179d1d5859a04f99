pub mod characters;
pub mod media;
pub mod questions;
pub mod scoring;
