//! Aligns the word timings of a speech transcript with an independent
//! linguistic tokenization of the same text, and aggregates token timings up
//! to sentences, entities and whole documents.

pub mod alignment;
pub mod pipeline;
pub mod shared;
pub mod tokenization;
pub mod transcript;
