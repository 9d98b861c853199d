// Resume ↔ job description match scoring via sentence embeddings.

pub mod handlers;
pub mod pdf;
pub mod scoring;
