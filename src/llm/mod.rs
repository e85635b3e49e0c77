pub mod answer;
pub mod embeddings;
pub mod normalize;
