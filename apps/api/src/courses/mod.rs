// Course recommendation: TF-IDF ranking of a fixed course catalog.

pub mod catalog;
pub mod handlers;
pub mod recommender;
