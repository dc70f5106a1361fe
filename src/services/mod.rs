pub mod extract;
pub mod genres;
pub mod library;
pub mod normalize;
pub mod providers;
pub mod recommendations;
pub mod torrents;

pub use normalize::MediaNormalizer;
pub use recommendations::{GenreSelector, RecommendationOptions, RecommendationOutcome};
