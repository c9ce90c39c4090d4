// forumrank: feed ranking and connection recommendations for a social forum
//
// This is the library root. Each module corresponds to one layer of the
// recommendation engine, from signal storage up to the public facade.

pub mod config;
pub mod db;
pub mod engine;
pub mod output;
pub mod ranking;
pub mod scoring;
pub mod topics;

pub use engine::RecommendationEngine;
pub use ranking::users::RecommendationStrategy;
