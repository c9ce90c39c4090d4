// Scoring — per-candidate scores for posts and user pairs.

pub mod affinity;
pub mod post;
pub mod signals;
