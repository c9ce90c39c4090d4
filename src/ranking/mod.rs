// Ranking — turn per-candidate scores into ordered, explained results.

pub mod groups;
pub mod posts;
pub mod results;
pub mod users;
