use serde::{Deserialize, Serialize};

/// One selectable side of a prediction, with accumulated participation stats.
/// `index` is 1-based and drives every ordered rendering of outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Outcome {
    pub id: String,
    pub title: String,
    pub total_points: i64,
    pub total_users: i64,
    pub index: i64,
}
