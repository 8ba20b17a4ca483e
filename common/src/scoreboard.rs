use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One fetched copy of every user's score, keyed by username.
///
/// Iteration order is the order of the keys in the JSON object the server
/// sent. Ranking ties and the problem count both depend on that order, so
/// the map must never be re-keyed or sorted in place.
pub type ScoreSnapshot = IndexMap<String, UserRecord>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemScore {
    #[serde(deserialize_with = "integral")]
    pub score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Total score, lower is better.
    #[serde(deserialize_with = "integral")]
    pub score: i64,
    #[serde(deserialize_with = "integral")]
    pub solved: u32,
    pub problem_scores: Vec<ProblemScore>,
    #[serde(default)]
    pub diamonds: BTreeSet<usize>,
    #[serde(default)]
    pub golds: BTreeSet<usize>,
}

/// A user's place in one rendered ordering. Recomputed on every poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedEntry<'a> {
    /// 1-based position in display order.
    pub rank: usize,
    pub username: &'a str,
    pub record: &'a UserRecord,
}

/// Accepts any JSON number with an integral value, so `10` and `10.0` both
/// read as 10.
fn integral<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    let value = number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|v| v.fract() == 0.0 && *v >= i64::MIN as f64 && *v < i64::MAX as f64)
            .map(|v| v as i64)
    });
    value
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| D::Error::custom(format!("expected an integral number, got {}", number)))
}

pub fn parse_snapshot(body: &str) -> Result<ScoreSnapshot, serde_json::Error> {
    serde_json::from_str(body)
}

/// Orders the snapshot by score ascending, then solved descending.
///
/// The sort is stable: users with the same `(score, solved)` keep the
/// order they had in the snapshot.
pub fn rank(snapshot: &ScoreSnapshot) -> Vec<RankedEntry<'_>> {
    let mut entries: Vec<(&str, &UserRecord)> = snapshot
        .iter()
        .map(|(username, record)| (username.as_str(), record))
        .collect();

    entries.sort_by(|(_, a), (_, b)| a.score.cmp(&b.score).then(b.solved.cmp(&a.solved)));

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, (username, record))| RankedEntry {
            rank: idx + 1,
            username,
            record,
        })
        .collect()
}

/// Problem count taken from the first record in snapshot order, not the
/// longest one. `None` when the snapshot is empty.
pub fn num_problems(snapshot: &ScoreSnapshot) -> Option<usize> {
    snapshot
        .values()
        .next()
        .map(|record| record.problem_scores.len())
}
