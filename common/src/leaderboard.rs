use serde::{Deserialize, Serialize};

use crate::{Badge, REMOVAL_VALUE, ScoreSnapshot, UserRecord, badge_for, num_problems, rank};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemCell {
    pub text: String,
    pub badge: Option<Badge>,
}

/// Admin-only form control that asks the backend to drop a user.
/// The form field name is the username and the value is always `"x"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalControl {
    pub field: String,
    pub value: String,
}

impl RemovalControl {
    pub fn for_user(username: &str) -> Self {
        Self {
            field: username.to_string(),
            value: REMOVAL_VALUE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRow {
    pub rank: usize,
    pub username: String,
    pub cells: Vec<ProblemCell>,
    pub solved: u32,
    pub score: i64,
    pub removal: Option<RemovalControl>,
}

/// Full replacement content for the leaderboard display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardFrame {
    /// `None` means the header region must be left as it is.
    pub num_problems: Option<usize>,
    pub rows: Vec<RenderedRow>,
}

pub fn render_leaderboard(snapshot: &ScoreSnapshot, admin: bool) -> LeaderboardFrame {
    let num_problems = num_problems(snapshot);
    if num_problems.is_none() {
        log::debug!("Empty score snapshot, keeping previous headers");
    }

    let rows = rank(snapshot)
        .into_iter()
        .map(|entry| RenderedRow {
            rank: entry.rank,
            username: entry.username.to_string(),
            cells: decorate(entry.record),
            solved: entry.record.solved,
            score: entry.record.score,
            removal: admin.then(|| RemovalControl::for_user(entry.username)),
        })
        .collect();

    LeaderboardFrame { num_problems, rows }
}

fn decorate(record: &UserRecord) -> Vec<ProblemCell> {
    record
        .problem_scores
        .iter()
        .enumerate()
        .map(|(idx, problem)| {
            let badge = badge_for(record, idx);
            let text = match badge {
                Some(badge) => format!("{} {}", badge.marker(), problem.score),
                None => problem.score.to_string(),
            };
            ProblemCell { text, badge }
        })
        .collect()
}

/// Header labels for a board with `num_problems` problem columns.
pub fn column_headers(num_problems: usize) -> Vec<String> {
    let mut headers = vec!["#".to_string(), "User".to_string()];
    headers.extend((1..=num_problems).map(|n| format!("P{}", n)));
    headers.push("Solved".to_string());
    headers.push("Score".to_string());
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_snapshot;

    const SCENARIO: &str = r#"{
        "alice": {"score": 10, "solved": 2, "problem_scores": [{"score": 5}, {"score": 5}], "diamonds": [], "golds": [0]},
        "bob": {"score": 8, "solved": 1, "problem_scores": [{"score": 8}, {"score": 0}], "diamonds": [1], "golds": []}
    }"#;

    #[test]
    fn test_scenario_order_and_badges() {
        let snapshot = parse_snapshot(SCENARIO).unwrap();
        let frame = render_leaderboard(&snapshot, false);

        assert_eq!(frame.num_problems, Some(2));
        let names: Vec<&str> = frame.rows.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice"]);

        let bob = &frame.rows[0];
        assert_eq!(bob.cells[0], ProblemCell { text: "8".into(), badge: None });
        assert_eq!(bob.cells[1].badge, Some(Badge::Diamond));
        assert_eq!(bob.cells[1].text, "◆ 0");

        let alice = &frame.rows[1];
        assert_eq!(alice.cells[0].badge, Some(Badge::Gold));
        assert_eq!(alice.cells[0].text, "★ 5");
        assert_eq!(alice.cells[1].badge, None);
    }

    #[test]
    fn test_removal_controls_only_for_admin() {
        let snapshot = parse_snapshot(SCENARIO).unwrap();

        let plain = render_leaderboard(&snapshot, false);
        assert!(plain.rows.iter().all(|r| r.removal.is_none()));

        let admin = render_leaderboard(&snapshot, true);
        let control = admin.rows[1].removal.as_ref().unwrap();
        assert_eq!(control.field, "alice");
        assert_eq!(control.value, "x");
    }

    #[test]
    fn test_empty_snapshot_keeps_headers() {
        let frame = render_leaderboard(&ScoreSnapshot::new(), true);
        assert_eq!(frame.num_problems, None);
        assert!(frame.rows.is_empty());
    }

    #[test]
    fn test_column_headers() {
        assert_eq!(
            column_headers(2),
            vec!["#", "User", "P1", "P2", "Solved", "Score"]
        );
        assert_eq!(column_headers(0).len(), 4);
    }
}
