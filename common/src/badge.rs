use serde::{Deserialize, Serialize};

use crate::UserRecord;

/// Achievement tier shown next to a single problem score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    /// Sole holder of the best solution.
    Diamond,
    /// Shares the best solution with others.
    Gold,
}

impl Badge {
    pub fn marker(self) -> &'static str {
        match self {
            Badge::Diamond => "◆",
            Badge::Gold => "★",
        }
    }
}

/// Diamond wins over gold if an index somehow appears in both sets.
pub fn badge_for(record: &UserRecord, problem_index: usize) -> Option<Badge> {
    if record.diamonds.contains(&problem_index) {
        Some(Badge::Diamond)
    } else if record.golds.contains(&problem_index) {
        Some(Badge::Gold)
    } else {
        None
    }
}
