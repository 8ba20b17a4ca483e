use serde::{Deserialize, Serialize};

/// Where a finished session sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Navigation {
    Home,
    Leaderboard,
}

/// Session state reported by the validity endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validity {
    Valid,
    ExpiredToHome,
    ExpiredToLeaderboard,
}

impl Validity {
    /// `"1"` and `"2"` are the two exits; every other body, empty included,
    /// means the session is still valid.
    pub fn from_signal(body: &str) -> Self {
        match body.trim() {
            "1" => Validity::ExpiredToHome,
            "2" => Validity::ExpiredToLeaderboard,
            _ => Validity::Valid,
        }
    }

    pub fn navigation(self) -> Option<Navigation> {
        match self {
            Validity::Valid => None,
            Validity::ExpiredToHome => Some(Navigation::Home),
            Validity::ExpiredToLeaderboard => Some(Navigation::Leaderboard),
        }
    }
}
