/// Interval between leaderboard snapshot fetches in milliseconds
pub const LEADERBOARD_POLL_INTERVAL_MS: u64 = 10_000;

/// Interval between session validity checks in milliseconds
pub const VALIDITY_POLL_INTERVAL_MS: u64 = 10_000;

/// Countdown tick interval in milliseconds
pub const COUNTDOWN_TICK_INTERVAL_MS: u64 = 1_000;

/// Auth check body that marks the session as admin
pub const ADMIN_SENTINEL: &str = "1";

/// Form value posted for a removal control
pub const REMOVAL_VALUE: &str = "x";
