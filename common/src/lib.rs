mod badge;
mod constants;
mod countdown;
mod editor;
mod leaderboard;
mod scoreboard;
mod validity;

pub use badge::*;
pub use constants::*;
pub use countdown::*;
pub use editor::*;
pub use leaderboard::*;
pub use scoreboard::*;
pub use validity::*;
