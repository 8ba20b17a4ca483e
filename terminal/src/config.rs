use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use common::{
    COUNTDOWN_TICK_INTERVAL_MS, CountdownPolicy, LEADERBOARD_POLL_INTERVAL_MS,
    VALIDITY_POLL_INTERVAL_MS,
};
use url::Url;

use crate::poll::OverlapPolicy;

#[derive(Parser, Debug)]
#[command(
    name = "contest-terminal",
    about = "Live leaderboard and problem timer for a running contest"
)]
pub struct Args {
    /// Base URL of the contest server (e.g. http://localhost:3000)
    #[arg(long, env = "CONTEST_URL", default_value = "http://localhost:3000")]
    pub url: String,

    /// View to open at startup
    #[arg(long, value_enum, env = "CONTEST_VIEW", default_value = "leaderboard")]
    pub view: StartView,

    /// Seconds between leaderboard refreshes
    #[arg(long, env = "CONTEST_LEADERBOARD_INTERVAL", default_value_t = LEADERBOARD_POLL_INTERVAL_MS / 1000)]
    pub leaderboard_interval: u64,

    /// Seconds between session validity checks
    #[arg(long, env = "CONTEST_VALIDITY_INTERVAL", default_value_t = VALIDITY_POLL_INTERVAL_MS / 1000)]
    pub validity_interval: u64,

    /// What to do when a poll fires while the previous request is still out
    #[arg(long, value_enum, env = "CONTEST_OVERLAP", default_value = "last-response-wins")]
    pub overlap: OverlapArg,

    /// Countdown behaviour once the clock reaches zero
    #[arg(long, value_enum, env = "CONTEST_COUNTDOWN", default_value = "unbounded")]
    pub countdown: CountdownArg,

    /// Write logs here instead of stderr
    #[arg(long, env = "CONTEST_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StartView {
    Leaderboard,
    Problem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverlapArg {
    LastResponseWins,
    SkipWhileInFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CountdownArg {
    Unbounded,
    ClampAtZero,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub start_view: StartView,
    pub leaderboard_interval: Duration,
    pub validity_interval: Duration,
    pub countdown_tick: Duration,
    pub overlap: OverlapPolicy,
    pub countdown: CountdownPolicy,
}

impl ClientConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.leaderboard_interval == 0 || args.validity_interval == 0 {
            return Err(anyhow!("Poll intervals must be at least one second"));
        }

        Ok(Self {
            base_url: normalize_base_url(&args.url)?,
            start_view: args.view,
            leaderboard_interval: Duration::from_secs(args.leaderboard_interval),
            validity_interval: Duration::from_secs(args.validity_interval),
            countdown_tick: Duration::from_millis(COUNTDOWN_TICK_INTERVAL_MS),
            overlap: match args.overlap {
                OverlapArg::LastResponseWins => OverlapPolicy::LastResponseWins,
                OverlapArg::SkipWhileInFlight => OverlapPolicy::SkipWhileInFlight,
            },
            countdown: match args.countdown {
                CountdownArg::Unbounded => CountdownPolicy::Unbounded,
                CountdownArg::ClampAtZero => CountdownPolicy::ClampAtZero,
            },
        })
    }
}

pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let url = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("http://{raw}"))
    };
    url.context("Invalid base URL")
}
