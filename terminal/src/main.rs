use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use terminal::admin::{spawn_admin_check, AdminFlag};
use terminal::api::{ContestApi, HttpContestApi};
use terminal::app::{App, AppCommand};
use terminal::config::{Args, ClientConfig};
use terminal::poll::UiEvent;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

// All loops share one cooperative thread with the UI.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if exists
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;
    let config = ClientConfig::from_args(&args)?;
    info!("Connecting to contest server at {}", config.base_url);

    let http_client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;
    let api: Arc<dyn ContestApi> =
        Arc::new(HttpContestApi::new(http_client, config.base_url.clone()));

    // Renders that land before the auth check treat the user as non-admin.
    let admin = AdminFlag::new();
    spawn_admin_check(api.clone(), admin.clone());

    let mut app = App::new(config, api, admin);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Logs go to `log_file` when given. Without one, logging stays off unless
/// `RUST_LOG` asks for it, since stderr shares the screen with the TUI.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

enum Step {
    Event(UiEvent),
    Input(Option<io::Result<Event>>),
    Redraw,
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut input = EventStream::new();
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);

    loop {
        terminal.draw(|f| app.render(f))?;

        let step = tokio::select! {
            Some(event) = app.next_event() => Step::Event(event),
            maybe_input = input.next() => Step::Input(maybe_input),
            _ = redraw.tick() => Step::Redraw,
        };

        match step {
            Step::Event(event) => app.handle_event(event),
            Step::Input(Some(Ok(Event::Key(key)))) if key.kind == KeyEventKind::Press => {
                if let Some(command) = app.handle_input(key) {
                    match command {
                        AppCommand::Quit => return Ok(()),
                        _ => app.handle_command(command)?,
                    }
                }
            }
            Step::Input(Some(Ok(_))) => {}
            Step::Input(Some(Err(err))) => return Err(err.into()),
            Step::Input(None) => return Ok(()),
            Step::Redraw => {}
        }
    }
}
