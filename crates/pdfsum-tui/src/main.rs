use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use pdfsum_core::{HttpApi, SelectedFile, SummarizerApi};

mod action;
mod app;
mod backend;
mod config_file;
mod input;
mod logging;
mod theme;
mod tick;
mod tui_event;
mod view;

use app::App;
use config_file::{Overrides, Settings};

/// pdfsum: summarize a PDF with a local LLM backend and compare models.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// PDF file to select on startup
    pdf_path: Option<PathBuf>,

    /// Backend base URL (default http://127.0.0.1:8000)
    #[arg(long)]
    api_url: Option<String>,

    /// Model identifier sent with summarize requests
    #[arg(long)]
    model: Option<String>,

    /// Maximum summary length passed to the backend
    #[arg(long)]
    max_length: Option<u32>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_path = logging::init();
    if let Err(e) = &log_path {
        eprintln!("warning: logging disabled: {e}");
    }

    // Validate the PDF given on the command line before touching the terminal
    let initial_file = match &args.pdf_path {
        Some(path) => Some(SelectedFile::from_path(path)?),
        None => None,
    };

    // Resolve config from CLI flags > env vars > config file > defaults
    let file_cfg = config_file::load_config();
    let cli = Overrides {
        api_url: args.api_url,
        model: args.model,
        max_length: args.max_length,
        theme: args.theme,
    };
    let settings = Settings::resolve(&file_cfg, &Overrides::from_env(), &cli);
    tracing::info!(
        api_url = %settings.api_url,
        model = %settings.model,
        max_length = ?settings.max_length,
        "starting"
    );

    let theme = theme::Theme::from_name(&settings.theme);
    let api: Arc<dyn SummarizerApi> = Arc::new(HttpApi::new(settings.api_url.clone()));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    // A panic must leave the terminal usable
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        original_hook(panic_info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // Discard the Enter that launched us, and anything typed during startup
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(&settings, theme);
    if let Some(file) = initial_file {
        app.select_path(&file.path);
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(cmd_tx);
    tokio::spawn(backend::run_listener(api, cmd_rx, event_tx));

    // SIGINT outside raw mode (e.g. sent with kill) also ends the loop
    let cancel = CancellationToken::new();
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    let mut clock = tick::TickClock::new(
        Duration::from_millis(settings.tick_millis()),
        Instant::now(),
    );

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Apply everything queued before redrawing
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            _ = cancel.cancelled() => {
                app.should_quit = true;
            }
            _ = async {
                if event::poll(clock.remaining(Instant::now())).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    app.update(input::map_event(&evt));
                }
            } => {}
        }

        if clock.is_due(Instant::now()) {
            app.update(action::Action::Tick);
        }

        if app.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Ok(path) = log_path {
        tracing::info!("exiting");
        println!("Log written to {}", path.display());
    }
    Ok(())
}
