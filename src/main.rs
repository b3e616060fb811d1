use anchor_modal::app::AppState;
use anchor_modal::cli::Cli;
use anchor_modal::constants::{DEFAULT_LOG_FILTER, FRAME_DURATION_MS, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH};
use anchor_modal::error::{AppError, Result};
use anchor_modal::persistence::ConfigManager;
use anchor_modal::ui;
use anchor_modal::ui::input_handler::InputHandler;
use anchor_modal::ui::theme::Theme;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Validate CLI arguments
    cli.validate().map_err(AppError::Other)?;

    // Initialize logging if requested; the guard flushes on drop
    let _log_guard = match &cli.log_file {
        Some(log_file) => {
            let guard = init_logging(log_file)?;
            tracing::info!("=== anchor-modal starting ===");
            tracing::info!("Log file: {}", log_file);
            Some(guard)
        }
        None => None,
    };

    // Check terminal size
    let (width, height) = crossterm::terminal::size()?;
    if width < MIN_TERMINAL_WIDTH || height < MIN_TERMINAL_HEIGHT {
        tracing::error!(
            "Terminal too small: {}x{} (minimum: {}x{})",
            width,
            height,
            MIN_TERMINAL_WIDTH,
            MIN_TERMINAL_HEIGHT
        );
        return Err(AppError::TerminalTooSmall);
    }
    tracing::debug!("Terminal size: {}x{}", width, height);

    let mut app = initialize_app_state(&cli)?;

    // Setup terminal
    setup_terminal()?;
    tracing::debug!("Terminal setup completed");

    // Setup Ctrl-C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        tracing::info!("Ctrl-C received, shutting down");
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| AppError::Other(format!("Failed to set Ctrl-C handler: {}", e)))?;

    // Run the application
    let result = run_app(&mut app, running).await;

    // Cleanup terminal
    cleanup_terminal()?;
    tracing::debug!("Terminal cleanup completed");

    result
}

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;

    // Set panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal();
        original_hook(panic_info);
    }));

    Ok(())
}

fn cleanup_terminal() -> Result<()> {
    execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

fn init_logging(log_file: &str) -> Result<WorkerGuard> {
    use std::fs::OpenOptions;

    // Open/create log file, truncating if it exists
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file)
        .map_err(|e| AppError::LoggingError(format!("Failed to open log file: {}", e)))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    // Only our crate logs unless RUST_LOG says otherwise
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| AppError::LoggingError(e.to_string()))?;

    Ok(guard)
}

fn initialize_app_state(cli: &Cli) -> Result<AppState> {
    tracing::debug!("Initializing application state");

    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new().map_err(|e| {
            tracing::error!("Failed to locate config directory: {}", e);
            AppError::ConfigError(e.to_string())
        })?,
    };
    tracing::debug!("Config path: {}", config_manager.config_path().display());

    let loaded = config_manager
        .load_config()
        .map_err(|e| AppError::ConfigError(format!("{:#}", e)))?;
    let config = loaded.config;

    // CLI flags override the file
    let variant = cli.variant.unwrap_or(config.default_variant);
    let bfcache = config.bfcache && !cli.no_bfcache;
    tracing::debug!(
        "Config loaded: {} link(s), variant={}, bfcache={}",
        config.links.len(),
        variant.label(),
        bfcache
    );

    // Must run before raw mode; the probe reads the terminal's reply
    let theme = Theme::detect();

    let mut app = AppState::new(config, variant, bfcache, theme);

    if !loaded.warnings.is_empty() {
        app.show_error(loaded.warnings.join("\n"));
    }

    Ok(app)
}

async fn run_app(app: &mut AppState, running: Arc<AtomicBool>) -> Result<()> {
    // Create backend and terminal
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    let mut input_handler = InputHandler;

    let frame_duration = Duration::from_millis(FRAME_DURATION_MS);

    while running.load(Ordering::SeqCst) && !app.should_quit {
        let frame_start = Instant::now();

        // Render UI
        terminal.draw(|f| {
            ui::layout::render(f, app);
        })?;

        // Poll for input events (non-blocking)
        if event::poll(Duration::from_millis(0))? {
            let size = terminal.size()?;
            let screen = Rect::new(0, 0, size.width, size.height);
            handle_event(app, &mut input_handler, event::read()?, screen)?;
        }

        // Sleep to maintain frame rate
        let elapsed = frame_start.elapsed();
        if elapsed < frame_duration {
            tokio::time::sleep(frame_duration - elapsed).await;
        }
    }

    tracing::info!("anchor-modal shutting down");
    Ok(())
}

fn handle_event(app: &mut AppState, input_handler: &mut InputHandler, ev: Event, screen: Rect) -> Result<()> {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            input_handler.handle_key(app, key)?;
        }
        Event::Mouse(mouse) => {
            input_handler.handle_mouse(app, mouse, screen)?;
        }
        Event::Resize(width, height) => {
            tracing::debug!("Terminal resized to {}x{}", width, height);
        }
        _ => {}
    }
    Ok(())
}
