use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

use malajunta::app::{App, AppMessage};
use malajunta::cli::{parse_args, run_cli_command};
use malajunta::config::{AppConfig, BackendConfig};
use malajunta::context::AppContext;
use malajunta::logging::init_logging;
use malajunta::terminal::{setup_panic_hook, TerminalManager, Tui};
use malajunta::ui;

fn main() -> Result<()> {
    // A .env file is optional
    let _ = dotenvy::dotenv();
    color_eyre::install()?;

    if let Some(result) = run_cli_command(parse_args(std::env::args())) {
        if let Err(e) = result {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    let backend = match BackendConfig::from_env() {
        Ok(backend) => backend,
        Err(e) => {
            eprintln!("malajunta: {}", e);
            eprintln!("Run `malajunta --help` for the list of variables.");
            std::process::exit(1);
        }
    };

    let log_path = init_logging();
    tracing::info!("Starting malajunta {}", malajunta::cli::VERSION);
    if let Some(path) = &log_path {
        tracing::debug!("Logging to {}", path.display());
    }

    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(AppConfig::new(backend)))
}

async fn run(config: AppConfig) -> Result<()> {
    let (notice_tx, notice_rx) = mpsc::unbounded_channel();
    let (message_tx, message_rx) = mpsc::unbounded_channel();

    let ctx = AppContext::connect(config, notice_tx);
    let mut app = App::new(ctx, message_tx, message_rx);
    app.forward_identity_notices(notice_rx);
    app.start_identity();

    let mut manager = TerminalManager::new()?;
    let result = run_app(manager.terminal(), &mut app).await;
    manager.restore()?;

    tracing::info!("Exiting");
    result
}

async fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        // Draw the UI only when needed
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        // 16ms tick drives the spinner, toast expiry and route fallback
        let timeout = tokio::time::sleep(Duration::from_millis(16));

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.status = None;
                        app.handle_key(key).await;
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("Terminal event error: {}", e);
                    }
                    None => app.quit(),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg).await;
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
