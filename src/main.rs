//! ZUMI - Bakery Storefront
//!
//! A terminal storefront for a small bakery, built in Rust. Displays the
//! cookie catalog, lets a visitor browse, rate, and submit an order request
//! that is relayed by email to the business.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::{App, OrderForm};
use domain::{Catalog, OrderNotifier};
use infrastructure::{ConfigRepository, EmailJsRelay, RelayConfig};
use presentation::{render_ui, InputHandler};

struct CliOptions {
    menu: Option<String>,
    relay: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        menu: None,
        relay: None,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--menu" => {
                options.menu = Some(args.next().ok_or("--menu requires a file path")?);
            }
            "--relay" => {
                options.relay = Some(args.next().ok_or("--relay requires a file path")?);
            }
            other => {
                return Err(format!(
                    "Unknown argument: {} (usage: zumi [--menu <file>] [--relay <file>])",
                    other
                ));
            }
        }
    }
    Ok(options)
}

/// Entry point for the ZUMI bakery storefront.
///
/// Loads the catalog and relay configuration (built-in defaults unless files
/// are supplied), sets up the terminal interface, and runs the main event
/// loop until the visitor quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails, a supplied configuration file
/// cannot be read, or an invariant violation escapes the event loop.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args(std::env::args().skip(1)).map_err(io::Error::other)?;

    let catalog = match options.menu {
        Some(path) => ConfigRepository::load_catalog(&path).map_err(io::Error::other)?,
        None => Catalog::sample(),
    };
    let relay_config = match options.relay {
        Some(path) => ConfigRepository::load_relay_config(&path).map_err(io::Error::other)?,
        None => RelayConfig::default(),
    };
    let notifier = EmailJsRelay::new(relay_config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(catalog, Instant::now());
    let res = run_app(&mut terminal, &mut app, &notifier);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Renders the current state, drives the pending relay call while the order
/// form is in `Submitting`, processes keyboard input, and ticks the
/// timer-driven transitions (splash and confirmation dismissal). Continues
/// until the visitor presses 'q' with no dialog open.
///
/// # Errors
///
/// Returns an error if terminal operations fail or an invariant violation
/// surfaces from the state machine.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    notifier: &dyn OrderNotifier,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        // The "Sending..." frame has rendered; perform the single blocking
        // relay attempt now. Input is not polled meanwhile, so a second
        // submission cannot be issued.
        if matches!(app.order_form, OrderForm::Submitting { .. }) {
            app.dispatch_pending_send(notifier, Instant::now())?;
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q')
                            if matches!(app.order_form, OrderForm::Closed) =>
                        {
                            return Ok(());
                        }
                        _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                    }
                }
            }
        }

        app.tick(Instant::now());
    }
}
