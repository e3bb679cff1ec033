//! lissajous - draw Lissajous figures in the terminal and save them as images
//!
//! Usage:
//!   lissajous              Launch the TUI
//!   lissajous --help       Show usage
//!   lissajous --version    Show version

use std::env;
use std::fs::File;
use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    ExecutableCommand,
};
use ratatui::prelude::*;
use ratatui_image::picker::{Picker, ProtocolType};

mod config;
mod export;
mod render;
mod shell;

use config::{AppConfig, VERSION};
use shell::App;

/// Environment variable naming a file to write logs to.
const LOG_FILE_ENV: &str = "LISSAJOUS_LOG";

fn main() {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("lissajous");

    if let Some(arg) = args.get(1) {
        match arg.as_str() {
            "help" | "--help" | "-h" => {
                print_usage(prog);
                return;
            }
            "--version" | "-V" => {
                println!("lissajous {}", VERSION);
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!();
                print_usage(prog);
                std::process::exit(2);
            }
        }
    }

    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("lissajous {} - Lissajous figure generator", VERSION);
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {}              Launch the interactive generator", prog);
    eprintln!("  {} --help       Show this message", prog);
    eprintln!("  {} --version    Show version", prog);
    eprintln!();
    eprintln!("Color table: {} next to the executable, or assets/{} in the", config::COLORS_FILE, config::COLORS_FILE);
    eprintln!("current directory; the built-in table is used otherwise.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG        Log filter (e.g. info, debug)");
    eprintln!("  {}   Write logs to this file", LOG_FILE_ENV);
}

/// Logs go to a file when `LISSAJOUS_LOG` is set; stderr is under the
/// alternate screen while the UI runs, so without a file the default filter
/// is off.
fn init_logging() {
    let log_file = env::var_os(LOG_FILE_ENV).and_then(|path| match File::create(&path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Cannot open log file {:?}: {}", path, e);
            None
        }
    });

    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(file) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
}

fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    log::info!(
        "lissajous {} starting, {} colors from {}",
        VERSION,
        config.colors.len(),
        config.color_source
    );
    run_tui(config)
}

fn run_tui(config: AppConfig) -> anyhow::Result<()> {
    // Initialize terminal
    enable_raw_mode().context("enabling raw mode")?;
    enter_alternate_screen(&mut stdout(), disable_raw_mode)?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .context("creating terminal")
        .and_then(|mut terminal| {
            // Image picker for the preview - force Sixel protocol
            let mut picker = Picker::from_termios().unwrap_or_else(|_| Picker::new((8, 16)));
            picker.protocol_type = ProtocolType::Sixel;

            let mut app = App::new(config, Some(picker));
            run_app(&mut terminal, &mut app)
        });

    // Restore terminal
    disable_raw_mode().context("disabling raw mode")?;
    stdout()
        .execute(LeaveAlternateScreen)
        .context("leaving alternate screen")?;

    result
}

/// Switch `out` to the alternate screen, calling `undo_raw_mode` if that fails
/// so the shell isn't left in raw mode.
fn enter_alternate_screen<W, F>(out: &mut W, undo_raw_mode: F) -> anyhow::Result<()>
where
    W: io::Write,
    F: FnOnce() -> io::Result<()>,
{
    if let Err(e) = out.execute(EnterAlternateScreen) {
        if let Err(undo) = undo_raw_mode() {
            log::error!("disabling raw mode after failed setup: {}", undo);
        }
        return Err(e).context("entering alternate screen");
    }
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        // Update the rendered image if needed
        app.update_image();

        terminal
            .draw(|frame| shell::draw(frame, app))
            .context("drawing frame")?;

        if event::poll(Duration::from_millis(100)).context("polling events")? {
            if let Event::Key(key) = event::read().context("reading event")? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit() {
            log::info!("quit");
            return Ok(());
        }
    }
}
