//! Halcyon entry point: parse arguments, then run a subcommand or the TUI.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;

use halcyon::app::App;
use halcyon::cli::args::{Args, Commands};
use halcyon::cli::commands;
use halcyon::config::{resolve_config_dir, AppConfig};
use halcyon::constants;
use halcyon::core::ThreadScheduler;
use halcyon::event::{Event, EventHandler};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();

    let (config_dir, source) = resolve_config_dir(args.config_dir.as_deref());
    let config = AppConfig::load(&config_dir)?
        .with_overrides(args.tick_rate_ms, args.connect_delay_ms);

    let Some(command) = args.command else {
        run_tui(&config, &format!("{} ({source})", config_dir.display()))?;
        return Ok(ExitCode::SUCCESS);
    };

    let mut out = io::stdout().lock();
    let outcome = match command {
        Commands::Servers { search, json } => commands::servers(&mut out, search.as_deref(), json),
        Commands::Best { json } => commands::best(&mut out, json),
        Commands::Settings { set, json } => commands::settings(&mut out, &set, json),
        Commands::Connect { server_id } => {
            commands::connect(&mut out, &config, server_id.as_deref())
        }
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("{}{e}", constants::CLI_MSG_ERROR);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_tui(config: &AppConfig, config_origin: &str) -> Result<()> {
    let mut terminal = ratatui::init();
    let events = EventHandler::new(config.tick_rate_ms);
    let mut app = App::new(config, ThreadScheduler::new(events.sender()));
    app.log(&format!("INFO: Config directory {config_origin}"));

    let result = run_loop(&mut terminal, &mut app, &events);

    app.shutdown();
    ratatui::restore();
    result
}

fn run_loop(terminal: &mut DefaultTerminal, app: &mut App, events: &EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| halcyon::ui::render(frame, app))?;
        match events.next()? {
            Event::Key(key) => app.handle_key(key),
            Event::Resize(w, h) => app.on_resize(w, h),
            Event::Tick => app.on_tick(),
            Event::ConnectReady(ticket) => app.on_connect_ready(ticket),
        }
    }
    Ok(())
}
