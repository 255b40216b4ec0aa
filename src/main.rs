mod app;
mod tui;
mod ui;

// `app` and `ui` reach the library through `crate::core`
use reveal_toggle::core;

use anyhow::Result;
use app::App;
use reveal_toggle::core::cli::{self, ToggleOptions};
use reveal_toggle::core::config::Config;
use reveal_toggle::core::logging;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use std::path::Path;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // Mode CLI
    if args.len() >= 2 {
        match args[1].as_str() {
            "toggle" => return run_toggle(&args[2..]),
            "page" => return cli::cmd_page(),
            "config" => {
                let path_only = args[2..].iter().any(|a| a == "--path");
                return cli::cmd_config(&Config::get_config_dir()?, path_only);
            }
            "help" | "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => {
                print_help();
                return Err(anyhow::anyhow!("Unknown command '{}'", other));
            }
        }
    }

    // Mode TUI standard
    run_tui()
}

fn print_help() {
    println!("reveal-toggle - Password field show/hide toggle");
    println!();
    println!("USAGE:");
    println!("  reveal-toggle                     Opens the sign-in form");
    println!("  reveal-toggle toggle [OPTIONS]    Clicks the toggle and prints the page state");
    println!("      --clicks, -n <N>              Number of clicks (default 1)");
    println!("      --page, -p <FILE>             JSON page to load instead of the sign-in form");
    println!("      --json                        JSON output");
    println!("  reveal-toggle page                Prints the sign-in page as JSON");
    println!("  reveal-toggle config [--path]     Shows the configuration (or its path)");
    println!();
    println!("EXAMPLES:");
    println!("  reveal-toggle toggle --clicks 3 --json");
    println!("  reveal-toggle page > form.json && reveal-toggle toggle --page form.json");
}

fn load_config() -> Result<(Config, std::path::PathBuf)> {
    let config_dir = Config::get_config_dir()?;
    let config = Config::load(&config_dir)?;
    Ok((config, config_dir))
}

fn init_logging(config: &Config, config_dir: &Path) {
    if let Err(e) = logging::init(&config.logging, config_dir) {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

/// Headless toggle run (scripts and tests)
fn run_toggle(args: &[String]) -> Result<()> {
    let options = ToggleOptions::from_args(args)?;
    let (config, config_dir) = load_config()?;
    init_logging(&config, &config_dir);

    cli::cmd_toggle(&options, &config)
}

fn run_tui() -> Result<()> {
    let (config, config_dir) = load_config()?;
    init_logging(&config, &config_dir);

    // Build the form before touching the terminal so wiring errors print normally
    let mut app = App::new(&config)?;

    let mut terminal = tui::init()?;
    let result = event_loop(&mut terminal, &mut app);
    tui::restore()?;
    result?;

    tracing::info!("sign-in form closed");
    println!("Closing Reveal Toggle.");
    Ok(())
}

fn event_loop(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let mut area = Rect::default();

    loop {
        terminal.draw(|frame| {
            area = frame.area();
            ui::render(app, frame);
        })?;

        // Use 100ms poll timeout for better compatibility with various terminals (e.g., Ghostty)
        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Clear messages on any key press
                    app.clear_status();
                    app.clear_error();
                    app.handle_key(key.code);
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(target) = ui::hit_test(area, mouse.column, mouse.row) {
                        app.clear_status();
                        app.clear_error();
                        app.handle_click(target);
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
