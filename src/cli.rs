// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - update: run one generation cycle and exit
// - watch: run the daemon (default when no subcommand is given)
// - config --show|--reset|--edit|--update|--path: manage the config file

use crate::config::{Config, APP_NAME, VERSION};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// wallust-themes - VS Code themes from the wallust palette
#[derive(Parser)]
#[command(name = "wallust-themes")]
#[command(version = VERSION)]
#[command(about = "Generate VS Code color themes from the wallust palette", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Regenerate both themes once and exit
    Update,

    /// Watch the wallust cache and regenerate on change (default)
    Watch,

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Update config with new defaults (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// What main should run after argument handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Update,
    Watch,
}

/// Handle CLI commands. Returns None when the command was fully handled
/// here (exit after), otherwise the action needing the runtime.
pub fn handle_cli() -> Option<Action> {
    dispatch(Cli::parse())
}

fn dispatch(cli: Cli) -> Option<Action> {
    match cli.command {
        Some(Commands::Update) => Some(Action::Update),
        Some(Commands::Watch) | None => Some(Action::Watch),
        Some(Commands::Config {
            show,
            reset,
            edit,
            update,
            path,
        }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else if edit {
                handle_config_edit();
            } else if update {
                handle_config_update();
            } else {
                // No flag provided, show help
                println!("Usage: {APP_NAME} config [--show|--reset|--edit|--update|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
                println!("  --update  Update config with new defaults (preserves user values)");
                println!("  --path    Show config file path");
            }
            None
        }
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("auto_update = {}", config.auto_update);
    println!("startup_delay_ms = {}", config.startup_delay_ms);
    println!("debounce_ms = {}", config.debounce_ms);
    println!("cache_dir = {:?}", config.cache_dir.display().to_string());
    println!("themes_dir = {:?}", config.themes_dir.display().to_string());
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!(
        "file_dir = {:?}",
        config.logging.file_dir.display().to_string()
    );
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() && !confirm(&format!("Replace {} with the default template?", path.display())) {
        println!("Left {} unchanged.", path.display());
        return;
    }

    if let Err(e) = Config::default().save() {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Wrote default config to {}", path.display());
}

/// y/N prompt on stderr; anything but "y" declines
fn confirm(question: &str) -> bool {
    eprint!("{question} [y/N] ");
    let _ = std::io::stderr().flush();

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer).is_ok() && answer.trim().eq_ignore_ascii_case("y")
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = editor_command(|key| std::env::var(key).ok());
    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(status) if status.success() => {
            println!("A running `{APP_NAME} watch` picks up auto_update changes on save.");
        }
        Ok(status) => {
            eprintln!("{editor} exited with {status}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Could not start {editor}: {e}");
            eprintln!("Set $VISUAL or $EDITOR to choose another editor.");
            std::process::exit(1);
        }
    }
}

/// $VISUAL, then $EDITOR, then a platform default
fn editor_command(env: impl Fn(&str) -> Option<String>) -> String {
    let set = |key: &str| env(key).filter(|e| !e.trim().is_empty());
    set("VISUAL")
        .or_else(|| set("EDITOR"))
        .unwrap_or_else(|| if cfg!(windows) { "notepad" } else { "nano" }.to_string())
}

fn handle_config_update() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
        return;
    }

    // Only the file's values are carried over; env overrides stay out of it
    let existing = match Config::from_file(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Fix the file or run `{APP_NAME} config --reset`.");
            std::process::exit(1);
        }
    };

    let backup_path = path.with_extension("toml.bak");
    if let Err(e) = std::fs::copy(&path, &backup_path) {
        eprintln!("Warning: Could not create backup: {}", e);
    } else {
        println!("Backup created: {}", backup_path.display());
    }

    if let Err(e) = existing.save() {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
}
