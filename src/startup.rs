// Startup module - displays banner and daemon status
//
// Shows version info, where configuration came from, the palette and theme
// paths, and which parts of the daemon are active.

use crate::config::{Config, VERSION};
use crate::source::ColorSource;

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Module status for display
pub struct ModuleStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: &'static str,
}

/// Print the startup banner and daemon status
pub fn print_startup(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}wallust-themes{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}VS Code themes from the wallust palette{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }

    let source = ColorSource::new(&config.cache_dir);
    let palette_icon = if source.colors_path().exists() {
        format!("{GREEN}✓{RESET}")
    } else {
        format!("{YELLOW}!{RESET}")
    };
    println!(
        "  {DIM}Palette:{RESET} {palette_icon} {}",
        source.colors_path().display()
    );
    if source.json_path().exists() {
        println!(
            "  {DIM}Sidecar:{RESET} {GREEN}✓{RESET} {}",
            source.json_path().display()
        );
    }
    println!("  {DIM}Themes:{RESET}  {}", config.themes_dir.display());
    println!();

    for module in &get_module_status(config) {
        print_module_status(module);
    }
    println!();

    if config.auto_update {
        println!(
            "  {MAGENTA}▸{RESET} First generation in {BOLD}{}ms{RESET}",
            config.startup_delay_ms
        );
    } else {
        println!("  {YELLOW}▸{RESET} Auto update off {DIM}(SIGUSR1 or `update` to generate){RESET}");
    }
    println!();
}

fn get_module_status(config: &Config) -> Vec<ModuleStatus> {
    vec![
        ModuleStatus {
            name: "generator",
            enabled: true, // Core, always on
            description: "Theme generation",
        },
        ModuleStatus {
            name: "watcher",
            enabled: config.auto_update,
            description: "Palette file watcher",
        },
        ModuleStatus {
            name: "config",
            enabled: Config::config_path().is_some(),
            description: "Live config reload",
        },
        ModuleStatus {
            name: "log-file",
            enabled: config.logging.file_enabled,
            description: "JSON file logging",
        },
    ]
}

fn print_module_status(module: &ModuleStatus) {
    use colors::*;

    let (icon, style) = if module.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<12}{RESET} {DIM}{}{RESET}",
        module.name, module.description
    );
}

/// Mirror the startup status into the log (file logs have no banner)
pub fn log_startup(config: &Config) {
    tracing::info!(version = VERSION, "wallust-themes starting");
    for module in &get_module_status(config) {
        let icon = if module.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, module.name, module.description);
    }
    tracing::info!(
        cache_dir = %config.cache_dir.display(),
        themes_dir = %config.themes_dir.display(),
        "paths"
    );
}
