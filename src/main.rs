// wallust-themes - VS Code color themes from the wallust palette
//
// Reads the 16-color palette wallust leaves in its cache directory and
// writes two VS Code theme files (plain and bordered). Runs once with
// `update`, or as a daemon that regenerates when the palette changes.
//
// Architecture:
// - source: reads `colors` (+ optional `colors.json` sidecar) into a Palette
// - theme: renders a Palette into a theme document per variant
// - writer: writes both variants, each file independently
// - generate: one cycle (load, write, report through a Notifier)
// - watch: notify watchers, debounce and the daemon event loop

mod cli;
mod config;
mod generate;
mod logging;
mod palette;
mod source;
mod startup;
mod theme;
mod watch;
mod writer;

use anyhow::Result;
use cli::Action;
use config::Config;
use generate::Generator;
use logging::{ConsoleNotifier, Notifier};
use source::ColorSource;
use writer::ThemeWriter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Config subcommands are handled (and exit) here
    let Some(action) = cli::handle_cli() else {
        return Ok(());
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Held for the whole run so buffered file logs are flushed
    let _log_guard = logging::init(&config.logging);

    let notifier = ConsoleNotifier::new();

    match action {
        Action::Update => {
            let generator = Generator::new(
                ColorSource::new(&config.cache_dir),
                ThemeWriter::new(&config.themes_dir),
            );
            let outcome = generator.run(&notifier);

            for path in &outcome.written {
                notifier.info(&format!("Wrote {}", path.display()));
            }

            if !outcome.is_success() {
                // Flush file logs before exiting
                drop(_log_guard);
                std::process::exit(1);
            }
        }
        Action::Watch => {
            startup::print_startup(&config);
            startup::log_startup(&config);
            watch::run(config, notifier).await?;
        }
    }

    Ok(())
}
