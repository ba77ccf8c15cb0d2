// Daemon event loop
//
// Everything runs on one task: file change signals, the debounce deadline,
// the delayed startup generation, config reloads and process signals. A
// generation cycle runs to completion before the next event is looked at.

use std::future::Future;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use super::{AutoUpdate, ConfigListener, SourceWatcher};
use crate::config::Config;
use crate::generate::Generator;
use crate::logging::{ConsoleNotifier, Notice, NoticeBuffer, Notifier, Severity};
use crate::source::ColorSource;
use crate::writer::ThemeWriter;

/// Pending file change signals; one queued signal is already enough
const CHANGE_BUFFER: usize = 8;

const SIGNAL_BUFFER: usize = 4;

/// Warnings and errors repeated in the shutdown summary
const SUMMARY_NOTICES: usize = 10;

/// Run until Ctrl+C or SIGTERM.
pub async fn run(config: Config, notifier: ConsoleNotifier) -> anyhow::Result<()> {
    let generator = Generator::new(
        ColorSource::new(&config.cache_dir),
        ThemeWriter::new(&config.themes_dir),
    );
    tracing::debug!(
        themes_dir = %generator.writer().themes_dir().display(),
        "daemon ready"
    );

    let (change_tx, changes) = mpsc::channel::<()>(CHANGE_BUFFER);
    let source = generator.source().clone();
    let mut auto = AutoUpdate::new(config.debounce(), move || {
        SourceWatcher::spawn(&source, change_tx.clone())
    });

    let startup_at = begin(
        &mut auto,
        config.auto_update,
        config.startup_delay(),
        &notifier,
    );

    let inputs = Inputs {
        changes,
        flags: spawn_config_listener(config.auto_update),
        signals: spawn_signal_forwarder()?,
    };

    event_loop(&generator, &mut auto, startup_at, inputs, &notifier).await;

    auto.shutdown();
    log_summary(notifier.history());

    Ok(())
}

/// Event sources the loop reacts to besides its own timers
struct Inputs {
    changes: mpsc::Receiver<()>,
    flags: Option<watch::Receiver<bool>>,
    signals: mpsc::Receiver<DaemonSignal>,
}

/// Enable watching when `auto_update` is set and return when the startup
/// generation is due. Nothing is scheduled otherwise.
fn begin<W>(
    auto: &mut AutoUpdate<W>,
    auto_update: bool,
    startup_delay: Duration,
    notifier: &dyn Notifier,
) -> Option<Instant> {
    if !auto_update {
        tracing::info!("auto update disabled; run `update` or send SIGUSR1 to generate");
        return None;
    }

    let startup_at = Instant::now() + startup_delay;
    enable(auto, true, notifier);
    Some(startup_at)
}

/// Returns on a shutdown signal or once the signal source is gone.
async fn event_loop<W>(
    generator: &Generator,
    auto: &mut AutoUpdate<W>,
    mut startup_at: Option<Instant>,
    mut inputs: Inputs,
    notifier: &dyn Notifier,
) {
    loop {
        tokio::select! {
            Some(()) = inputs.changes.recv() => {
                auto.on_change(Instant::now());
            }
            _ = sleep_until(auto.deadline()) => {
                if auto.take_due(Instant::now()) {
                    tracing::debug!("palette changed, regenerating");
                    generator.run(notifier);
                }
            }
            _ = sleep_until(startup_at) => {
                startup_at = None;
                tracing::debug!("startup generation");
                generator.run(notifier);
            }
            enabled = next_flag(&mut inputs.flags) => {
                enable(auto, enabled, notifier);
            }
            signal = inputs.signals.recv() => match signal {
                Some(DaemonSignal::Regenerate) => {
                    tracing::info!("SIGUSR1 received, regenerating");
                    generator.run(notifier);
                }
                Some(DaemonSignal::Shutdown) | None => break,
            },
        }
    }
}

fn enable<W>(auto: &mut AutoUpdate<W>, enabled: bool, notifier: &dyn Notifier) {
    if let Err(e) = auto.set_enabled(enabled) {
        notifier.error(&format!("Could not watch wallust cache: {e}"));
    }
}

/// Spawn the config listener; None when there is no config path.
fn spawn_config_listener(initial: bool) -> Option<watch::Receiver<bool>> {
    let path = Config::config_path()?;
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        if let Err(e) = ConfigListener::new(path).run(tx).await {
            tracing::warn!(error = %e, "config changes will not be picked up");
        }
    });

    Some(rx)
}

/// Next published flag. Pends forever once there is no listener.
async fn next_flag(slot: &mut Option<watch::Receiver<bool>>) -> bool {
    if let Some(rx) = slot {
        if rx.changed().await.is_ok() {
            return *rx.borrow_and_update();
        }
        tracing::debug!("config listener stopped");
        *slot = None;
    }
    std::future::pending().await
}

/// Sleep until `deadline`; pends forever without one.
fn sleep_until(deadline: Option<Instant>) -> impl Future<Output = ()> {
    async move {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}

/// Latest warnings and errors, oldest first
fn recent_problems(history: &NoticeBuffer, limit: usize) -> Vec<Notice> {
    let mut problems: Vec<Notice> = history
        .get_all()
        .into_iter()
        .filter(|n| n.severity != Severity::Info)
        .collect();
    let skip = problems.len().saturating_sub(limit);
    problems.drain(..skip);
    problems
}

fn log_summary(history: &NoticeBuffer) {
    tracing::info!(
        warnings = history.count(Severity::Warning),
        errors = history.count(Severity::Error),
        "shutting down"
    );
    for notice in recent_problems(history, SUMMARY_NOTICES) {
        tracing::info!(
            at = %notice.timestamp.format("%H:%M:%S"),
            severity = notice.severity.as_str(),
            "  {}",
            notice.message
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Process signals
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DaemonSignal {
    Regenerate,
    Shutdown,
}

/// Forward process signals into a channel the event loop can select on.
fn spawn_signal_forwarder() -> std::io::Result<mpsc::Receiver<DaemonSignal>> {
    let mut signals = Signals::new()?;
    let (tx, rx) = mpsc::channel(SIGNAL_BUFFER);

    tokio::spawn(async move {
        loop {
            let signal = signals.recv().await;
            let last = signal == DaemonSignal::Shutdown;
            if tx.send(signal).await.is_err() || last {
                break;
            }
        }
    });

    Ok(rx)
}

/// Resolves on Ctrl+C. If the handler cannot be installed the error is
/// logged and this never resolves.
async fn interrupted<F>(ctrl_c: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = ctrl_c.await {
        tracing::error!(error = %e, "could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

struct Signals {
    #[cfg(unix)]
    usr1: tokio::signal::unix::Signal,
    #[cfg(unix)]
    term: tokio::signal::unix::Signal,
}

impl Signals {
    #[cfg(unix)]
    fn new() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self {
            usr1: signal(SignalKind::user_defined1())?,
            term: signal(SignalKind::terminate())?,
        })
    }

    #[cfg(not(unix))]
    fn new() -> std::io::Result<Self> {
        Ok(Self {})
    }

    #[cfg(unix)]
    async fn recv(&mut self) -> DaemonSignal {
        tokio::select! {
            Some(()) = self.usr1.recv() => DaemonSignal::Regenerate,
            Some(()) = self.term.recv() => DaemonSignal::Shutdown,
            () = interrupted(tokio::signal::ctrl_c()) => DaemonSignal::Shutdown,
        }
    }

    #[cfg(not(unix))]
    async fn recv(&mut self) -> DaemonSignal {
        interrupted(tokio::signal::ctrl_c()).await;
        DaemonSignal::Shutdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tokio::time::sleep;

    const STARTUP: Duration = Duration::from_secs(10);
    const DEBOUNCE: Duration = Duration::from_millis(300);

    /// Test side of the loop's inputs
    struct Handles {
        changes: mpsc::Sender<()>,
        flags: watch::Sender<bool>,
        signals: mpsc::Sender<DaemonSignal>,
    }

    fn inputs(initial: bool) -> (Handles, Inputs) {
        let (changes_tx, changes) = mpsc::channel(CHANGE_BUFFER);
        let (flags_tx, flags) = watch::channel(initial);
        let (signals_tx, signals) = mpsc::channel(SIGNAL_BUFFER);
        let handles = Handles {
            changes: changes_tx,
            flags: flags_tx,
            signals: signals_tx,
        };
        let inputs = Inputs {
            changes,
            flags: Some(flags),
            signals,
        };
        (handles, inputs)
    }

    fn counting() -> (AutoUpdate<u32>, Rc<Cell<u32>>) {
        let spawned = Rc::new(Cell::new(0));
        let counter = spawned.clone();
        let auto = AutoUpdate::new(DEBOUNCE, move || {
            counter.set(counter.get() + 1);
            Ok(counter.get())
        });
        (auto, spawned)
    }

    /// Generator over an empty cache: every cycle reports exactly one error
    fn generator(dir: &tempfile::TempDir) -> Generator {
        Generator::new(
            ColorSource::new(dir.path()),
            ThemeWriter::new(dir.path().join("themes")),
        )
    }

    fn cycles(notices: &NoticeBuffer) -> usize {
        notices.count(Severity::Error)
    }

    #[tokio::test(start_paused = true)]
    async fn startup_generation_runs_once_after_the_delay() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(&dir);
        let notices = NoticeBuffer::new();
        let (mut auto, spawned) = counting();
        let (handles, inputs) = inputs(true);

        let startup_at = begin(&mut auto, true, STARTUP, &notices);
        assert!(startup_at.is_some());
        assert_eq!(spawned.get(), 1);

        let script = async {
            sleep(STARTUP - Duration::from_millis(100)).await;
            assert_eq!(cycles(&notices), 0);

            sleep(Duration::from_millis(200)).await;
            assert_eq!(cycles(&notices), 1);

            sleep(Duration::from_secs(60)).await;
            assert_eq!(cycles(&notices), 1);

            handles.signals.send(DaemonSignal::Shutdown).await.unwrap();
        };

        tokio::join!(
            event_loop(&generator, &mut auto, startup_at, inputs, &notices),
            script
        );
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_at_startup_schedules_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(&dir);
        let notices = NoticeBuffer::new();
        let (mut auto, spawned) = counting();
        let (handles, inputs) = inputs(false);

        let startup_at = begin(&mut auto, false, STARTUP, &notices);
        assert!(startup_at.is_none());

        let script = async {
            handles.changes.send(()).await.unwrap();
            sleep(STARTUP * 6).await;
            assert_eq!(cycles(&notices), 0);
            assert_eq!(spawned.get(), 0);

            handles.signals.send(DaemonSignal::Shutdown).await.unwrap();
        };

        tokio::join!(
            event_loop(&generator, &mut auto, startup_at, inputs, &notices),
            script
        );
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_changes_generates_once() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(&dir);
        let notices = NoticeBuffer::new();
        let (mut auto, _) = counting();
        let (handles, inputs) = inputs(true);
        let startup_at = begin(&mut auto, true, STARTUP, &notices);

        let script = async {
            sleep(STARTUP + Duration::from_millis(1)).await;
            assert_eq!(cycles(&notices), 1);

            for _ in 0..3 {
                handles.changes.send(()).await.unwrap();
                sleep(Duration::from_millis(100)).await;
            }
            // 200 ms after the last change
            sleep(Duration::from_millis(100)).await;
            assert_eq!(cycles(&notices), 1);

            sleep(Duration::from_millis(101)).await;
            assert_eq!(cycles(&notices), 2);

            sleep(Duration::from_secs(5)).await;
            assert_eq!(cycles(&notices), 2);

            handles.signals.send(DaemonSignal::Shutdown).await.unwrap();
        };

        tokio::join!(
            event_loop(&generator, &mut auto, startup_at, inputs, &notices),
            script
        );
    }

    #[tokio::test(start_paused = true)]
    async fn regenerate_signal_skips_the_debounce() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(&dir);
        let notices = NoticeBuffer::new();
        let (mut auto, _) = counting();
        let (handles, inputs) = inputs(false);
        let startup_at = begin(&mut auto, false, STARTUP, &notices);

        let script = async {
            handles.signals.send(DaemonSignal::Regenerate).await.unwrap();
            sleep(Duration::from_millis(1)).await;
            assert_eq!(cycles(&notices), 1);

            handles.signals.send(DaemonSignal::Regenerate).await.unwrap();
            sleep(Duration::from_millis(1)).await;
            assert_eq!(cycles(&notices), 2);

            handles.signals.send(DaemonSignal::Shutdown).await.unwrap();
        };

        tokio::join!(
            event_loop(&generator, &mut auto, startup_at, inputs, &notices),
            script
        );
    }

    #[tokio::test(start_paused = true)]
    async fn config_flag_toggles_watching() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(&dir);
        let notices = NoticeBuffer::new();
        let (mut auto, spawned) = counting();
        let (handles, inputs) = inputs(false);
        let startup_at = begin(&mut auto, false, STARTUP, &notices);

        let script = async {
            handles.flags.send(true).unwrap();
            sleep(Duration::from_millis(1)).await;
            assert_eq!(spawned.get(), 1);

            handles.changes.send(()).await.unwrap();
            sleep(DEBOUNCE * 2).await;
            assert_eq!(cycles(&notices), 1);

            // Pending change is dropped with the watcher
            handles.changes.send(()).await.unwrap();
            sleep(Duration::from_millis(1)).await;
            handles.flags.send(false).unwrap();
            sleep(DEBOUNCE * 2).await;
            assert_eq!(cycles(&notices), 1);

            handles.signals.send(DaemonSignal::Shutdown).await.unwrap();
        };

        tokio::join!(
            event_loop(&generator, &mut auto, startup_at, inputs, &notices),
            script
        );
        assert!(!auto.is_watching());
    }

    #[tokio::test(start_paused = true)]
    async fn loop_ends_when_signal_source_closes() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(&dir);
        let notices = NoticeBuffer::new();
        let (mut auto, _) = counting();
        let (handles, inputs) = inputs(false);

        drop(handles.signals);
        event_loop(&generator, &mut auto, None, inputs, &notices).await;
    }

    #[tokio::test(start_paused = true)]
    async fn failed_ctrl_c_handler_does_not_shut_down() {
        let failed = interrupted(async { Err(std::io::Error::other("no handler")) });
        assert!(tokio::time::timeout(Duration::from_secs(60), failed)
            .await
            .is_err());

        interrupted(async { Ok(()) }).await;
    }

    #[test]
    fn summary_keeps_latest_problems_only() {
        let history = NoticeBuffer::new();
        history.info("Wrote plain theme");
        for i in 0..SUMMARY_NOTICES + 2 {
            history.error(&format!("failure {i}"));
        }
        history.warn("last");

        let recent = recent_problems(&history, SUMMARY_NOTICES);
        assert_eq!(recent.len(), SUMMARY_NOTICES);
        assert_eq!(recent[0].message, "failure 3");
        assert_eq!(recent.last().unwrap().message, "last");
        assert!(recent.iter().all(|n| n.severity != Severity::Info));
    }
}
