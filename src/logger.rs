use std::{path::Path, sync::OnceLock};
use tracing_subscriber::{EnvFilter, fmt};

static GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

/// Initialize file logging once for the whole process.
/// - `path`: e.g. "logs/rookery.log"
/// - `filter`: e.g. "rookery=debug"; `RUST_LOG` wins when set.
pub fn init<P: AsRef<Path>>(path: P, filter: &str) {
    INIT.get_or_init(|| {
        let path = path.as_ref();

        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }

        let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(path) else {
            // Logging is best-effort; the game runs fine without a file.
            return;
        };

        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        // The guard must outlive the process for the writer to flush.
        let _ = GUARD.set(guard);

        let env_filter = if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let subscriber = fmt()
            .with_env_filter(env_filter)
            .with_ansi(false)
            .with_target(true)
            .with_writer(non_blocking)
            .finish();

        // Idempotent if a subscriber was already installed (tests).
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
