pub mod models;
pub mod services;
pub mod api;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::info;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt,
    fmt::format::{DefaultFields, Format},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_FILE_PREFIX: &str = "textscope_";
const LOG_FILES_KEPT: usize = 30;

fn env_flag(key: &str) -> bool {
    matches!(
        std::env::var(key).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE")
    )
}

/// Log file opened for one CLI invocation.
///
/// Lines are written by a background worker; they reach disk once `guard`
/// is dropped.
pub struct SessionLog {
    pub path: PathBuf,
    writer: NonBlocking,
    guard: WorkerGuard,
}

impl SessionLog {
    /// Create `logs_dir` if needed and open a timestamped log file in it.
    pub fn open(logs_dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(logs_dir)?;
        let name = format!(
            "{}{}.log",
            LOG_FILE_PREFIX,
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let (writer, guard) = tracing_appender::non_blocking(rolling::never(logs_dir, &name));
        Ok(Self {
            path: logs_dir.join(name),
            writer,
            guard,
        })
    }
}

fn file_layer<S>(writer: NonBlocking) -> fmt::Layer<S, DefaultFields, Format, NonBlocking>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
}

fn logs_dir() -> PathBuf {
    match std::env::var("TEXTSCOPE_LOG_DIR") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => dirs::data_local_dir()
            .map(|d| d.join("textscope").join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs")),
    }
}

/// Install the global subscriber for a CLI run.
///
/// Returns the file writer's guard; the caller keeps it alive until the
/// process is about to exit so buffered lines are flushed. `None` means no
/// file is being written (disabled, or the directory could not be created)
/// and logs go to stderr only. Stdout is left free for results.
pub fn init_logging() -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let session = if env_flag("TEXTSCOPE_DISABLE_FILE_LOG") {
        None
    } else {
        let dir = logs_dir();
        match SessionLog::open(&dir) {
            Ok(session) => Some(session),
            Err(e) => {
                eprintln!("Cannot open log directory {}: {}", dir.display(), e);
                None
            }
        }
    };

    // release builds only echo to stderr when there is no file to read later
    let console = (cfg!(debug_assertions) || session.is_none()).then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(cfg!(debug_assertions))
            .with_target(true)
    });

    let (file, guard, path) = match session {
        Some(SessionLog { path, writer, guard }) => (Some(file_layer(writer)), Some(guard), Some(path)),
        None => (None, None, None),
    };

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(file)
        .with(console)
        .try_init()
        .is_err()
    {
        eprintln!("Logging was already initialized");
        return guard;
    }

    if let Some(path) = path {
        info!(
            log_file = %path.display(),
            version = env!("CARGO_PKG_VERSION"),
            "logging.started"
        );
        // runs inline: a short-lived process may exit before a background thread finishes
        if !env_flag("TEXTSCOPE_DISABLE_LOG_CLEANUP") {
            if let Some(dir) = path.parent() {
                prune_session_logs(dir, LOG_FILES_KEPT);
            }
        }
    }

    guard
}

/// Delete all but the `keep` most recently modified session logs in `dir`.
/// Files not named like session logs are left alone.
fn prune_session_logs(dir: &Path, keep: usize) {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return;
    };

    let mut logs: Vec<(SystemTime, PathBuf)> = read_dir
        .filter_map(Result::ok)
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log")
        })
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .collect();

    // newest first
    logs.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, path) in logs.into_iter().skip(keep) {
        let _ = fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_session_logs_keeps_newest() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            fs::write(dir.path().join(format!("textscope_2024010{}_000000.log", i)), "x").unwrap();
        }
        fs::write(dir.path().join("other.log"), "x").unwrap();

        prune_session_logs(dir.path(), 2);

        let remaining: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(remaining.iter().filter(|n| n.starts_with(LOG_FILE_PREFIX)).count(), 2);
        assert!(remaining.contains(&"other.log".to_string()));
    }

    #[test]
    fn test_session_log_flushed_when_guard_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let logs_dir = dir.path().join("nested").join("logs");
        let SessionLog { path, writer, guard } = SessionLog::open(&logs_dir).unwrap();
        assert!(path.starts_with(&logs_dir));

        let subscriber = tracing_subscriber::registry().with(file_layer(writer));
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("[API] detect failed: provider unreachable");
            tracing::info!("[API] done status=500");
        });
        drop(guard);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[API] detect failed: provider unreachable"));
        assert!(contents.contains("[API] done status=500"));
    }
}
