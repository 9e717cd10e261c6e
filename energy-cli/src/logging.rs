//! Process-wide logging for the advisor binary.
//!
//! Log records go to stderr so that reports on stdout stay machine-readable.
//! A second layer writes to a log file once [`enable_file_logging`] has been
//! called. One reloadable level filter caps both layers.

use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::{Result, anyhow, bail};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;

/// `<timestamp> <LEVEL> <file>:<line> <fields>`, dimmed and colored on a terminal.
struct TimestampedFormat;

impl<S, N> FormatEvent<S, N> for TimestampedFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if ansi {
            write!(writer, "\x1b[2m{timestamp}\x1b[0m ")?;
        } else {
            write!(writer, "{timestamp} ")?;
        }

        let color = match *meta.level() {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        };
        if ansi {
            write!(writer, "{color}{:>5}\x1b[0m ", meta.level())?;
        } else {
            write!(writer, "{:>5} ", meta.level())?;
        }

        let file = meta
            .file()
            .map(|f| f.rsplit_once("src/").map_or(f, |(_, rest)| rest));
        if let (Some(file), Some(line)) = (file, meta.line()) {
            write!(writer, "{file}:{line} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

type SharedFile = Arc<Mutex<Option<File>>>;

fn lock_file(slot: &SharedFile) -> MutexGuard<'_, Option<File>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writer that discards records until a file is attached.
#[derive(Clone)]
struct FileSlot(SharedFile);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(lock_file(&self.0))
    }
}

type SetLevelFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;
type SetEnabledFn = Box<dyn Fn(bool) -> Result<()> + Send + Sync>;

static SET_LEVEL: OnceLock<SetLevelFn> = OnceLock::new();
static SET_CONSOLE: OnceLock<SetEnabledFn> = OnceLock::new();
static LOG_FILE: OnceLock<SharedFile> = OnceLock::new();

fn reloader<S>(
    handle: reload::Handle<EnvFilter, S>,
    what: &'static str,
) -> impl Fn(EnvFilter) -> Result<()> + Send + Sync
where
    S: Subscriber + Send + Sync + 'static,
{
    move |filter| {
        handle
            .reload(filter)
            .map_err(|e| anyhow!("{what} filter reload failed: {e}"))
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
///
/// Calling this twice leaves the first subscriber in place.
pub fn init_logging(default_level: &str) {
    let file: SharedFile = Arc::new(Mutex::new(None));
    let _ = LOG_FILE.set(Arc::clone(&file));

    let initial = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let (level_filter, level_handle) = reload::Layer::new(initial);
    let (console_gate, console_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(TimestampedFormat)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(console_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(TimestampedFormat)
        .with_ansi(false)
        .with_writer(FileSlot(file));

    let installed = tracing_subscriber::registry()
        .with(level_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        let set_level = reloader(level_handle, "level");
        let _ = SET_LEVEL.set(Box::new(move |level: &str| {
            let filter = EnvFilter::try_new(level)
                .map_err(|e| anyhow!("invalid log level '{level}': {e}"))?;
            set_level(filter)
        }));

        let set_console = reloader(console_handle, "console");
        let _ = SET_CONSOLE.set(Box::new(move |enabled: bool| {
            set_console(EnvFilter::new(if enabled { "trace" } else { "off" }))
        }));
    }
}

/// Changes the level filter at runtime. Accepts a bare level or any
/// `EnvFilter` directive.
pub fn set_log_level(level: &str) -> Result<()> {
    match SET_LEVEL.get() {
        Some(set) => set(level),
        None => bail!("logging not yet initialized"),
    }
}

/// Shows or hides stderr output without affecting the log file.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    match SET_CONSOLE.get() {
        Some(set) => set(enabled),
        None => bail!("logging not yet initialized"),
    }
}

/// Appends log output to `path`, replacing any file already attached.
/// The directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow!("cannot open log file '{}': {e}", path.display()))?;

    match LOG_FILE.get() {
        Some(slot) => {
            *lock_file(slot) = Some(file);
            Ok(())
        }
        None => bail!("logging not yet initialized"),
    }
}

/// Applies the `[logging]` section to the running subscriber. The level
/// is left alone when `RUST_LOG` is set.
pub fn apply_config(config: &LoggingConfig) -> Result<()> {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
        set_log_level(&config.level)?;
    }
    if let Some(file) = &config.file {
        enable_file_logging(file)?;
    }
    Ok(())
}
