//! The diagnostic logger context.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use crate::env::{parse_indent_width, parse_yesno, EnvSource, ProcessEnv};

/// Prefix stamped on every message, matching the driver package name.
pub const PACKAGE_NAME: &str = "vdpau-video";

/// Fixed log file for debug and trace output.
pub const DEFAULT_LOG_PATH: &str = "/tmp/vdpau-video-debug.log";

/// Enables debug logging when set to a yes value.
pub const DEBUG_ENV: &str = "VDPAU_VIDEO_DEBUG";

/// Enables trace output when set to a yes value. Checked by callers, not
/// by [`DiagLogger::trace_write`].
pub const TRACE_ENV: &str = "VDPAU_VIDEO_TRACE";

/// Trace indent width in spaces.
pub const TRACE_INDENT_WIDTH_ENV: &str = "VDPAU_VIDEO_TRACE_INDENT_WIDTH";

const DEFAULT_INDENT_WIDTH: usize = 4;

struct TraceState {
    indent: i32,
    at_line_start: bool,
}

/// Diagnostics context for the driver shim.
///
/// Constructed once and shared by every call site. All gating state is
/// resolved lazily, on first use, and cached for the lifetime of the
/// context: the debug and trace gates, the indent width, and the log file
/// handle itself. The log file is opened in append mode at most once; if
/// the open fails, debug and trace writes are dropped silently so a broken
/// log path never disturbs the host program.
pub struct DiagLogger {
    env: Box<dyn EnvSource>,
    log_path: PathBuf,
    messages: Mutex<Box<dyn Write + Send>>,
    debug_enabled: OnceLock<bool>,
    trace_enabled: OnceLock<bool>,
    indent_width: OnceLock<usize>,
    log_file: OnceLock<Option<Mutex<File>>>,
    trace: Mutex<TraceState>,
}

impl DiagLogger {
    /// Logger over the process environment, writing messages to standard
    /// output and debug/trace output to [`DEFAULT_LOG_PATH`].
    pub fn new() -> Self {
        Self::with_sources(ProcessEnv, DEFAULT_LOG_PATH, io::stdout())
    }

    /// Logger with an explicit environment source, log path, and message
    /// sink. This is the seam for embedding and for tests; the driver
    /// itself uses [`DiagLogger::new`].
    pub fn with_sources(
        env: impl EnvSource + 'static,
        log_path: impl Into<PathBuf>,
        messages: impl Write + Send + 'static,
    ) -> Self {
        Self {
            env: Box::new(env),
            log_path: log_path.into(),
            messages: Mutex::new(Box::new(messages)),
            debug_enabled: OnceLock::new(),
            trace_enabled: OnceLock::new(),
            indent_width: OnceLock::new(),
            log_file: OnceLock::new(),
            trace: Mutex::new(TraceState {
                indent: 0,
                at_line_start: true,
            }),
        }
    }

    /// Write an error message to the message sink, prefixed
    /// `vdpau-video: error: `. Unconditional; no trailing newline is
    /// added, the caller controls line structure.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        if let Ok(mut sink) = self.messages.lock() {
            let _ = write!(sink, "{}: error: ", PACKAGE_NAME);
            let _ = sink.write_fmt(args);
        }
    }

    /// Write an information message to the message sink, prefixed
    /// `vdpau-video: `. Unconditional.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        if let Ok(mut sink) = self.messages.lock() {
            let _ = write!(sink, "{}: ", PACKAGE_NAME);
            let _ = sink.write_fmt(args);
        }
    }

    /// Write a debug message to the log file, prefixed
    /// `vdpau-video(<pid>): `.
    ///
    /// Returns without side effects when `VDPAU_VIDEO_DEBUG` does not
    /// resolve to yes; the log file is not even opened. When enabled the
    /// file is flushed after every message so a crash does not lose
    /// buffered output.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if !self.debug_enabled() {
            return;
        }
        if let Some(file) = self.log_file() {
            if let Ok(mut file) = file.lock() {
                let _ = write!(file, "{}({}): ", PACKAGE_NAME, std::process::id());
                let _ = file.write_fmt(args);
                let _ = file.flush();
            }
        }
    }

    /// Whether trace output is active, resolved from `VDPAU_VIDEO_TRACE`
    /// on first call and cached.
    ///
    /// Public so callers can skip building expensive trace arguments when
    /// tracing is off. [`DiagLogger::trace_write`] does not perform this
    /// check itself.
    pub fn trace_enabled(&self) -> bool {
        *self
            .trace_enabled
            .get_or_init(|| self.resolve_yesno(TRACE_ENV))
    }

    /// Adjust the trace nesting level by `delta`. The level may go
    /// negative; that is a caller error and is not validated.
    pub fn trace_indent(&self, delta: i32) {
        if let Ok(mut trace) = self.trace.lock() {
            trace.indent += delta;
        }
    }

    /// Write trace output to the shared log file.
    ///
    /// At the start of a line the package prefix is written first, then
    /// one indent unit per nesting level: `width / 4` four-space blocks
    /// followed by `width % 4` single spaces.
    ///
    /// This function does not check [`DiagLogger::trace_enabled`]; callers
    /// gate themselves (unlike [`DiagLogger::debug`], which gates
    /// internally).
    ///
    /// `template` is the unexpanded format string. The line-start tracker
    /// is recomputed from the template, not the expanded output, so a
    /// newline that arrives only through a substituted argument does not
    /// reset it and the next write is not re-indented. The
    /// [`trace_print!`](crate::trace_print) macro passes the template
    /// automatically. The file is flushed whenever the template ends the
    /// line.
    pub fn trace_write(&self, template: &str, args: fmt::Arguments<'_>) {
        if let Some(file) = self.log_file() {
            if let Ok(mut trace) = self.trace.lock() {
                if let Ok(mut file) = file.lock() {
                    if trace.at_line_start {
                        let _ = write!(file, "{}: ", PACKAGE_NAME);
                        let width = self.indent_width();
                        for _ in 0..trace.indent {
                            for _ in 0..width / 4 {
                                let _ = file.write_all(b"    ");
                            }
                            for _ in 0..width % 4 {
                                let _ = file.write_all(b" ");
                            }
                        }
                    }
                    let _ = file.write_fmt(args);
                    trace.at_line_start = template.contains('\n');
                    if trace.at_line_start {
                        let _ = file.flush();
                    }
                }
            }
        }
    }

    fn debug_enabled(&self) -> bool {
        *self
            .debug_enabled
            .get_or_init(|| self.resolve_yesno(DEBUG_ENV))
    }

    fn indent_width(&self) -> usize {
        *self.indent_width.get_or_init(|| {
            self.env
                .var(TRACE_INDENT_WIDTH_ENV)
                .and_then(|value| parse_indent_width(&value).ok())
                .unwrap_or(DEFAULT_INDENT_WIDTH)
        })
    }

    fn resolve_yesno(&self, name: &str) -> bool {
        self.env
            .var(name)
            .and_then(|value| parse_yesno(&value).ok())
            .unwrap_or(false)
    }

    /// The shared log file handle. One open attempt per context lifetime;
    /// a failed open is cached as `None` and writers drop their output.
    fn log_file(&self) -> &Option<Mutex<File>> {
        self.log_file.get_or_init(|| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_path)
                .ok()
                .map(Mutex::new)
        })
    }
}

impl Default for DiagLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Format like `print!` and emit through [`DiagLogger::error`].
#[macro_export]
macro_rules! error_message {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(::std::format_args!($($arg)*))
    };
}

/// Format like `print!` and emit through [`DiagLogger::info`].
#[macro_export]
macro_rules! info_message {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(::std::format_args!($($arg)*))
    };
}

/// Format like `print!` and emit through [`DiagLogger::debug`].
#[macro_export]
macro_rules! debug_message {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(::std::format_args!($($arg)*))
    };
}

/// Format like `print!` and emit through [`DiagLogger::trace_write`],
/// passing the format template alongside the expanded arguments so the
/// line-start tracker sees the template literal.
#[macro_export]
macro_rules! trace_print {
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $logger.trace_write($fmt, ::std::format_args!($fmt $(, $arg)*))
    };
}
