//! # vdpau-video-diag
//!
//! Diagnostics for the vdpau-video driver shim.
//!
//! Error and information messages go to standard output. Debug and trace
//! output is gated by environment variables and appended to a fixed log
//! file, so diagnostics can be turned on in the field without rebuilding
//! the host application.
//!
//! ## Key Types
//!
//! - [`DiagLogger`] - The logger context shared by all call sites
//! - [`EnvSource`] - Environment lookup seam (process env by default)
//!
//! ## Environment Variables
//!
//! - `VDPAU_VIDEO_DEBUG` - yes/no, enables debug logging to the log file
//! - `VDPAU_VIDEO_TRACE` - yes/no, enables trace output (caller-checked)
//! - `VDPAU_VIDEO_TRACE_INDENT_WIDTH` - trace indent width in spaces, default 4
//!
//! Each variable is read once, on first use; later changes to the process
//! environment have no effect. A missing or unwritable log file disables
//! debug/trace output silently rather than disturbing the host program.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vdpau_video_diag::{info_message, trace_print, DiagLogger};
//!
//! let diag = DiagLogger::new();
//!
//! info_message!(diag, "decoder initialized\n");
//!
//! if diag.trace_enabled() {
//!     trace_print!(diag, "render_surface()\n");
//!     diag.trace_indent(1);
//!     trace_print!(diag, "surface: {}\n", surface_id);
//!     diag.trace_indent(-1);
//! }
//! ```

mod env;
mod logger;

pub use env::{parse_indent_width, parse_yesno, EnvSource, EnvValueError, ProcessEnv};
pub use logger::{
    DiagLogger, DEBUG_ENV, DEFAULT_LOG_PATH, PACKAGE_NAME, TRACE_ENV, TRACE_INDENT_WIDTH_ENV,
};
