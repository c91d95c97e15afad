//! Tracing setup driven by environment variables.
//!
//! `NEOVIM_DOUBLETAP_LOG_FILE` selects the sink: a path appends to that
//! file, `-` logs to stderr, and unset disables logging. The level comes
//! from `NEOVIM_DOUBLETAP_LOG_LEVEL` (a level name or a full filter
//! directive), falling back to `RUST_LOG`, then `info`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub const LOG_LEVEL_ENV: &str = "NEOVIM_DOUBLETAP_LOG_LEVEL";
pub const LOG_FILE_ENV: &str = "NEOVIM_DOUBLETAP_LOG_FILE";

const CRATES: [&str; 3] = ["doubletap_config", "doubletap_input", "doubletap_editor"];
const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
	Disabled,
	Stderr,
	File(PathBuf),
}

impl LogTarget {
	/// Interprets the value of [`LOG_FILE_ENV`].
	pub fn from_env_value(value: Option<&str>) -> Self {
		match value.map(str::trim) {
			None | Some("") => LogTarget::Disabled,
			Some("-") => LogTarget::Stderr,
			Some(path) => LogTarget::File(PathBuf::from(path)),
		}
	}
}

/// Builds the filter directive for a configured level.
///
/// A bare level name applies to this plugin's crates only; anything else
/// is passed through as a directive.
pub fn filter_directive(level: Option<&str>) -> String {
	let level = match level.map(str::trim) {
		None | Some("") => "info".to_string(),
		Some(level) => level.to_ascii_lowercase(),
	};
	if LEVELS.contains(&level.as_str()) {
		CRATES.map(|krate| format!("{krate}={level}")).join(",")
	} else {
		level
	}
}

/// Installs a global subscriber from the environment.
///
/// Returns `false` if logging is disabled, the log file cannot be opened,
/// or a subscriber was already set.
pub fn init_tracing() -> bool {
	let level = std::env::var(LOG_LEVEL_ENV).ok();
	let target = LogTarget::from_env_value(std::env::var(LOG_FILE_ENV).ok().as_deref());
	init_with(level.as_deref(), target)
}

pub fn init_with(level: Option<&str>, target: LogTarget) -> bool {
	let filter = match level {
		Some(level) => EnvFilter::try_new(filter_directive(Some(level))).ok(),
		None => EnvFilter::try_from_default_env().ok(),
	}
	.unwrap_or_else(|| EnvFilter::new(filter_directive(None)));

	match target {
		LogTarget::Disabled => false,
		LogTarget::Stderr => {
			let layer = tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_target(true);
			tracing_subscriber::registry().with(filter).with(layer).try_init().is_ok()
		}
		LogTarget::File(path) => {
			let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
				return false;
			};
			let layer = tracing_subscriber::fmt::layer()
				.with_writer(Mutex::new(file))
				.with_ansi(false)
				.with_target(true);
			let installed = tracing_subscriber::registry().with(filter).with(layer).try_init().is_ok();
			if installed {
				tracing::info!(path = ?path, "doubletap tracing initialized");
			}
			installed
		}
	}
}
