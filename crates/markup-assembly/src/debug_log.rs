//! Plain-text debug trace of hook firings.
//!
//! Each entry is one line, `<Source> | <EntryType>: <EntryMessage>`, appended
//! to a file, written to a page output stream, or both. Failures to write are
//! reported through `tracing` and otherwise ignored.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use markup_config::DebugConfig;

type PageOutput = Mutex<Box<dyn Write + Send>>;

/// Debug trace sink.
#[derive(Default)]
pub struct DebugLog {
    file: Option<PathBuf>,
    page: Option<PageOutput>,
}

impl DebugLog {
    /// A log that writes nowhere.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Build from resolved configuration. Page logging goes to stdout.
    #[must_use]
    pub fn from_config(config: &DebugConfig) -> Self {
        let mut log = Self::disabled();
        if !config.enabled() {
            return log;
        }
        if config.file_logging {
            log = log.with_file(&config.log_file);
        }
        if config.page_logging {
            log = log.with_page_output(io::stdout());
        }
        log
    }

    /// Append entries to `path`, creating it if needed.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Write entries to `out`.
    #[must_use]
    pub fn with_page_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.page = Some(Mutex::new(Box::new(out)));
        self
    }

    /// Whether any output is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.file.is_some() || self.page.is_some()
    }

    /// Record one entry.
    pub fn entry(&self, source: &str, entry_type: &str, message: &str) {
        if !self.is_enabled() {
            return;
        }

        let line = format_entry(source, entry_type, message);

        if let Some(path) = &self.file
            && let Err(e) = append_line(path, &line)
        {
            tracing::warn!(path = %path.display(), error = %e, "Failed to write debug log");
        }

        if let Some(page) = &self.page {
            let Ok(mut out) = page.lock() else {
                tracing::warn!("Debug page output lock poisoned");
                return;
            };
            if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
                tracing::warn!(error = %e, "Failed to write debug page output");
            }
        }
    }
}

impl fmt::Debug for DebugLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugLog")
            .field("file", &self.file)
            .field("page", &self.page.is_some())
            .finish()
    }
}

/// Format one debug log line.
///
/// # Example
///
/// ```
/// use markup_assembly::format_entry;
///
/// assert_eq!(
///     format_entry("section-title", "hook", "section-title_markup"),
///     "section-title | hook: section-title_markup"
/// );
/// ```
#[must_use]
pub fn format_entry(source: &str, entry_type: &str, message: &str) -> String {
    format!("{source} | {entry_type}: {message}")
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}
