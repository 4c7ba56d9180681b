//! Output routing for `alert` and `fd-write`.
//!
//! Output can go to different destinations:
//! - the process's stdout/stderr (the driver)
//! - in-memory buffers (tests, embedding hosts)
//! - nowhere
//!
//! Uses enum dispatch rather than trait objects; the set of destinations is
//! closed.

use cesky_value::HandleKind;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Writes straight to the process's standard streams.
#[derive(Default)]
pub struct StdioPrintHandler;

impl StdioPrintHandler {
    pub fn write(&self, target: HandleKind, text: &str) {
        // A closed pipe is not an evaluation error; drop the output.
        let _ = match target {
            HandleKind::Stdout => {
                let mut out = std::io::stdout().lock();
                out.write_all(text.as_bytes()).and_then(|()| out.flush())
            }
            HandleKind::Stderr => std::io::stderr().lock().write_all(text.as_bytes()),
        };
    }
}

/// Captures output in memory, one buffer per stream.
pub struct BufferPrintHandler {
    stdout: Mutex<String>,
    stderr: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            stdout: Mutex::new(String::new()),
            stderr: Mutex::new(String::new()),
        }
    }

    pub fn write(&self, target: HandleKind, text: &str) {
        match target {
            HandleKind::Stdout => self.stdout.lock().push_str(text),
            HandleKind::Stderr => self.stderr.lock().push_str(text),
        }
    }

    /// Everything written to stdout so far.
    pub fn get_output(&self) -> String {
        self.stdout.lock().clone()
    }

    /// Everything written to stderr so far.
    pub fn get_errors(&self) -> String {
        self.stderr.lock().clone()
    }

    pub fn clear(&self) {
        self.stdout.lock().clear();
        self.stderr.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

pub enum PrintHandlerImpl {
    /// Process stdout/stderr (default).
    Stdio(StdioPrintHandler),
    /// In-memory capture.
    Buffer(BufferPrintHandler),
    /// Discards everything.
    Silent,
}

impl PrintHandlerImpl {
    pub fn write(&self, target: HandleKind, text: &str) {
        match self {
            Self::Stdio(h) => h.write(target, text),
            Self::Buffer(h) => h.write(target, text),
            Self::Silent => {}
        }
    }

    /// Write `text` followed by a newline.
    pub fn write_line(&self, target: HandleKind, text: &str) {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        self.write(target, &line);
    }

    /// Captured stdout; empty for handlers that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdio(_) | Self::Silent => String::new(),
        }
    }

    /// Captured stderr; empty for handlers that do not capture.
    pub fn get_errors(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_errors(),
            Self::Stdio(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Print handler shared between a machine and its host.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdio_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdio(StdioPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
mod tests;
