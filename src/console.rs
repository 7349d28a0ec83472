//! Console sink and the standalone console printers.
//!
//! A [`Console`] is a cheap, cloneable handle to a shared writer. The default
//! writes to standard error; tests point it at a [`CaptureBuffer`].

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::timestamp::{self, MonthStyle};

/// Shared console writer.
#[derive(Clone)]
pub struct Console {
    target: Arc<Mutex<Box<dyn Write + Send>>>,
    month_style: MonthStyle,
}

impl Console {
    /// Console bound to standard error.
    pub fn stderr() -> Self {
        Self::from_writer(io::stderr())
    }

    /// Console bound to an arbitrary writer.
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            target: Arc::new(Mutex::new(Box::new(writer))),
            month_style: MonthStyle::default(),
        }
    }

    /// Console that records everything into a buffer the caller can inspect.
    pub fn capture() -> (Self, CaptureBuffer) {
        let buffer = CaptureBuffer::default();
        (Self::from_writer(buffer.clone()), buffer)
    }

    /// Set how stamps printed by this console render the month.
    pub fn with_month_style(mut self, style: MonthStyle) -> Self {
        self.month_style = style;
        self
    }

    /// Month style used by [`Console::show_time`] and [`Console::show`].
    pub fn month_style(&self) -> MonthStyle {
        self.month_style
    }

    /// Write raw bytes. Console failures are never surfaced to callers.
    pub(crate) fn emit(&self, parts: &[&str]) {
        let mut target = self.target.lock().unwrap_or_else(PoisonError::into_inner);
        for part in parts {
            if target.write_all(part.as_bytes()).is_err() {
                return;
            }
        }
        let _ = target.flush();
    }

    /// Print the current stamp.
    pub fn show_time(&self) {
        let stamp = timestamp::line_stamp(&timestamp::now(), self.month_style);
        self.emit(&[&stamp]);
    }

    /// Print `text` as is.
    pub fn show_text(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.emit(&[text]);
    }

    /// Print the current stamp followed by `text`.
    pub fn show(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        let stamp = timestamp::line_stamp(&timestamp::now(), self.month_style);
        self.emit(&[&stamp, text]);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("month_style", &self.month_style)
            .finish_non_exhaustive()
    }
}

/// In-memory console target.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer(Arc<Mutex<Vec<u8>>>);

impl CaptureBuffer {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Discard captured output.
    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Print the current stamp to standard error.
pub fn show_time() {
    Console::stderr().show_time();
}

/// Print `text` to standard error as is.
pub fn show_text(text: &str) {
    Console::stderr().show_text(text);
}

/// Print the current stamp and `text` to standard error.
pub fn show(text: &str) {
    Console::stderr().show(text);
}
