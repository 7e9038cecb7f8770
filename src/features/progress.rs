// progress.rs — Observers notified after every dataset line is processed.

use std::io::{self, Write};

use crate::config;

pub trait ProgressObserver {
    /// Called after line `processed` (1-based) of `total` has been pooled.
    fn on_line(&mut self, processed: usize, total: usize);

    /// Called once after the last line.
    fn finish(&mut self) {}
}

/// Default observer: does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_line(&mut self, _processed: usize, _total: usize) {}
}

/// Adapts a closure into a [`ProgressObserver`].
pub struct ProgressFn<F>(pub F);

impl<F: FnMut(usize, usize)> ProgressObserver for ProgressFn<F> {
    fn on_line(&mut self, processed: usize, total: usize) {
        (self.0)(processed, total)
    }
}

impl<P: ProgressObserver + ?Sized> ProgressObserver for &mut P {
    fn on_line(&mut self, processed: usize, total: usize) {
        (**self).on_line(processed, total)
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}

/// Text progress bar, e.g. `[=====     ] 50%`, redrawn in place with `\r`.
pub struct ConsoleProgress<W: Write> {
    out: W,
    last_percent: Option<usize>,
}

impl ConsoleProgress<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out, last_percent: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, percent: usize) -> io::Result<()> {
        let filled = percent * config::progress::BAR_WIDTH / 100;
        write!(
            self.out,
            "\r[{:<width$}] {}%",
            "=".repeat(filled),
            percent,
            width = config::progress::BAR_WIDTH
        )?;
        self.out.flush()
    }
}

impl<W: Write> ProgressObserver for ConsoleProgress<W> {
    fn on_line(&mut self, processed: usize, total: usize) {
        if total == 0 {
            return;
        }
        let percent = processed.min(total) * 100 / total;
        if self.last_percent == Some(percent) {
            return;
        }
        self.last_percent = Some(percent);
        // Progress is cosmetic; a closed stderr must not fail extraction.
        if let Err(e) = self.draw(percent) {
            log::debug!("progress bar write failed: {}", e);
        }
    }

    fn finish(&mut self) {
        if self.last_percent.take().is_some() {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
        }
    }
}
