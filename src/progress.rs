//! Progress reporting on the status stream
//!
//! Workers send one notification per processed file over an unbounded
//! channel, so sending never blocks. A dedicated thread counts them and
//! writes a status line every [`REPORT_EVERY`] files, plus a final summary
//! once every sender is gone. Status output is best effort: write errors are
//! ignored and never affect the scan.

use std::io::{self, Write};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{Receiver, Sender, unbounded};
use tracing::trace;

/// A status line is written after this many notifications.
pub const REPORT_EVERY: usize = 100;

/// Sending half used by file processors.
#[derive(Debug, Clone)]
pub struct ProgressSender(Sender<String>);

impl ProgressSender {
    /// Report one processed file.
    pub fn notify(&self, rel_path: &str) {
        // Only fails if the reporter thread died; progress is not worth a panic.
        let _ = self.0.send(rel_path.to_string());
    }
}

/// Background progress thread and its sender.
pub struct ProgressReporter {
    sender: ProgressSender,
    handle: JoinHandle<usize>,
}

impl ProgressReporter {
    /// Start the reporter thread writing to `out`.
    pub fn spawn<W: Write + Send + 'static>(out: W) -> io::Result<Self> {
        let (tx, rx) = unbounded();
        let handle = thread::Builder::new()
            .name("srccat-progress".to_string())
            .spawn(move || report(rx, out))?;

        Ok(Self {
            sender: ProgressSender(tx),
            handle,
        })
    }

    pub fn sender(&self) -> &ProgressSender {
        &self.sender
    }

    /// Close the channel, wait for the final summary, and return the count.
    ///
    /// Clones of the sender must be dropped first or this blocks.
    pub fn finish(self) -> usize {
        drop(self.sender);
        self.handle.join().unwrap_or(0)
    }
}

fn report<W: Write>(rx: Receiver<String>, mut out: W) -> usize {
    let start = Instant::now();
    let mut count = 0usize;

    for path in rx.iter() {
        count += 1;
        trace!(path = %path, count, "processed");
        if count % REPORT_EVERY == 0 {
            let _ = write!(
                out,
                "\rProcessed {} files in {}",
                count,
                format_elapsed(start.elapsed())
            );
            let _ = out.flush();
        }
    }

    let _ = writeln!(
        out,
        "\rProcessed {} files in {}",
        count,
        format_elapsed(start.elapsed())
    );
    let _ = out.flush();
    count
}

/// Format a duration rounded to whole seconds, e.g. `42s`, `3m5s`, `1h0m2s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = (elapsed.as_millis() + 500) / 1000;
    let (hours, mins, secs) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if hours > 0 {
        format!("{}h{}m{}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m{}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}
