use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// The spinner currently on screen, if any. Log output is routed around it.
static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Clears the spinner when dropped.
pub struct SpinnerHandle {
    spinner: ProgressBar,
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        if let Ok(mut active) = ACTIVE.lock() {
            *active = None;
        }
        self.spinner.finish_and_clear();
    }
}

/// Shows a spinner until the returned handle is dropped.
///
/// Hidden entirely when `hidden` is set (e.g. bare output mode).
pub fn start(msg: &str, hidden: bool) -> SpinnerHandle {
    let pb = if hidden {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };

    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS);

    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    if let Ok(mut active) = ACTIVE.lock() {
        *active = Some(pb.clone());
    }

    SpinnerHandle { spinner: pb }
}

/// Writes to stdout, suspending the active spinner so lines do not tear.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let active: Option<ProgressBar> = ACTIVE.lock().ok().and_then(|guard| guard.clone());
        match active {
            Some(pb) => pb.suspend(|| io::stdout().write_all(buf))?,
            None => io::stdout().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
