//! Download and extraction progress reporting.
//!
//! Providers drive a [`ProgressObserver`] instead of drawing to the terminal
//! directly; the CLI installs an indicatif-backed observer and tests use the
//! silent one.

use indicatif::{ProgressBar, ProgressStyle};

/// Observes the two phases of a template download.
///
/// Each phase is opened with its expected length, advanced as data or
/// entries arrive, and closed when the phase completes.
pub trait ProgressObserver {
    /// A byte stream of `total_bytes` is about to start.
    fn start_download(&mut self, label: &str, total_bytes: u64);

    /// `bytes` more bytes were written to local storage.
    fn download_advanced(&mut self, bytes: u64);

    /// An archive of `total_entries` entries is about to be extracted.
    fn start_extraction(&mut self, label: &str, total_entries: u64);

    /// One archive entry was extracted.
    fn entry_extracted(&mut self);

    /// The current phase finished (success or failure).
    fn finish(&mut self);
}

/// Observer that reports nothing. Used by tests and quiet mode.
#[derive(Debug, Default)]
pub struct SilentObserver;

impl ProgressObserver for SilentObserver {
    fn start_download(&mut self, _label: &str, _total_bytes: u64) {}
    fn download_advanced(&mut self, _bytes: u64) {}
    fn start_extraction(&mut self, _label: &str, _total_entries: u64) {}
    fn entry_extracted(&mut self) {}
    fn finish(&mut self) {}
}

/// Terminal progress bars backed by indicatif.
#[derive(Default)]
pub struct TerminalObserver {
    bar: Option<ProgressBar>,
}

impl TerminalObserver {
    /// Create an observer with no active bar.
    pub fn new() -> Self {
        Self::default()
    }

    fn byte_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{msg}\n  [{bar:40.magenta}] {bytes}/{total_bytes} ({eta})")
            .unwrap()
            .progress_chars("=> ")
    }

    fn entry_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{msg}\n  [{bar:40.magenta}] {pos}/{len}")
            .unwrap()
            .progress_chars("=> ")
    }
}

impl ProgressObserver for TerminalObserver {
    fn start_download(&mut self, label: &str, total_bytes: u64) {
        let bar = ProgressBar::new(total_bytes);
        bar.set_style(Self::byte_style());
        bar.set_message(label.to_string());
        self.bar = Some(bar);
    }

    fn download_advanced(&mut self, bytes: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(bytes);
        }
    }

    fn start_extraction(&mut self, label: &str, total_entries: u64) {
        let bar = ProgressBar::new(total_entries);
        bar.set_style(Self::entry_style());
        bar.set_message(label.to_string());
        self.bar = Some(bar);
    }

    fn entry_extracted(&mut self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

/// Observer that tallies callbacks for assertions.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct CountingObserver {
    pub downloads_started: usize,
    pub bytes_seen: u64,
    pub extractions_started: usize,
    pub entries_seen: u64,
    pub finishes: usize,
}

#[cfg(test)]
impl ProgressObserver for CountingObserver {
    fn start_download(&mut self, _label: &str, _total_bytes: u64) {
        self.downloads_started += 1;
    }
    fn download_advanced(&mut self, bytes: u64) {
        self.bytes_seen += bytes;
    }
    fn start_extraction(&mut self, _label: &str, _total_entries: u64) {
        self.extractions_started += 1;
    }
    fn entry_extracted(&mut self) {
        self.entries_seen += 1;
    }
    fn finish(&mut self) {
        self.finishes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_observer_accepts_all_callbacks() {
        let mut observer = SilentObserver;
        observer.start_download("kernel-template.zip", 1024);
        observer.download_advanced(512);
        observer.finish();
        observer.start_extraction("kernel-template.zip", 3);
        observer.entry_extracted();
        observer.finish();
    }

    #[test]
    fn counting_observer_tallies_phases() {
        let mut observer = CountingObserver::default();
        observer.start_download("x", 100);
        observer.download_advanced(60);
        observer.download_advanced(40);
        observer.finish();
        observer.start_extraction("x", 2);
        observer.entry_extracted();
        observer.entry_extracted();
        observer.finish();

        assert_eq!(observer.downloads_started, 1);
        assert_eq!(observer.bytes_seen, 100);
        assert_eq!(observer.extractions_started, 1);
        assert_eq!(observer.entries_seen, 2);
        assert_eq!(observer.finishes, 2);
    }
}
