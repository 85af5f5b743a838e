// RazerBattery - app/monitor.rs
//
// Periodic status checks on a background thread.
//
// Architecture:
//   - `MonitorManager` lives on the consuming thread; `run_monitor` runs on a
//     background thread calling `status::check_status` on a fixed interval.
//   - An `Arc<AtomicBool>` cancel flag stops the loop.
//   - Each result is sent as `MonitorUpdate::Status` over an mpsc channel, so
//     whatever displays it (terminal, tray, window) owns its own state and
//     never shares a mutable handle with the poll loop.
//
// The poll sleep is split into MONITOR_CANCEL_CHECK_INTERVAL_MS slices so a
// stop request is honoured promptly even with long intervals.

use crate::app::status;
use crate::core::model::MonitorUpdate;
use crate::util::constants::MONITOR_CANCEL_CHECK_INTERVAL_MS;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

/// Manages the background status monitor.
pub struct MonitorManager {
    /// Channel receiver for status updates.
    pub update_rx: Option<mpsc::Receiver<MonitorUpdate>>,
    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl MonitorManager {
    pub fn new() -> Self {
        Self {
            update_rx: None,
            cancel_flag: None,
        }
    }

    /// Start checking `base_dir` every `interval`, beginning immediately.
    ///
    /// A monitor that is already running is stopped first and its channel
    /// dropped.
    pub fn start(&mut self, base_dir: PathBuf, interval: Duration) {
        self.stop();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.update_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        tracing::info!(
            base = %base_dir.display(),
            interval_secs = interval.as_secs(),
            "Status monitor started"
        );

        std::thread::spawn(move || {
            run_monitor(base_dir, interval, tx, cancel);
        });
    }

    /// Request the background thread to stop.
    ///
    /// The receiver is kept so the final `MonitorUpdate::Stopped` can still be
    /// observed.
    pub fn stop(&mut self) {
        if let Some(flag) = self.cancel_flag.take() {
            flag.store(true, Ordering::SeqCst);
        }
    }

    /// Returns `true` while a monitor thread is running and not asked to stop.
    pub fn is_active(&self) -> bool {
        self.cancel_flag.is_some()
    }

    /// Drain all queued updates without blocking.
    pub fn poll_updates(&self) -> Vec<MonitorUpdate> {
        let mut updates = Vec::new();
        if let Some(rx) = &self.update_rx {
            while let Ok(update) = rx.try_recv() {
                updates.push(update);
            }
        }
        updates
    }

    /// Block for the next update, up to `timeout`.
    ///
    /// `None` on timeout, when no monitor was started, or when the thread has
    /// exited and every update was consumed.
    pub fn wait_update(&self, timeout: Duration) -> Option<MonitorUpdate> {
        self.update_rx.as_ref()?.recv_timeout(timeout).ok()
    }
}

impl Default for MonitorManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background loop
// =============================================================================

fn run_monitor(
    base_dir: PathBuf,
    interval: Duration,
    tx: mpsc::Sender<MonitorUpdate>,
    cancel: Arc<AtomicBool>,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                // Consumer gone; exit silently.
                return;
            }
        };
    }

    let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
    let slices = (interval_ms / MONITOR_CANCEL_CHECK_INTERVAL_MS).max(1);

    loop {
        if cancel.load(Ordering::SeqCst) {
            send!(MonitorUpdate::Stopped);
            return;
        }

        let outcome = status::check_status(&base_dir);
        match &outcome {
            Ok(report) => tracing::debug!(
                devices = report.statuses.len(),
                file = %report.log_file.display(),
                "Monitor: status checked"
            ),
            Err(e) => tracing::debug!(error = e.name(), "Monitor: status unavailable"),
        }
        send!(MonitorUpdate::Status(outcome));

        for _ in 0..slices {
            std::thread::sleep(Duration::from_millis(MONITOR_CANCEL_CHECK_INTERVAL_MS));
            if cancel.load(Ordering::SeqCst) {
                send!(MonitorUpdate::Stopped);
                return;
            }
        }
    }
}
