// src/stats/reporter.rs
use crate::engine::orchestrator::StateSlot;
use crate::utils::error::AuditError;
use crossbeam_channel::{RecvTimeoutError, Sender, bounded};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use sysinfo::System;

/// Point-in-time view of the run being observed
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    /// Stage currently executing
    pub stage: String,
    /// Candidates hashed so far (flushed counts only)
    pub attempts: u64,
    /// Time since the run started
    pub elapsed: Duration,
    /// Average hashes per second since the run started
    pub rate: f64,
    /// Whether a winner has been claimed
    pub found: bool,
}

/// Statistics related to host load
#[derive(Debug, Clone)]
pub struct HardwareStats {
    /// Current CPU usage percentage (0-100)
    pub cpu_usage: f32,
    /// Memory currently used on the host (in bytes)
    pub memory_used: u64,
}

/// Periodically logs search progress and host load
///
/// Reads whatever state the auditor last published into its slot; it never
/// touches the engine otherwise.
pub struct StatsReporter {
    slot: StateSlot,
    system: System,
    report_interval: Duration,
}

impl StatsReporter {
    /// Creates a reporter watching `slot`
    ///
    /// # Arguments
    /// * `slot` - State slot from [`crate::engine::Auditor::state_slot`]
    /// * `report_interval` - How often to log progress
    pub fn new(slot: StateSlot, report_interval: Duration) -> Self {
        StatsReporter {
            slot,
            system: System::new(),
            report_interval,
        }
    }

    /// Current progress, if a run has been published
    pub fn snapshot(&self) -> Option<ProgressSnapshot> {
        let state = self.slot.load_full()?;
        let attempts = state.attempts();
        let elapsed = state.elapsed();
        let secs = elapsed.as_secs_f64();
        Some(ProgressSnapshot {
            stage: state.stage(),
            attempts,
            elapsed,
            rate: if secs > 0.0 { attempts as f64 / secs } else { 0.0 },
            found: state.winner().is_some(),
        })
    }

    /// Gets the current hardware statistics
    ///
    /// This refreshes system information before returning the stats.
    pub fn get_hardware_stats(&mut self) -> HardwareStats {
        self.system.refresh_cpu_all();
        self.system.refresh_memory();

        HardwareStats {
            cpu_usage: self.system.global_cpu_usage(),
            memory_used: self.system.used_memory(),
        }
    }

    /// Starts periodic reporting on a background thread
    ///
    /// The thread wakes every interval and exits as soon as the returned
    /// handle is stopped or dropped.
    pub fn start_reporting(mut self) -> Result<ReporterHandle, AuditError> {
        let (shutdown, rx) = bounded::<()>(1);
        let interval = self.report_interval;

        let thread = thread::Builder::new()
            .name("audit-stats".into())
            .spawn(move || {
                // CPU usage needs two samples; take the first one now.
                self.system.refresh_cpu_all();
                loop {
                    match rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => self.report(),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })?;

        Ok(ReporterHandle {
            shutdown,
            thread: Some(thread),
        })
    }

    fn report(&mut self) {
        let Some(progress) = self.snapshot() else {
            return;
        };
        let hw = self.get_hardware_stats();
        log::info!(
            "Stage: {} | Attempts: {} | Rate: {:.2} H/s | CPU: {:.1}% | Mem: {} MiB",
            progress.stage,
            progress.attempts,
            progress.rate,
            hw.cpu_usage,
            hw.memory_used / (1024 * 1024)
        );
    }
}

/// Running reporter; stops it when dropped
pub struct ReporterHandle {
    shutdown: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl ReporterHandle {
    /// Signals the reporter thread and waits for it to exit
    pub fn stop(mut self) {
        self.shutdown_and_join();
    }

    fn shutdown_and_join(&mut self) {
        let _ = self.shutdown.try_send(());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("Stats reporter thread panicked");
            }
        }
    }
}

impl Drop for ReporterHandle {
    fn drop(&mut self) {
        self.shutdown_and_join();
    }
}
