//! `sysinfo`-backed [`ProcessMonitor`].

use std::sync::{Mutex, PoisonError};

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

use crate::domain::ports::{ProcessMonitor, ProcessStats, ProcessStatsError};

/// Samples the current process through `sysinfo`.
///
/// The `System` handle is kept between samples so CPU usage is measured over
/// the interval since the previous request.
pub struct SysinfoProcessMonitor {
    system: Mutex<System>,
}

impl Default for SysinfoProcessMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProcessMonitor {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl ProcessMonitor for SysinfoProcessMonitor {
    fn sample(&self) -> Result<ProcessStats, ProcessStatsError> {
        let pid = sysinfo::get_current_pid().map_err(ProcessStatsError::unavailable)?;
        let mut system = self.system.lock().unwrap_or_else(PoisonError::into_inner);
        system.refresh_memory();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::everything(),
        );

        let total_memory = system.total_memory();
        let process = system.process(pid).ok_or_else(|| {
            ProcessStatsError::unavailable(format!("process {pid} is not visible"))
        })?;

        let memory_percent = if total_memory == 0 {
            0.0
        } else {
            (process.memory() as f64 / total_memory as f64 * 100.0) as f32
        };

        Ok(ProcessStats {
            cpu_percent: process.cpu_usage(),
            memory_percent,
            threads: process.tasks().map_or(1, |tasks| tasks.len().max(1)),
        })
    }
}
