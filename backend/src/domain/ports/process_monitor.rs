//! Port for sampling resource usage of the running server process.
use super::define_port_error;

define_port_error! {
    /// Failures raised while reading process statistics.
    pub enum ProcessStatsError {
        /// The operating system did not report on the current process.
        Unavailable { message: String } => "process statistics unavailable: {message}",
    }
}

/// Point-in-time resource usage of the current process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessStats {
    /// CPU usage since the previous sample; may exceed 100 on multi-core hosts.
    pub cpu_percent: f32,
    /// Resident memory as a share of total physical memory.
    pub memory_percent: f32,
    pub threads: usize,
}

#[cfg_attr(test, mockall::automock)]
pub trait ProcessMonitor: Send + Sync {
    /// Sample the current process.
    ///
    /// CPU readings cover the interval since the previous call, so the first
    /// one is not meaningful.
    fn sample(&self) -> Result<ProcessStats, ProcessStatsError>;
}
