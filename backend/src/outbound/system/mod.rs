//! Operating-system adapters.

mod sysinfo_process_monitor;

pub use sysinfo_process_monitor::SysinfoProcessMonitor;
