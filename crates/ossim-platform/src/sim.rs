//! Simulated implementations of the platform services.

use std::time::{Duration, Instant};

use ossim_types::config::ShellConfig;
use ossim_types::error::{OssimError, Result};
use ossim_types::time::Timestamp;

use crate::services::{
    DiskDevice, DiskOp, DiskRequest, DiskSnapshot, ProcessInfo, ProcessStatus, ProcessTable, TimeService,
};

/// Processes started when the table is created.
const SYSTEM_PROCESSES: [&str; 4] = ["system", "init", "kernel", "scheduler"];

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Wall-clock time service backed by `std::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopClock;

impl DesktopClock {
    pub fn new() -> Self {
        Self
    }
}

impl TimeService for DesktopClock {
    fn now(&self) -> Result<Timestamp> {
        Ok(Timestamp::now())
    }
}

// ---------------------------------------------------------------------------
// Process table
// ---------------------------------------------------------------------------

/// In-memory process table with sequential pids and synthetic load figures.
pub struct SimProcessTable {
    processes: Vec<ProcessInfo>,
    next_pid: u32,
    system_pid_limit: u32,
}

impl SimProcessTable {
    /// Create a table and start the system processes (pids 1..=4).
    pub fn new(system_pid_limit: u32) -> Self {
        let mut table = Self {
            processes: Vec::new(),
            next_pid: 1,
            system_pid_limit,
        };
        for name in SYSTEM_PROCESSES {
            table.spawn(name, Vec::new());
        }
        table
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(config.system_pid_limit)
    }

    fn spawn(&mut self, name: &str, args: Vec<String>) -> ProcessInfo {
        let pid = self.next_pid;
        self.next_pid += 1;
        let info = ProcessInfo {
            pid,
            name: name.to_string(),
            status: ProcessStatus::Running,
            cpu_percent: synthetic_cpu(pid),
            memory_mb: synthetic_memory(pid),
            start_time: Timestamp::now(),
            args,
        };
        self.processes.push(info.clone());
        info
    }
}

/// Deterministic stand-in for a measured CPU figure (5..=24 %).
fn synthetic_cpu(pid: u32) -> u8 {
    (5 + pid.wrapping_mul(7) % 20) as u8
}

/// Deterministic stand-in for a measured resident size (20..=119 MB).
fn synthetic_memory(pid: u32) -> u32 {
    20 + pid.wrapping_mul(37) % 100
}

impl ProcessTable for SimProcessTable {
    fn list_processes(&self) -> Vec<ProcessInfo> {
        self.processes.clone()
    }

    fn start_process(&mut self, name: &str, args: &[String]) -> Result<ProcessInfo> {
        if name.is_empty() {
            return Err(OssimError::InvalidArgument(
                "process name must not be empty".to_string(),
            ));
        }
        let info = self.spawn(name, args.to_vec());
        log::debug!("Started process {} ({})", info.pid, info.name);
        Ok(info)
    }

    fn kill_process(&mut self, pid: u32) -> Result<()> {
        let limit = self.system_pid_limit;
        let process = self
            .processes
            .iter_mut()
            .find(|p| p.pid == pid)
            .ok_or_else(|| OssimError::NotFound(format!("no process with PID {pid}")))?;
        if pid < limit {
            log::warn!("Refusing to kill system process {pid}");
            return Err(OssimError::PermissionDenied(format!(
                "PID {pid} is a system process"
            )));
        }
        process.status = ProcessStatus::Terminated;
        log::debug!("Terminated process {pid}");
        Ok(())
    }

    fn exit_process(&mut self, pid: u32) -> Result<()> {
        let process = self
            .processes
            .iter_mut()
            .find(|p| p.pid == pid)
            .ok_or_else(|| OssimError::NotFound(format!("no process with PID {pid}")))?;
        process.status = ProcessStatus::Terminated;
        log::debug!("Process {pid} exited");
        Ok(())
    }

    fn reap(&mut self) -> usize {
        let before = self.processes.len();
        self.processes
            .retain(|p| p.status != ProcessStatus::Terminated);
        before - self.processes.len()
    }

    fn kill_user_processes(&mut self) -> usize {
        let limit = self.system_pid_limit;
        let mut killed = 0;
        for process in &mut self.processes {
            if process.pid >= limit && process.status != ProcessStatus::Terminated {
                process.status = ProcessStatus::Terminated;
                killed += 1;
            }
        }
        killed
    }
}

// ---------------------------------------------------------------------------
// Disk
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct DiskJob {
    request: DiskRequest,
    deadline: Instant,
}

/// Disk whose transfers take a fixed time per MB.
pub struct SimDisk {
    capacity_mb: u32,
    used_mb: u32,
    read_ms_per_mb: u64,
    write_ms_per_mb: u64,
    jobs: Vec<DiskJob>,
}

impl SimDisk {
    pub fn new(capacity_mb: u32, used_mb: u32, read_ms_per_mb: u64, write_ms_per_mb: u64) -> Self {
        Self {
            capacity_mb,
            used_mb: used_mb.min(capacity_mb),
            read_ms_per_mb,
            write_ms_per_mb,
            jobs: Vec::new(),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(
            config.disk_capacity_mb,
            config.disk_used_mb,
            config.read_ms_per_mb,
            config.write_ms_per_mb,
        )
    }

    fn duration_of(&self, request: &DiskRequest) -> Duration {
        let per_mb = match request.op {
            DiskOp::Read => self.read_ms_per_mb,
            DiskOp::Write => self.write_ms_per_mb,
        };
        Duration::from_millis(per_mb.saturating_mul(u64::from(request.size_mb)))
    }
}

impl DiskDevice for SimDisk {
    fn snapshot(&self) -> DiskSnapshot {
        DiskSnapshot {
            capacity_mb: self.capacity_mb,
            used_mb: self.used_mb,
        }
    }

    fn submit(&mut self, request: DiskRequest, now: Instant) -> Result<()> {
        if request.op == DiskOp::Write && !self.snapshot().fits(request.size_mb) {
            log::warn!(
                "Rejected {} MB write: {} MB free",
                request.size_mb,
                self.snapshot().free_mb()
            );
            return Err(OssimError::InvalidArgument(
                "Disk: Insufficient space for write operation.".to_string(),
            ));
        }
        let deadline = now + self.duration_of(&request);
        log::debug!(
            "Scheduled disk {} of {} MB for pid {}",
            request.op.verb(),
            request.size_mb,
            request.pid
        );
        self.jobs.push(DiskJob { request, deadline });
        Ok(())
    }

    fn poll(&mut self, now: Instant) -> Vec<DiskRequest> {
        let (mut done, pending): (Vec<DiskJob>, Vec<DiskJob>) =
            self.jobs.drain(..).partition(|job| job.deadline <= now);
        self.jobs = pending;
        done.sort_by_key(|job| job.deadline);
        for job in &done {
            if job.request.op == DiskOp::Write {
                self.used_mb = self
                    .used_mb
                    .saturating_add(job.request.size_mb)
                    .min(self.capacity_mb);
            }
        }
        done.into_iter().map(|job| job.request).collect()
    }

    fn pending(&self) -> usize {
        self.jobs.len()
    }
}
