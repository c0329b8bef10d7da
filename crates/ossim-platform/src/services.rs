//! Collaborator service traits the shell talks to.
//!
//! The shell only ever reaches the process table, the disk device and the
//! clock through these traits, so front-ends and tests can swap in their own
//! implementations.

use std::fmt;
use std::time::Instant;

use ossim_types::error::Result;
use ossim_types::time::Timestamp;

// ---------------------------------------------------------------------------
// Time service
// ---------------------------------------------------------------------------

/// Abstraction over the wall clock.
pub trait TimeService {
    /// Current wall-clock time.
    fn now(&self) -> Result<Timestamp>;
}

// ---------------------------------------------------------------------------
// Process table
// ---------------------------------------------------------------------------

/// Lifecycle state of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Running,
    /// Killed; removed on the next reap.
    Terminated,
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Terminated => write!(f, "terminated"),
        }
    }
}

/// Snapshot of one process-table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub status: ProcessStatus,
    /// CPU usage in percent.
    pub cpu_percent: u8,
    pub memory_mb: u32,
    pub start_time: Timestamp,
    pub args: Vec<String>,
}

/// Abstraction over the process table.
///
/// The table owns the pid space. Pids below the table's system threshold
/// belong to system processes and cannot be killed.
pub trait ProcessTable {
    /// Snapshot of every process, in pid order.
    fn list_processes(&self) -> Vec<ProcessInfo>;

    /// Start a process and return its row.
    fn start_process(&mut self, name: &str, args: &[String]) -> Result<ProcessInfo>;

    /// Mark a process terminated. `NotFound` for unknown pids,
    /// `PermissionDenied` for system pids.
    fn kill_process(&mut self, pid: u32) -> Result<()>;

    /// Mark a process terminated because its work is done. Unlike
    /// [`ProcessTable::kill_process`] this applies to any pid.
    fn exit_process(&mut self, pid: u32) -> Result<()>;

    /// Drop terminated processes. Returns how many were removed.
    fn reap(&mut self) -> usize;

    /// Kill every non-system process. Returns how many were killed.
    fn kill_user_processes(&mut self) -> usize;
}

// ---------------------------------------------------------------------------
// Disk device
// ---------------------------------------------------------------------------

/// Capacity figures of the simulated disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskSnapshot {
    pub capacity_mb: u32,
    pub used_mb: u32,
}

impl DiskSnapshot {
    pub fn free_mb(&self) -> u32 {
        self.capacity_mb.saturating_sub(self.used_mb)
    }

    /// Whole-number usage percentage.
    pub fn used_percent(&self) -> u32 {
        if self.capacity_mb == 0 {
            return 0;
        }
        (u64::from(self.used_mb) * 100 / u64::from(self.capacity_mb)) as u32
    }

    /// Whether a write of `size_mb` fits.
    pub fn fits(&self, size_mb: u32) -> bool {
        u64::from(self.used_mb) + u64::from(size_mb) <= u64::from(self.capacity_mb)
    }
}

/// Kind of disk transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskOp {
    Read,
    Write,
}

impl DiskOp {
    /// Present participle used in progress messages.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Read => "reading",
            Self::Write => "writing",
        }
    }

    /// Name of the process that carries the transfer.
    pub fn process_name(self) -> &'static str {
        match self {
            Self::Read => "disk_read",
            Self::Write => "disk_write",
        }
    }
}

/// A transfer submitted to the disk, tied to the process carrying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskRequest {
    pub op: DiskOp,
    pub size_mb: u32,
    pub pid: u32,
}

/// Abstraction over the simulated disk.
pub trait DiskDevice {
    /// Current capacity and usage.
    fn snapshot(&self) -> DiskSnapshot;

    /// Schedule a transfer starting at `now`. A write that would overflow the
    /// disk is rejected with `InvalidArgument` before anything is scheduled.
    fn submit(&mut self, request: DiskRequest, now: Instant) -> Result<()>;

    /// Drain the transfers that have finished by `now`, oldest deadline first.
    fn poll(&mut self, now: Instant) -> Vec<DiskRequest>;

    /// Number of transfers still in flight.
    fn pending(&self) -> usize;
}
