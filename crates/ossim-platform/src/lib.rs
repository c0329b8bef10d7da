//! Collaborator services for ossim.
//!
//! [`services`] defines the traits the shell depends on; [`sim`] provides the
//! in-process simulations used by the binary.

pub mod services;
pub mod sim;

pub use services::{
    DiskDevice, DiskOp, DiskRequest, DiskSnapshot, ProcessInfo, ProcessStatus, ProcessTable,
    TimeService,
};
pub use sim::{DesktopClock, SimDisk, SimProcessTable};
