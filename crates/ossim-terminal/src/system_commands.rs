//! Process, device and session commands.

use ossim_platform::{DiskOp, DiskRequest, ProcessStatus};
use ossim_types::error::{ErrorKind, OssimError, Result};

use crate::interpreter::{Command, CommandOutput, CommandTag, Environment, OutputLine};

/// Default transfer size for `disk read`/`disk write`.
const DEFAULT_DISK_SIZE_MB: u32 = 10;

/// Number of rows in the `mem` top list.
const TOP_PROCESSES: usize = 5;

/// `help` groups, in display order.
const CATEGORIES: [(&str, &str); 3] = [
    ("filesystem", "File System:"),
    ("process", "Process Management:"),
    ("system", "System Info & Utilities:"),
];

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

pub(crate) struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Display this help information"
    }
    fn usage(&self) -> &str {
        "help [command]"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        if let Some(&name) = args.first() {
            let name_lower = name.to_lowercase();
            let cmd = CommandTag::parse(&name_lower)
                .ok_or_else(|| OssimError::NotFound(format!("help: no such command: {name}")))?
                .handler();
            let mut out = format!("{} ({})\n", cmd.name(), cmd.category());
            out.push_str(&format!("  {}\n", cmd.description()));
            out.push_str(&format!("  Usage: {}", cmd.usage()));
            return Ok(CommandOutput::Text(out));
        }

        let mut lines = vec![OutputLine::markup("Available commands:")];
        for (category, heading) in CATEGORIES {
            lines.push(OutputLine::markup(heading));
            for tag in CommandTag::ALL {
                let cmd = tag.handler();
                if cmd.category() == category {
                    lines.push(OutputLine::plain(format!(
                        "  {:<24} - {}",
                        cmd.usage(),
                        cmd.description()
                    )));
                }
            }
        }
        lines.push(OutputLine::plain("Type 'help <command>' for details."));
        Ok(CommandOutput::Lines(lines))
    }
}

// ---------------------------------------------------------------------------
// ps
// ---------------------------------------------------------------------------

pub(crate) struct PsCmd;
impl Command for PsCmd {
    fn name(&self) -> &str {
        "ps"
    }
    fn description(&self) -> &str {
        "List running processes"
    }
    fn usage(&self) -> &str {
        "ps"
    }
    fn category(&self) -> &str {
        "process"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let processes = env.processes.list_processes();
        if processes.is_empty() {
            return Ok(CommandOutput::Text("No running processes.".to_string()));
        }
        let rows = processes
            .into_iter()
            .map(|p| {
                vec![
                    p.pid.to_string(),
                    p.name,
                    p.status.to_string(),
                    format!("{}%", p.cpu_percent),
                    format!("{}MB", p.memory_mb),
                    p.start_time.to_string(),
                ]
            })
            .collect();
        Ok(CommandOutput::Table {
            title: None,
            headers: ["PID", "Name", "Status", "CPU", "Memory", "Started"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            rows,
        })
    }
}

// ---------------------------------------------------------------------------
// kill
// ---------------------------------------------------------------------------

pub(crate) struct KillCmd;
impl Command for KillCmd {
    fn name(&self) -> &str {
        "kill"
    }
    fn description(&self) -> &str {
        "Terminate a process"
    }
    fn usage(&self) -> &str {
        "kill <pid>"
    }
    fn category(&self) -> &str {
        "process"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let raw = args
            .first()
            .ok_or_else(|| OssimError::InvalidArgument("kill: missing PID".to_string()))?;
        let pid: u32 = raw
            .parse()
            .map_err(|_| OssimError::InvalidArgument(format!("kill: invalid PID: {raw}")))?;
        env.processes.kill_process(pid).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => OssimError::PermissionDenied(format!(
                "kill: cannot terminate system process {pid}"
            )),
            _ => OssimError::NotFound(format!("kill: process with PID {pid} does not exist")),
        })?;
        Ok(CommandOutput::Text(format!("Process {pid} terminated")))
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

pub(crate) struct RunCmd;
impl Command for RunCmd {
    fn name(&self) -> &str {
        "run"
    }
    fn description(&self) -> &str {
        "Start a new process"
    }
    fn usage(&self) -> &str {
        "run <name> [args...]"
    }
    fn category(&self) -> &str {
        "process"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some((&name, rest)) = args.split_first() else {
            return Err(OssimError::InvalidArgument(
                "run: missing application name".to_string(),
            ));
        };
        let rest: Vec<String> = rest.iter().map(|a| a.to_string()).collect();
        let proc = env
            .processes
            .start_process(name, &rest)
            .map_err(|_| OssimError::InvalidArgument(format!("run: failed to start '{name}'")))?;
        Ok(CommandOutput::Text(format!(
            "Started {name} with PID {}",
            proc.pid
        )))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

pub(crate) struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

// ---------------------------------------------------------------------------
// shutdown
// ---------------------------------------------------------------------------

pub(crate) struct ShutdownCmd;
impl Command for ShutdownCmd {
    fn name(&self) -> &str {
        "shutdown"
    }
    fn description(&self) -> &str {
        "Shutdown the system"
    }
    fn usage(&self) -> &str {
        "shutdown"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Shutdown)
    }
}

// ---------------------------------------------------------------------------
// mem
// ---------------------------------------------------------------------------

pub(crate) struct MemCmd;
impl Command for MemCmd {
    fn name(&self) -> &str {
        "mem"
    }
    fn description(&self) -> &str {
        "Display memory usage"
    }
    fn usage(&self) -> &str {
        "mem"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let total = env.config.total_memory_mb;
        let mut live: Vec<_> = env
            .processes
            .list_processes()
            .into_iter()
            .filter(|p| p.status != ProcessStatus::Terminated)
            .collect();
        let used: u32 = live.iter().map(|p| p.memory_mb).sum();
        let free = total.saturating_sub(used);

        let mut lines = vec![
            OutputLine::markup("Memory Usage:"),
            OutputLine::plain(format!("Total: {total}MB")),
            OutputLine::plain(format!("Used: {used}MB ({}%)", whole_percent(used, total))),
            OutputLine::plain(format!("Free: {free}MB")),
            OutputLine::markup("Top Memory Processes:"),
        ];
        live.sort_by(|a, b| b.memory_mb.cmp(&a.memory_mb));
        for p in live.iter().take(TOP_PROCESSES) {
            lines.push(OutputLine::plain(format!(
                "{:>4}: {:<15} {}MB ({}%)",
                p.pid,
                p.name,
                p.memory_mb,
                tenths_percent(p.memory_mb, total)
            )));
        }
        Ok(CommandOutput::Lines(lines))
    }
}

fn whole_percent(part: u32, total: u32) -> u64 {
    if total == 0 {
        return 0;
    }
    u64::from(part) * 100 / u64::from(total)
}

/// Percentage truncated to one decimal place, e.g. `1.3`.
fn tenths_percent(part: u32, total: u32) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    let tenths = u64::from(part) * 1000 / u64::from(total);
    format!("{}.{}", tenths / 10, tenths % 10)
}

// ---------------------------------------------------------------------------
// disk
// ---------------------------------------------------------------------------

pub(crate) struct DiskCmd;
impl Command for DiskCmd {
    fn name(&self) -> &str {
        "disk"
    }
    fn description(&self) -> &str {
        "Display disk usage or run a transfer test"
    }
    fn usage(&self) -> &str {
        "disk [read|write <size>]"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(&op_name) = args.first() else {
            let snap = env.disk.snapshot();
            return Ok(CommandOutput::Lines(vec![
                OutputLine::markup("Disk Usage:"),
                OutputLine::plain(format!("Total: {}MB", snap.capacity_mb)),
                OutputLine::plain(format!(
                    "Used: {}MB ({}%)",
                    snap.used_mb,
                    snap.used_percent()
                )),
                OutputLine::plain(format!("Free: {}MB", snap.free_mb())),
                OutputLine::plain(""),
                OutputLine::plain("To test disk performance:"),
                OutputLine::plain("  disk read <size>  - Read test (e.g. disk read 100)"),
                OutputLine::plain("  disk write <size> - Write test (e.g. disk write 50)"),
            ]));
        };

        let op = match op_name.to_lowercase().as_str() {
            "read" => DiskOp::Read,
            "write" => DiskOp::Write,
            _ => {
                return Err(OssimError::InvalidArgument(format!(
                    "disk: unknown operation '{op_name}' (expected read or write)"
                )));
            },
        };
        let size_mb = match args.get(1) {
            None => DEFAULT_DISK_SIZE_MB,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(OssimError::InvalidArgument(format!(
                        "disk: invalid size: {raw}"
                    )));
                },
            },
        };

        // Check space before a process is started for the transfer.
        if op == DiskOp::Write && !env.disk.snapshot().fits(size_mb) {
            log::warn!("Disk write of {size_mb} MB rejected: insufficient space");
            return Err(OssimError::InvalidArgument(
                "Disk: Insufficient space for write operation.".to_string(),
            ));
        }
        let proc = env
            .processes
            .start_process(op.process_name(), &[format!("size={size_mb}")])?;
        let request = DiskRequest {
            op,
            size_mb,
            pid: proc.pid,
        };
        if let Err(e) = env.disk.submit(request, env.now) {
            if let Err(kill_err) = env.processes.exit_process(proc.pid) {
                log::debug!("Could not stop pid {}: {kill_err}", proc.pid);
            }
            return Err(e);
        }
        let label = match op {
            DiskOp::Read => "Reading",
            DiskOp::Write => "Writing",
        };
        Ok(CommandOutput::Text(format!(
            "Disk: {label} {size_mb}MB of data..."
        )))
    }
}

// ---------------------------------------------------------------------------
// whoami
// ---------------------------------------------------------------------------

pub(crate) struct WhoamiCmd;
impl Command for WhoamiCmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn description(&self) -> &str {
        "Display current user"
    }
    fn usage(&self) -> &str {
        "whoami"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.config.user.clone()))
    }
}

// ---------------------------------------------------------------------------
// date
// ---------------------------------------------------------------------------

pub(crate) struct DateCmd;
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Display current date and time"
    }
    fn usage(&self) -> &str {
        "date"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if let Some(time) = env.time {
            let now = time.now()?;
            Ok(CommandOutput::Lines(vec![OutputLine::markup(
                now.to_string(),
            )]))
        } else {
            Ok(CommandOutput::Text(
                "date: no time service available".to_string(),
            ))
        }
    }
}
