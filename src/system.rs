use log::{info, warn};
use std::process::Command;

/// Runs a system command and waits for it, logging instead of failing.
fn run(program: &str) {
    match Command::new(program).status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("'{program}' exited with {status}"),
        Err(e) => warn!("failed to run '{program}': {e}"),
    }
}

/// Flushes filesystem buffers so records survive a hard power-off.
pub fn sync_disks() {
    run("sync");
}

pub fn power_off(dry_run: bool) {
    if dry_run {
        info!("dry run, not powering off");
        return;
    }
    sync_disks();
    info!("powering off");
    run("poweroff");
}
