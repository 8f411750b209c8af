// src/core/process.rs
use sysinfo::{ProcessesToUpdate, System};

/// True if any running process name contains `needle`.
pub fn is_running(needle: &str) -> bool {
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::All, true);
    let found = sys
        .processes()
        .values()
        .any(|p| p.name().to_string_lossy().contains(needle));
    logd!("process check '{needle}': {found}");
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlikely_process_is_not_running() {
        assert!(!is_running("no-such-process-\u{1F6EB}-simvars"));
    }
}
