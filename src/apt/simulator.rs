use crate::apt::{AptHandle, PackageManager};
use crate::error::{AptCheckError, Result};
use crate::log;
use std::io::{self, Write};
use std::process::{Command, Output};

/// PackageManager backed by the real `apt-get` binary
pub struct AptGet {
    handle: AptHandle,
}

impl AptGet {
    pub fn new(handle: AptHandle) -> Self {
        Self { handle }
    }

    fn run_apt_get(&self, step: &'static str, args: &[&str]) -> Result<Output> {
        log::trace(format!("{} {}", self.handle.apt_get().display(), args.join(" ")));

        Command::new(self.handle.apt_get())
            .args(args)
            .env("LC_ALL", "C")
            .env("DEBIAN_FRONTEND", "noninteractive")
            .output()
            .map_err(|e| AptCheckError::SimulationFailed {
                step,
                code: None,
                stderr: format!(
                    "failed to execute '{}': {e}",
                    self.handle.apt_get().display()
                ),
            })
    }

    fn ensure_success(output: Output, step: &'static str) -> Result<Output> {
        if output.status.success() {
            return Ok(output);
        }

        // apt's own diagnostics go to stdout for the operator; stderr is reserved for the report
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(&output.stdout);
        let _ = stdout.flush();

        Err(AptCheckError::SimulationFailed {
            step,
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl PackageManager for AptGet {
    fn refresh_index(&self) -> Result<()> {
        let output = self.run_apt_get("update", &["-q", "update"])?;
        Self::ensure_success(output, "update")?;
        Ok(())
    }

    fn simulate_upgrade(&self) -> Result<String> {
        let output = self.run_apt_get("upgrade simulation", &["-s", "-q", "upgrade"])?;
        let output = Self::ensure_success(output, "upgrade simulation")?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
