use crate::apt::{AptGet, AptHandle, PackageManager, SourcesScanner};
use crate::classifier::{SecurityMarker, UpdateCounts, classify};
use crate::cleaner::Cleaner;
use crate::config::Config;
use crate::error::Result;
use crate::exit_policy::exit_status;
use crate::log;
use crate::report::{OutputFormat, Reporter};
use std::io::{self, Write};

/// Operating mode, resolved once from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mode {
    pub simulate: bool,
    pub quiet: bool,
    pub human: bool,
    pub fussy: bool,
    pub cleanup: bool,
}

impl Mode {
    pub fn output_format(&self) -> OutputFormat {
        if self.human {
            OutputFormat::Human
        } else {
            OutputFormat::Machine
        }
    }
}

/// Run apt-check against the host described by `config` and return the exit status
pub fn execute(mode: &Mode, config: &Config) -> Result<u8> {
    let handle = AptHandle::from_config(config);

    if mode.cleanup {
        return execute_cleanup(&handle);
    }

    let marker = SecurityMarker::new(&config.security_markers);
    let marker = SourcesScanner::new(&handle)
        .has_security_repository(&marker)?
        .then_some(marker);

    let apt = AptGet::new(handle);
    execute_check(mode, &apt, marker.as_ref(), &mut io::stderr().lock())
}

/// Empty the index cache. No counts are computed or reported.
pub fn execute_cleanup(handle: &AptHandle) -> Result<u8> {
    let removed = Cleaner::new(handle).clean()?;
    log::trace(format!(
        "removed {removed} entries from {}",
        handle.lists_dir().display()
    ));
    Ok(0)
}

/// Simulate, classify, report to `out` and compute the exit status.
///
/// Any package-manager failure aborts before anything is written, so a run
/// either reports a full result or none at all.
pub fn execute_check<W: Write>(
    mode: &Mode,
    manager: &dyn PackageManager,
    marker: Option<&SecurityMarker>,
    out: &mut W,
) -> Result<u8> {
    let counts = count_updates(mode, manager, marker)?;

    Reporter::new(mode.output_format(), mode.quiet).write_to(&counts, out)?;

    Ok(exit_status(&counts, mode.fussy))
}

fn count_updates(
    mode: &Mode,
    manager: &dyn PackageManager,
    marker: Option<&SecurityMarker>,
) -> Result<UpdateCounts> {
    if !mode.simulate {
        log::trace("refreshing package index");
        manager.refresh_index()?;
    }

    let transcript = manager.simulate_upgrade()?;
    let counts = classify(&transcript, marker);
    log::trace(format!("{counts:?}"));
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SECURITY_MARKERS;
    use crate::error::AptCheckError;
    use std::cell::Cell;

    const TRANSCRIPT: &str = "\
Inst bash [4.3-11] (4.3-11+deb8u1 Debian:8.3/stable, Debian-Security:8/updates [amd64])
Inst tzdata [2015g-0+deb8u1] (2016d-0+deb8u1 Debian:8.4/stable [all])
";

    /// In-memory package manager; `refresh_ok` models an unprivileged host
    struct FakeApt {
        transcript: &'static str,
        refresh_ok: bool,
        refreshed: Cell<bool>,
    }

    impl FakeApt {
        fn new(transcript: &'static str) -> Self {
            Self {
                transcript,
                refresh_ok: true,
                refreshed: Cell::new(false),
            }
        }
    }

    impl PackageManager for FakeApt {
        fn refresh_index(&self) -> Result<()> {
            self.refreshed.set(true);
            if self.refresh_ok {
                Ok(())
            } else {
                Err(AptCheckError::SimulationFailed {
                    step: "update",
                    code: Some(100),
                    stderr: "E: Could not open lock file /var/lib/apt/lists/lock".to_string(),
                })
            }
        }

        fn simulate_upgrade(&self) -> Result<String> {
            Ok(self.transcript.to_string())
        }
    }

    fn run(mode: Mode, apt: &FakeApt, with_security: bool) -> (Result<u8>, String) {
        let marker = SecurityMarker::new(DEFAULT_SECURITY_MARKERS);
        let marker = with_security.then_some(&marker);
        let mut out = Vec::new();
        let status = execute_check(&mode, apt, marker, &mut out);
        (status, String::from_utf8(out).unwrap())
    }

    fn simulate() -> Mode {
        Mode {
            simulate: true,
            ..Mode::default()
        }
    }

    #[test]
    fn simulate_skips_refresh() {
        let apt = FakeApt::new(TRANSCRIPT);
        let (status, out) = run(simulate(), &apt, true);
        assert_eq!(status.unwrap(), 1);
        assert_eq!(out, "2;1\n");
        assert!(!apt.refreshed.get());
    }

    #[test]
    fn fussy_human_reports_total() {
        let apt = FakeApt::new(TRANSCRIPT);
        let mode = Mode {
            fussy: true,
            human: true,
            ..simulate()
        };
        let (status, out) = run(mode, &apt, true);
        assert_eq!(status.unwrap(), 2);
        assert_eq!(
            out,
            "2 packages can be updated.\n1 updates are security updates.\n"
        );
    }

    #[test]
    fn quiet_clean_host() {
        let apt = FakeApt::new("Reading package lists...\n");
        let mode = Mode {
            quiet: true,
            ..simulate()
        };
        let (status, out) = run(mode, &apt, true);
        assert_eq!(status.unwrap(), 0);
        assert_eq!(out, "");
    }

    #[test]
    fn no_security_repository_uses_single_count() {
        let apt = FakeApt::new(TRANSCRIPT);
        let (status, out) = run(simulate(), &apt, false);
        assert_eq!(status.unwrap(), 2);
        assert_eq!(out, "2\n");
    }

    #[test]
    fn live_refresh_failure_propagates_without_report() {
        let apt = FakeApt {
            refresh_ok: false,
            ..FakeApt::new(TRANSCRIPT)
        };
        let mode = Mode {
            fussy: true,
            ..Mode::default()
        };
        let (status, out) = run(mode, &apt, true);
        assert!(matches!(
            status.unwrap_err(),
            AptCheckError::SimulationFailed { code: Some(100), .. }
        ));
        assert!(apt.refreshed.get());
        assert_eq!(out, "");
    }
}
