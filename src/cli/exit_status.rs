use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Bundles written, nothing to report
/// - `Failure` (1): Command completed with problems (e.g. file name collisions)
/// - `Error` (2): Command failed (bad manifest, config error, I/O error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// `Failure` when the command finished but left something to report.
    pub fn from_problems(has_problems: bool) -> Self {
        if has_problems {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        let code: u8 = match status {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        };
        ExitCode::from(code)
    }
}
