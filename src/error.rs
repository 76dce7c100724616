use thiserror::Error;

#[derive(Error, Debug)]
pub enum AptCheckError {
    #[error("apt-get {step} failed ({}): {}", exit_code_label(.code), .stderr.trim())]
    SimulationFailed {
        step: &'static str,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Cleanup failed: {0}")]
    CleanupFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "not started or killed by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, AptCheckError>;
