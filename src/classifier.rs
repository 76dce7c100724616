use crate::log;
use regex::Regex;
use std::sync::LazyLock;

// Inst <package> [<installed>] (<candidate> <origin>[, <origin>...] [<arch>])
static INST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Inst\s+(?P<package>\S+)(?:\s+\[[^\]]*\])?\s+\((?P<candidate>\S+)\s+(?P<origin>[^)]*)\)")
        .expect("static regex is valid")
});

// Trailing architecture bracket inside the parentheses, e.g. " [amd64]"
static ARCH_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[[^\]]*\]\s*$").expect("static regex is valid"));

/// One package that `apt-get -s upgrade` would install or upgrade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeCandidate {
    pub package: String,
    pub origin: String,
}

impl UpgradeCandidate {
    /// Parse a single transcript line. Returns `None` for anything that is not an `Inst` line.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = INST_LINE.captures(line.trim_end())?;
        let origin = ARCH_SUFFIX.replace(&caps["origin"], "").trim().to_string();

        Some(Self {
            package: caps["package"].to_string(),
            origin,
        })
    }
}

/// Predicate deciding whether an origin (or a sources entry) belongs to a security repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityMarker {
    tokens: Vec<String>,
}

impl SecurityMarker {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|t| t.as_ref().trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// ASCII case-insensitive substring match against any token
    pub fn matches(&self, text: &str) -> bool {
        let haystack = text.to_ascii_lowercase();
        self.tokens.iter().any(|token| haystack.contains(token.as_str()))
    }
}

/// Aggregate result of one classification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateCounts {
    /// A security repository is configured, so security updates can be told apart
    WithSecurity { total: u64, security: u64 },
    /// No security repository; only the total is meaningful
    TotalOnly { total: u64 },
}

impl UpdateCounts {
    pub fn total(&self) -> u64 {
        match *self {
            UpdateCounts::WithSecurity { total, .. } | UpdateCounts::TotalOnly { total } => total,
        }
    }
}

/// Count upgrade candidates in a simulation transcript.
///
/// `marker` is `None` when the host has no security repository, which selects
/// the single-count result.
pub fn classify(transcript: &str, marker: Option<&SecurityMarker>) -> UpdateCounts {
    let mut total = 0u64;
    let mut security = 0u64;

    for line in transcript.lines() {
        let Some(candidate) = UpgradeCandidate::parse(line) else {
            if line.starts_with("Inst") {
                log::trace(format!("ignoring unrecognised line: {line}"));
            }
            continue;
        };

        total += 1;
        if marker.is_some_and(|m| m.matches(&candidate.origin)) {
            security += 1;
            log::trace(format!("{} ({}) [security]", candidate.package, candidate.origin));
        } else {
            log::trace(format!("{} ({})", candidate.package, candidate.origin));
        }
    }

    match marker {
        Some(_) => UpdateCounts::WithSecurity { total, security },
        None => UpdateCounts::TotalOnly { total },
    }
}
