use crate::classifier::UpdateCounts;

/// Highest status a count can map to; anything larger is clamped.
pub const MAX_COUNT_STATUS: u8 = 254;

/// Reserved for runs that failed and produced no counts.
pub const FAILURE_STATUS: u8 = 255;

/// Map update counts to the process exit status.
///
/// Security updates by default, all updates when `fussy`. Without a security
/// repository there is nothing to distinguish, so the total is used either way.
pub fn exit_status(counts: &UpdateCounts, fussy: bool) -> u8 {
    let count = match *counts {
        UpdateCounts::WithSecurity { total, .. } if fussy => total,
        UpdateCounts::WithSecurity { security, .. } => security,
        UpdateCounts::TotalOnly { total } => total,
    };

    u8::try_from(count.min(u64::from(MAX_COUNT_STATUS))).unwrap_or(MAX_COUNT_STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_count_by_default() {
        let counts = UpdateCounts::WithSecurity {
            total: 6,
            security: 3,
        };
        assert_eq!(exit_status(&counts, false), 3);
        assert_eq!(exit_status(&counts, true), 6);
    }

    #[test]
    fn total_only_ignores_fussy() {
        let counts = UpdateCounts::TotalOnly { total: 70 };
        assert_eq!(exit_status(&counts, false), 70);
        assert_eq!(exit_status(&counts, true), 70);
    }

    #[test]
    fn healthy_is_zero() {
        let counts = UpdateCounts::WithSecurity {
            total: 4,
            security: 0,
        };
        assert_eq!(exit_status(&counts, false), 0);
    }

    #[test]
    fn large_counts_never_reach_failure_status() {
        let counts = UpdateCounts::TotalOnly { total: 1_000 };
        assert_eq!(exit_status(&counts, false), MAX_COUNT_STATUS);
        assert_ne!(exit_status(&counts, true), FAILURE_STATUS);
    }
}
