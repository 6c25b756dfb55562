use std::time::Duration;

/// Outcome of a migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Total duration of the migration operation
    pub duration: Duration,
    /// Versions applied during this run, in order
    pub processed_versions: Vec<String>,
}

impl MigrationResult {
    /// Creates a successful migration result.
    pub fn success(duration: Duration, processed_versions: Vec<String>) -> Self {
        Self {
            duration,
            processed_versions,
        }
    }

    /// Returns whether the schema was already up to date.
    pub fn is_no_op(&self) -> bool {
        self.processed_versions.is_empty()
    }

    /// Returns the last applied migration version, if any.
    pub fn last_processed_version(&self) -> Option<&str> {
        self.processed_versions.last().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_is_no_op() {
        let result = MigrationResult::success(Duration::from_millis(100), vec![]);
        assert!(result.is_no_op());
        assert_eq!(result.last_processed_version(), None);
    }

    #[test]
    fn reports_last_version() {
        let result = MigrationResult::success(
            Duration::from_millis(10),
            vec!["20250101000000".to_string(), "20250101000100".to_string()],
        );
        assert!(!result.is_no_op());
        assert_eq!(result.last_processed_version(), Some("20250101000100"));
    }
}
