//! Timeout configuration for fetch operations.

use std::time::Duration;

/// Timeout configuration for a fetch operation.
///
/// Both limits are unset by default: a request that never answers keeps the
/// caller waiting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Connection timeout.
    pub connect: Option<Duration>,
    /// Total operation timeout.
    pub total: Option<Duration>,
}

impl TimeoutConfig {
    /// Create from a single total timeout.
    pub fn from_total(total: Duration) -> Self {
        Self {
            connect: Some(total / 4),
            total: Some(total),
        }
    }

    /// Create from an optional number of seconds, as read from config.
    pub fn from_secs(secs: Option<u64>) -> Self {
        secs.map(|s| Self::from_total(Duration::from_secs(s)))
            .unwrap_or_default()
    }

    /// Whether any limit is set.
    pub fn is_bounded(&self) -> bool {
        self.connect.is_some() || self.total.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let t = TimeoutConfig::default();
        assert_eq!(t.connect, None);
        assert!(!t.is_bounded());
    }

    #[test]
    fn test_from_total_splits_connect() {
        let t = TimeoutConfig::from_total(Duration::from_secs(8));
        assert_eq!(t.connect, Some(Duration::from_secs(2)));
        assert_eq!(t.total, Some(Duration::from_secs(8)));
        assert!(t.is_bounded());
    }

    #[test]
    fn test_from_secs() {
        assert_eq!(TimeoutConfig::from_secs(None), TimeoutConfig::default());
        assert_eq!(
            TimeoutConfig::from_secs(Some(4)).total,
            Some(Duration::from_secs(4))
        );
    }
}
