/// Configuration is malformed or inconsistent. Always fatal at startup.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Group '{group}': not given a priority")]
    MissingPriority { group: String },

    #[error("Group '{group}': expected exactly one source (dir or paths), found {found}")]
    SourceCount { group: String, found: usize },

    #[error("Group '{group}': invalid order '{value}' (expected ascending, descending or random)")]
    InvalidOrder { group: String, value: String },
}

/// Why a single group could not produce an item this round.
///
/// Both variants are recoverable: the scheduler logs them and moves on to
/// the next group.
#[derive(thiserror::Error, Debug)]
pub enum ProduceError {
    #[error("Source unavailable: {location}: {source}")]
    SourceUnavailable {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Source is empty: {location}")]
    Empty { location: String },
}

impl ProduceError {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

/// Every group was empty or unavailable on this call.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No item available from any group")]
pub struct NoItemAvailable;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_missing_priority() {
        let err = ConfigError::MissingPriority {
            group: "ads".into(),
        };
        assert_eq!(err.to_string(), "Group 'ads': not given a priority");
    }

    #[test]
    fn test_display_source_count() {
        let err = ConfigError::SourceCount {
            group: "ads".into(),
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Group 'ads': expected exactly one source (dir or paths), found 2"
        );
    }

    #[test]
    fn test_display_invalid_order() {
        let err = ConfigError::InvalidOrder {
            group: "ads".into(),
            value: "sideways".into(),
        };
        assert_eq!(
            err.to_string(),
            "Group 'ads': invalid order 'sideways' (expected ascending, descending or random)"
        );
    }

    #[test]
    fn test_display_source_unavailable_keeps_io_source() {
        let err = ProduceError::SourceUnavailable {
            location: "/srv/ads".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.is_unavailable());
        assert!(!err.is_empty());
        assert_eq!(err.to_string(), "Source unavailable: /srv/ads: missing");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display_empty() {
        let err = ProduceError::Empty {
            location: "/srv/ads".into(),
        };
        assert!(err.is_empty());
        assert_eq!(err.to_string(), "Source is empty: /srv/ads");
    }

    #[test]
    fn test_display_no_item_available() {
        assert_eq!(
            NoItemAvailable.to_string(),
            "No item available from any group"
        );
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigError>();
        assert_send_sync::<ProduceError>();
        assert_send_sync::<NoItemAvailable>();
    }
}
