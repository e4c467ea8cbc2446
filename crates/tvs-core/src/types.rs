use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Traversal order of a group's snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    #[default]
    Ascending,
    Descending,
    Random,
}

impl TraversalOrder {
    /// Parse a user-supplied order keyword.
    ///
    /// Matching is case-insensitive and by prefix (`asc`, `desc`, `rand`), so
    /// `"ASCENDING"`, `"desc"` and `"randomly"` are all accepted. An empty
    /// keyword means ascending.
    pub fn parse_keyword(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_lowercase();
        if lowered.is_empty() || lowered.starts_with("asc") {
            Some(Self::Ascending)
        } else if lowered.starts_with("desc") {
            Some(Self::Descending)
        } else if lowered.starts_with("rand") {
            Some(Self::Random)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
            Self::Random => "random",
        }
    }
}

impl std::fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for CLI responses
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
