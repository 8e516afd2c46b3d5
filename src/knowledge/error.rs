//! Knowledge loading errors.

use std::fmt;
use std::path::PathBuf;

/// Which knowledge collection a source feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeCategory {
    Careers,
    Faqs,
    Institution,
    Training,
}

impl fmt::Display for KnowledgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Careers => "careers",
            Self::Faqs => "faqs",
            Self::Institution => "institution",
            Self::Training => "training",
        };
        f.write_str(name)
    }
}

/// A knowledge source that could not be loaded.
///
/// These are recorded on the store and logged; the affected collection
/// is left empty.
#[derive(thiserror::Error, Debug)]
pub enum DataLoadError {
    #[error("{category} source not found: {path}")]
    Missing {
        category: KnowledgeCategory,
        path: PathBuf,
    },

    #[error("Failed to read {category} source {path}: {source}")]
    Read {
        category: KnowledgeCategory,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {category} source {path}: {source}")]
    Parse {
        category: KnowledgeCategory,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DataLoadError {
    /// Category whose source failed.
    #[must_use]
    pub fn category(&self) -> KnowledgeCategory {
        match self {
            Self::Missing { category, .. }
            | Self::Read { category, .. }
            | Self::Parse { category, .. } => *category,
        }
    }
}
