use thiserror::Error;

/// Everything that can go wrong while parsing or splitting the corpus.
#[derive(Error, Debug, PartialEq)]
pub enum CorpusError {
    /// Rejected at [`SplitConfig`](crate::SplitConfig) construction;
    /// ratios are never silently normalized.
    #[error("split ratios must sum to 1.0, got {train} + {val} + {test} = {sum}")]
    InvalidRatioConfig {
        train: f64,
        val: f64,
        test: f64,
        sum: f64,
    },

    /// An article file needs at least the three header lines (url, date, title).
    #[error("an article needs at least 3 lines (url, date, title), got {lines}")]
    MalformedArticle { lines: usize },

    /// The three splits do not add up to the corpus; indicates a logic
    /// defect in the splitter, not a recoverable input problem.
    #[error("split sizes {train} + {val} + {test} do not cover {total} items")]
    SplitSizeMismatch {
        train: usize,
        val: usize,
        test: usize,
        total: usize,
    },

    /// A directory name that is not one of the 9 known categories.
    #[error("unknown category directory `{0}`")]
    UnknownCategory(String),
}
