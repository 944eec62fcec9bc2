use crate::{Category, CorpusError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One news article, as a flat record.
///
/// All string fields are passed through verbatim from the source file;
/// `category` comes from the directory the file was found under, never
/// from the text itself.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    /// Free-form timestamp, kept exactly as the source gives it.
    pub date: String,
    pub title: String,
    /// All lines after the header, joined with a single space.
    pub content: String,
    pub category: Category,
}

impl Article {
    /// Parses one article from its whitespace-stripped lines.
    ///
    /// The first three lines are url, date and title, in that order;
    /// whatever follows is the body. Fewer than three lines is a
    /// [`CorpusError::MalformedArticle`] rather than a misparse.
    pub fn parse(lines: Vec<String>, category: Category) -> Result<Article, CorpusError> {
        let total_lines = lines.len();
        let mut lines = lines.into_iter();
        match (lines.next(), lines.next(), lines.next()) {
            (Some(url), Some(date), Some(title)) => Ok(Article {
                url,
                date,
                title,
                content: lines.join(" "),
                category,
            }),
            _ => Err(CorpusError::MalformedArticle { lines: total_lines }),
        }
    }
}
