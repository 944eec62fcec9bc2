use crate::CorpusError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// News section an article belongs to, named after the directory its
/// files live under. The set is closed and the declaration order is
/// significant: [`Category::label`] encodes a category as its position
/// in [`Category::ALL`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    MovieEnter,
    ItLifeHack,
    KadenChannel,
    TopicNews,
    LivedoorHomme,
    Peachy,
    SportsWatch,
    DokujoTsushin,
    Smax,
}

impl Category {
    /// Every known category, in label-encoding order.
    pub const ALL: [Category; 9] = [
        Category::MovieEnter,
        Category::ItLifeHack,
        Category::KadenChannel,
        Category::TopicNews,
        Category::LivedoorHomme,
        Category::Peachy,
        Category::SportsWatch,
        Category::DokujoTsushin,
        Category::Smax,
    ];

    /// The directory name the category's articles live under.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::MovieEnter => "movie-enter",
            Category::ItLifeHack => "it-life-hack",
            Category::KadenChannel => "kaden-channel",
            Category::TopicNews => "topic-news",
            Category::LivedoorHomme => "livedoor-homme",
            Category::Peachy => "peachy",
            Category::SportsWatch => "sports-watch",
            Category::DokujoTsushin => "dokujo-tsushin",
            Category::Smax => "smax",
        }
    }

    /// Integer label of the category (its position in [`Category::ALL`]).
    pub fn label(self) -> usize {
        self as usize
    }
}

impl FromStr for Category {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Category, CorpusError> {
        Category::ALL
            .iter()
            .copied()
            .find(|it| it.as_str() == s)
            .ok_or_else(|| CorpusError::UnknownCategory(s.to_owned()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
