use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::{
    fs,
    io::{self, BufRead},
    path::{Path, PathBuf},
};
use tar::Archive;
use walkdir::WalkDir;

/// Non-article files that live next to the articles in every category
/// directory.
const METADATA_FILES: &[&str] = &["LICENSE.txt", "README.txt", "CHANGES.txt"];

/// One article file as found on disk: its whitespace-stripped lines plus
/// the name of the category directory it was found under.
pub struct RawArticle {
    pub source_path: PathBuf,
    pub category_dir: String,
    pub lines: Vec<String>,
}

/// Where article files are enumerated from. The two adapters yield the
/// same records; the archive one saves the extraction step.
pub enum ArticleSource {
    /// Read straight from the downloaded `.tar.gz`, member by member.
    Archive(PathBuf),
    /// Walk an extracted corpus tree (the `text/` directory).
    Extracted(PathBuf),
}

impl ArticleSource {
    pub fn read_raw(&self) -> Result<Vec<RawArticle>> {
        match self {
            ArticleSource::Archive(path) => read_from_archive(path),
            ArticleSource::Extracted(root) => read_from_tree(root),
        }
    }
}

fn is_article_file(path: &Path) -> bool {
    let file_name = match path.file_name().and_then(|it| it.to_str()) {
        Some(it) => it,
        None => return false,
    };
    file_name.ends_with(".txt") && !METADATA_FILES.contains(&file_name)
}

fn category_dir_name(path: &Path) -> Option<String> {
    Some(path.parent()?.file_name()?.to_str()?.to_owned())
}

fn read_from_archive(path: &Path) -> Result<Vec<RawArticle>> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open archive {}", path.display()))?;
    let mut archive = Archive::new(GzDecoder::new(io::BufReader::new(file)));

    let mut articles = Vec::new();
    for entry in archive.entries()? {
        let entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let entry_path = entry.path()?.to_path_buf();
        if !is_article_file(&entry_path) {
            continue;
        }
        let category_dir = match category_dir_name(&entry_path) {
            Some(it) => it,
            None => continue,
        };
        let lines = stripped_lines(io::BufReader::new(entry))
            .with_context(|| format!("Failed to read archive member {}", entry_path.display()))?;
        articles.push(RawArticle {
            source_path: entry_path,
            category_dir,
            lines,
        });
    }
    Ok(articles)
}

// The walk is sorted so that unshuffled splits come out the same on every
// platform.
fn read_from_tree(root: &Path) -> Result<Vec<RawArticle>> {
    let mut articles = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to walk corpus tree at {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_article_file(path) {
            continue;
        }
        let category_dir = match category_dir_name(path) {
            Some(it) => it,
            None => continue,
        };
        let file = fs::File::open(path)
            .with_context(|| format!("Failed to open article {}", path.display()))?;
        let lines = stripped_lines(io::BufReader::new(file))
            .with_context(|| format!("Failed to read article {}", path.display()))?;
        articles.push(RawArticle {
            source_path: path.to_owned(),
            category_dir,
            lines,
        });
    }
    Ok(articles)
}

fn stripped_lines(reader: impl BufRead) -> Result<Vec<String>> {
    reader
        .lines()
        .map(|line| Ok(line?.trim().to_owned()))
        .collect()
}
