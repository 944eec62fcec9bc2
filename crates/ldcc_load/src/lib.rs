//! Fetching and loading of the livedoor news corpus: archive download and
//! extraction, article-file enumeration, and the parse + split + export
//! pipeline on top of `ldcc_corpus`.

use anyhow::{Context, Result};
use ldcc_corpus::{split, Article, Category, CorpusSplits, SplitConfig};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};

mod fetch;
mod source;

pub use fetch::{archive_path, corpus_root, fetch, FetchOpts, ARCHIVE_FILE_NAME, DOWNLOAD_URL};
pub use source::{ArticleSource, RawArticle};

pub struct LoadOpts<'a> {
    pub source: &'a ArticleSource,
    pub split_config: SplitConfig,
    /// When set, each split is also written to `<out_dir>/<name>.jsonl`.
    pub out_dir: Option<&'a Path>,
}

#[derive(Default)]
pub struct Stats {
    pub total_files: u64,
    pub parsed: u64,
    pub skipped: u64,
}

pub struct Dataset {
    pub splits: CorpusSplits<Article>,
    pub stats: Stats,
}

/// Reads and parses every article the source yields.
///
/// A file that cannot be parsed (too few lines, unknown category
/// directory) is logged and skipped; one bad file never aborts the load.
/// Callers that want to be strict can check [`Stats::skipped`].
pub fn read_corpus(source: &ArticleSource) -> Result<(Vec<Article>, Stats)> {
    let _t = stdx::time_scope("Reading corpus");

    let mut stats = Stats::default();
    let mut articles = Vec::new();
    for raw in source.read_raw()? {
        stats.total_files += 1;
        let category = match raw.category_dir.parse::<Category>() {
            Ok(it) => it,
            Err(err) => {
                log::warn!("Skipping {}: {}", raw.source_path.display(), err);
                stats.skipped += 1;
                continue;
            }
        };
        match Article::parse(raw.lines, category) {
            Ok(article) => {
                stats.parsed += 1;
                articles.push(article);
            }
            Err(err) => {
                log::warn!("Skipping {}: {}", raw.source_path.display(), err);
                stats.skipped += 1;
            }
        }
    }

    log::debug!(
        "Read {} articles from {} files ({} skipped)",
        stats.parsed,
        stats.total_files,
        stats.skipped
    );
    Ok((articles, stats))
}

/// The full pipeline: read + parse, split, and optionally export.
pub fn run(
    LoadOpts {
        source,
        split_config,
        out_dir,
    }: LoadOpts<'_>,
) -> Result<Dataset> {
    let (articles, stats) = read_corpus(source)?;
    let splits = split(articles, &split_config)?;
    if let Some(out_dir) = out_dir {
        export_splits(out_dir, &splits)?;
    }
    Ok(Dataset { splits, stats })
}

/// Writes each split as ndjson, one flat article object per line.
pub fn export_splits(out_dir: &Path, splits: &CorpusSplits<Article>) -> Result<()> {
    let _t = stdx::time_scope("Exporting splits");

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output dir {}", out_dir.display()))?;

    for &(name, articles) in splits.by_name().iter() {
        let path = out_dir.join(format!("{}.jsonl", name));
        let file = fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut file = io::BufWriter::new(file);
        for article in articles {
            let doc = serde_json::to_string(article)?;
            writeln!(file, "{}", doc)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        log::debug!("Wrote {} articles to {}", articles.len(), path.display());
    }
    Ok(())
}
