use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use tar::Archive;
use url::Url;

/// Where the corpus archive is published.
pub const DOWNLOAD_URL: &str = "https://www.rondhuit.com/download/ldcc-20140209.tar.gz";

/// File name the downloaded archive is stored under inside the data directory.
pub const ARCHIVE_FILE_NAME: &str = "ldcc-20140209.tar.gz";

pub struct FetchOpts<'a> {
    pub archive_url: &'a Url,
    pub data_dir: &'a Path,
    /// Re-download and re-extract even if the corpus is already present.
    pub force: bool,
}

pub fn archive_path(data_dir: &Path) -> PathBuf {
    data_dir.join(ARCHIVE_FILE_NAME)
}

/// Root of the extracted corpus tree (the archive unpacks into `text/`).
pub fn corpus_root(data_dir: &Path) -> PathBuf {
    data_dir.join("text")
}

/// Downloads and extracts the corpus archive into `data_dir`, returning the
/// extracted corpus root. Work that is already done is skipped unless
/// `force` is set.
pub fn fetch(
    FetchOpts {
        archive_url,
        data_dir,
        force,
    }: FetchOpts<'_>,
) -> Result<PathBuf> {
    let archive = archive_path(data_dir);
    let root = corpus_root(data_dir);

    if root.is_dir() && !force {
        log::debug!("Corpus is already extracted at {}", root.display());
        return Ok(root);
    }

    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;

    if !archive.is_file() || force {
        download(archive_url, &archive)?;
    }
    extract(&archive, data_dir)?;

    if !root.is_dir() {
        bail!(
            "Archive {} did not contain the expected `text` directory",
            archive.display()
        );
    }
    Ok(root)
}

fn download(url: &Url, dest: &Path) -> Result<()> {
    let _t = stdx::time_scope("Downloading corpus archive");
    log::debug!("Downloading {} to {}", url, dest.display());

    let response = ureq::AgentBuilder::new()
        .user_agent(concat!("ldcc/", env!("CARGO_PKG_VERSION")))
        .timeout_read(Duration::from_secs(300))
        .build()
        .get(url.as_str())
        .call()
        .with_context(|| format!("Failed to download {}", url))?;

    let mut file = fs::File::create(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;
    io::copy(&mut response.into_reader(), &mut file)
        .with_context(|| format!("Failed to write {}", dest.display()))?;
    Ok(())
}

fn extract(archive: &Path, data_dir: &Path) -> Result<()> {
    let _t = stdx::time_scope("Extracting corpus archive");

    let file = fs::File::open(archive)
        .with_context(|| format!("Failed to open archive {}", archive.display()))?;
    Archive::new(GzDecoder::new(io::BufReader::new(file)))
        .unpack(data_dir)
        .with_context(|| format!("Failed to extract {}", archive.display()))?;
    Ok(())
}
