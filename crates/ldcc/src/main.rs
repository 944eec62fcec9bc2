//! livedoor-news-corpus cli entrypoint

use anyhow::{anyhow, Result};
use charts::{Chart, ScaleBand, ScaleLinear, VerticalBarView};
use ldcc_corpus::{Category, SplitConfig};
use ldcc_load::{ArticleSource, FetchOpts, LoadOpts};
use std::path::{Path, PathBuf};
use structopt::StructOpt;
use url::Url;

#[derive(Debug, StructOpt)]
#[structopt(name = "ldcc")]
enum CliArgs {
    /// Download the corpus archive and extract it into the data directory
    Fetch {
        /// Url to download the corpus archive from. Defaults to the
        /// published rondhuit.com distribution
        #[structopt(long, env = "LDCC_ARCHIVE_URL")]
        archive_url: Option<Url>,

        /// Re-download and re-extract even if the corpus is already present
        #[structopt(long)]
        force: bool,

        #[structopt(flatten)]
        data_dir: DataDirArgs,
    },

    /// Parse the corpus, split it into train/validation/test and
    /// optionally export the splits as jsonl files
    Load {
        /// Read articles straight from the downloaded archive instead of
        /// the extracted tree
        #[structopt(long)]
        from_archive: bool,

        /// Directory to write train.jsonl, validation.jsonl and test.jsonl to
        #[structopt(long)]
        out_dir: Option<PathBuf>,

        #[structopt(flatten)]
        split: SplitArgs,

        #[structopt(flatten)]
        data_dir: DataDirArgs,
    },

    /// View the per-category article distribution, as a table and an SVG chart
    Stats {
        /// Where to save the category distribution chart
        #[structopt(long, default_value = "./category_distribution.svg")]
        chart_path: PathBuf,

        /// Open the rendered chart in a browser
        #[structopt(long)]
        open: bool,

        #[structopt(flatten)]
        data_dir: DataDirArgs,
    },
}

#[derive(Debug, StructOpt)]
struct DataDirArgs {
    /// Directory the corpus archive is downloaded to and extracted under
    #[structopt(long, env = "LDCC_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,
}

#[derive(Debug, StructOpt)]
struct SplitArgs {
    /// Fraction of the corpus that goes to the train split
    #[structopt(long, default_value = "0.8")]
    train_ratio: f64,

    /// Fraction of the corpus that goes to the validation split
    #[structopt(long, default_value = "0.1")]
    val_ratio: f64,

    /// Fraction of the corpus that goes to the test split
    #[structopt(long, default_value = "0.1")]
    test_ratio: f64,

    /// Shuffle the corpus with a seeded rng before splitting
    #[structopt(long)]
    shuffle: bool,

    /// Seed for the shuffle rng
    #[structopt(long, default_value = "0")]
    random_state: u64,
}

impl SplitArgs {
    fn to_config(&self) -> Result<SplitConfig> {
        let mut config = SplitConfig::new(self.train_ratio, self.val_ratio, self.test_ratio)?;
        if self.shuffle {
            config = config.with_shuffle(self.random_state);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    if let Err(err) = dotenv::dotenv() {
        log::debug!("Dotenv could not be loaded: {:?}", err);
    }

    env_logger::init();

    let cli_args = CliArgs::from_args();

    log::debug!("Using cli args: {:?}", cli_args);

    match cli_args {
        CliArgs::Fetch {
            archive_url,
            force,
            data_dir,
        } => {
            let archive_url = match archive_url {
                Some(it) => it,
                None => ldcc_load::DOWNLOAD_URL.parse()?,
            };

            eprintln!("Fetching the corpus archive...");
            let time = std::time::Instant::now();
            let root = ldcc_load::fetch(FetchOpts {
                archive_url: &archive_url,
                data_dir: &data_dir.data_dir,
                force,
            })?;
            eprintln!(
                "Corpus is ready\n\
                took: {:?},\n\
                root: {}\n",
                time.elapsed(),
                root.display(),
            );
        }
        CliArgs::Load {
            from_archive,
            out_dir,
            split,
            data_dir,
        } => {
            let source = article_source(&data_dir.data_dir, from_archive);
            let split_config = split.to_config()?;

            eprintln!("Loading the corpus...");
            let time = std::time::Instant::now();
            let dataset = ldcc_load::run(LoadOpts {
                source: &source,
                split_config,
                out_dir: out_dir.as_deref(),
            })?;
            eprintln!(
                "Corpus load has finished\n\
                took: {:?},\n\
                parsed: {}, skipped: {},\n\
                train: {}, validation: {}, test: {}\n",
                time.elapsed(),
                dataset.stats.parsed,
                dataset.stats.skipped,
                dataset.splits.train.len(),
                dataset.splits.validation.len(),
                dataset.splits.test.len(),
            );
        }
        CliArgs::Stats {
            chart_path,
            open,
            data_dir,
        } => {
            let source = article_source(&data_dir.data_dir, false);
            let (articles, stats) = ldcc_load::read_corpus(&source)?;

            let mut counts = vec![0u64; Category::ALL.len()];
            for article in &articles {
                counts[article.category.label()] += 1;
            }

            eprintln!("Parsed {} articles ({} skipped)", stats.parsed, stats.skipped);
            for (category, count) in Category::ALL.iter().zip(&counts) {
                eprintln!("{:>16}: {}", category, count);
            }

            if !articles.is_empty() {
                create_category_chart(&counts, &chart_path)?;
                eprintln!("Chart saved to {}", chart_path.display());

                if open {
                    std::process::Command::new("google-chrome")
                        .arg(&chart_path)
                        .spawn()?
                        .wait()?;
                }
            }
        }
    }

    Ok(())
}

fn article_source(data_dir: &Path, from_archive: bool) -> ArticleSource {
    if from_archive {
        ArticleSource::Archive(ldcc_load::archive_path(data_dir))
    } else {
        ArticleSource::Extracted(ldcc_load::corpus_root(data_dir))
    }
}

fn create_category_chart(counts: &[u64], file_path: &Path) -> Result<()> {
    let width = 1500;
    let height = 900;
    let (top, right, bottom, left) = (90, 40, 200, 60);

    let x = ScaleBand::new()
        .set_domain(
            Category::ALL
                .iter()
                .map(|it| it.as_str().to_owned())
                .collect(),
        )
        .set_range(vec![0, width - left - right])
        .set_inner_padding(0.1)
        .set_outer_padding(0.1);

    let max = counts.iter().copied().max().unwrap_or(0);

    let y = ScaleLinear::new()
        .set_domain(vec![0.0, max as f32])
        .set_range(vec![height - top - bottom, 0]);

    let data = Category::ALL
        .iter()
        .zip(counts)
        .map(|(category, count)| (category.as_str(), *count as f32))
        .collect();

    let view = VerticalBarView::new()
        .set_x_scale(&x)
        .set_y_scale(&y)
        .set_colors(charts::Color::color_scheme_dark())
        .load_data(&data)
        .map_err(|err| anyhow!("{}", err))?;

    Chart::new()
        .set_width(width)
        .set_height(height)
        .set_margins(top, right, bottom, left)
        .add_title("Articles per category".to_owned())
        .add_view(&view)
        .add_axis_bottom(&x)
        .add_axis_left(&y)
        .add_left_axis_label("Articles")
        .add_bottom_axis_label("Category")
        .save(file_path)
        .map_err(|err| anyhow!("{}", err))?;

    Ok(())
}
