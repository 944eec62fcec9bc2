use flate2::{write::GzEncoder, Compression};
use ldcc_corpus::{Category, SplitConfig};
use ldcc_load::{ArticleSource, LoadOpts};
use std::{fs, path::Path};

fn write_file(dir: &Path, name: &str, lines: &[&str]) {
    fs::write(dir.join(name), lines.join("\n")).unwrap();
}

/// Two known categories with two articles each, the usual metadata files,
/// a truncated article, and a directory that is not a known category.
fn fake_corpus(root: &Path) {
    let text = root.join("text");
    for category in &["peachy", "smax"] {
        let dir = text.join(category);
        fs::create_dir_all(&dir).unwrap();
        write_file(
            &dir,
            &format!("{}-1.txt", category),
            &[
                &format!("http://example.com/{}/1", category),
                "2012-01-01T00:00:00+0900",
                "first title",
                "body a",
                "body b",
            ],
        );
        write_file(
            &dir,
            &format!("{}-2.txt", category),
            &[
                &format!("http://example.com/{}/2", category),
                "2012-01-02T00:00:00+0900",
                "second title",
            ],
        );
        write_file(&dir, "LICENSE.txt", &["license text"]);
    }
    write_file(&text.join("smax"), "README.txt", &["readme"]);
    write_file(&text.join("smax"), "CHANGES.txt", &["changes"]);
    write_file(
        &text.join("smax"),
        "smax-truncated.txt",
        &["http://example.com/smax/3", "2012-01-03T00:00:00+0900"],
    );

    let unknown = text.join("not-a-category");
    fs::create_dir_all(&unknown).unwrap();
    write_file(&unknown, "not-a-category-1.txt", &["u", "d", "t", "b"]);
}

#[test]
fn reads_an_extracted_tree() {
    let tmp = tempfile::tempdir().unwrap();
    fake_corpus(tmp.path());

    let source = ArticleSource::Extracted(tmp.path().join("text"));
    let (articles, stats) = ldcc_load::read_corpus(&source).unwrap();

    assert_eq!(stats.total_files, 6);
    assert_eq!(stats.parsed, 4);
    assert_eq!(stats.skipped, 2); // the truncated article and the unknown directory
    assert_eq!(articles.len(), 4);

    let smax_count = articles
        .iter()
        .filter(|it| it.category == Category::Smax)
        .count();
    assert_eq!(smax_count, 2);

    let first = articles
        .iter()
        .find(|it| it.url == "http://example.com/peachy/1")
        .unwrap();
    assert_eq!(first.title, "first title");
    assert_eq!(first.content, "body a body b");

    let header_only = articles
        .iter()
        .find(|it| it.url == "http://example.com/peachy/2")
        .unwrap();
    assert_eq!(header_only.content, "");
}

#[test]
fn archive_and_tree_sources_agree() {
    let tmp = tempfile::tempdir().unwrap();
    fake_corpus(tmp.path());

    let archive_path = tmp.path().join("corpus.tar.gz");
    let tar_gz = fs::File::create(&archive_path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(tar_gz, Compression::default()));
    builder
        .append_dir_all("text", tmp.path().join("text"))
        .unwrap();
    builder.into_inner().unwrap().finish().unwrap();

    let (mut from_tree, _) =
        ldcc_load::read_corpus(&ArticleSource::Extracted(tmp.path().join("text"))).unwrap();
    let (mut from_archive, _) =
        ldcc_load::read_corpus(&ArticleSource::Archive(archive_path)).unwrap();

    // Tar member order differs from the sorted tree walk.
    from_tree.sort_by(|a, b| a.url.cmp(&b.url));
    from_archive.sort_by(|a, b| a.url.cmp(&b.url));
    assert_eq!(from_archive, from_tree);
}

#[test]
fn splits_and_exports_the_corpus() {
    let tmp = tempfile::tempdir().unwrap();
    fake_corpus(tmp.path());
    let out_dir = tmp.path().join("out");

    let source = ArticleSource::Extracted(tmp.path().join("text"));
    let dataset = ldcc_load::run(LoadOpts {
        source: &source,
        split_config: SplitConfig::new(0.5, 0.25, 0.25).unwrap(),
        out_dir: Some(&out_dir),
    })
    .unwrap();

    assert_eq!(dataset.splits.train.len(), 2);
    assert_eq!(dataset.splits.validation.len(), 1);
    assert_eq!(dataset.splits.test.len(), 1);

    for &(name, articles) in dataset.splits.by_name().iter() {
        let exported = fs::read_to_string(out_dir.join(format!("{}.jsonl", name))).unwrap();
        assert_eq!(exported.lines().count(), articles.len());
    }

    // Exported records are flat objects with the category rendered as its
    // directory name.
    let train = fs::read_to_string(out_dir.join("train.jsonl")).unwrap();
    let first: serde_json::Value = serde_json::from_str(train.lines().next().unwrap()).unwrap();
    assert_eq!(first["url"], serde_json::json!("http://example.com/peachy/1"));
    assert_eq!(first["category"], serde_json::json!("peachy"));
}
