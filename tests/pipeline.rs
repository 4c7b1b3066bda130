extern crate hemline;
extern crate tempfile;

use std::fs;
use std::path::Path;

use hemline::analysis::{self, Cooccurrence};
use hemline::dataset::Dataset;
use hemline::numpy;
use hemline::pipeline::{Pipeline, PipelineConfig};
use hemline::source::DirectorySource;
use hemline::tagger::{LexiconTagger, PosTag};
use hemline::vocab::Vocabulary;

const VOCAB: &str = "\
parent_item,item,item_singular
jackets,jackets,jacket
jackets,blazers,blazer
jackets,cardigans,cardigan
dresses,dresses,dress
dresses,sheath dresses,sheath
pants,pants,
pants,pencil pants,
shoes,flats,flat
";

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn fixture(dir: &Path) {
    write(dir, "vocab.csv", VOCAB);
    let posts = dir.join("posts");
    fs::create_dir(&posts).unwrap();
    write(&posts, "a1.json", r#"{
        "id": "a1",
        "title": "What does business casual mean?",
        "comments": [
            {"id": "c1", "body": "I love my new Black Blazer.\nCardigans are great too.", "score": 25},
            {"id": "c2", "body": "A sheath dress is perfect.", "score": 4},
            {"id": "c3", "body": "See https://example.com/blazers-and-dresses", "score": 9}
        ]
    }"#);
    write(&posts, "b2.json", r#"{
        "id": "b2",
        "comments": [
            {"id": "c4", "body": "Comfortable pencil pants and black flats, every day", "score": -2},
            {"id": "c5", "body": "", "score": 1}
        ]
    }"#);
    write(&posts, "c3.json", "{\"id\": \"c3\", \"comments\": [");
}

#[test]
fn extracts_reconciles_and_writes_the_table() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path());
    let vocab = Vocabulary::from_path(dir.path().join("vocab.csv")).unwrap();
    assert!(vocab.ambiguities().is_empty());

    let mut tagger = LexiconTagger::new();
    tagger.insert("sheath", PosTag::Adjective);
    let pipeline = Pipeline::new(&vocab, tagger, PipelineConfig::default()).unwrap();
    let report = pipeline.run(&mut DirectorySource::new(dir.path().join("posts"))).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].post_id, "c3");
    assert_eq!(report.stats.posts, 3);
    assert_eq!(report.stats.comments, 5);
    assert_eq!(report.stats.rows, 5);
    assert!(report.rejected.is_empty());

    let rows: Vec<(&str, &str, &str, Option<&str>)> = report.dataset.rows().iter()
        .map(|r| (r.comment_id.as_str(), r.item.as_str(), r.parent_item.as_str(),
            r.adjective.as_deref()))
        .collect();
    assert_eq!(rows, vec![
        ("c1", "blazers", "jackets", Some("black")),
        ("c1", "cardigans", "jackets", None),
        ("c2", "sheath dresses", "dresses", None),
        ("c4", "pencil pants", "pants", Some("comfortable")),
        ("c4", "flats", "shoes", Some("black")),
    ]);
    for row in report.dataset.rows() {
        assert!(vocab.is_item(&row.item), "{} is not an item", row.item);
    }

    let out = dir.path().join("mentions.csv");
    report.dataset.to_path(&out).unwrap();
    let back = Dataset::from_path(&out).unwrap();
    assert_eq!(back, report.dataset);
    assert_eq!(back.rows()[0].comment_score, 25);

    let frequent = analysis::item_frequencies(back.rows());
    assert_eq!(frequent.len(), 5);
    assert_eq!(frequent[0], ("blazers".to_string(), 1));

    let table = Cooccurrence::new(back.rows());
    assert_eq!(table.count("flats", "black"), 1);
    let matrix = dir.path().join("cooccur.npy");
    numpy::write_matrix_path(&matrix, &table.as_f64()).unwrap();
    let written = fs::read(&matrix).unwrap();
    let expected = numpy::header(table.items.len(), table.adjectives.len()).len()
        + 8 * table.items.len() * table.adjectives.len();
    assert_eq!(written.len(), expected);
}
