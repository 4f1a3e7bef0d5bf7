use std::io::Write;

use storage::{ContentRepository, CsvContentRepository};
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn loads_both_pools_from_disk() {
    let vocabulary = write_csv(
        "original,translated\neat,makan\ndrink,minum\nsleep,tidur\nread,baca\nnot a row\n",
    );
    let sentences = write_csv(
        "original,translated\nI like to eat,saya suka makan\nI drink water,saya minum air\n",
    );

    let repo = CsvContentRepository::new(vocabulary.path(), sentences.path());

    let words = repo.vocabulary().await.unwrap();
    assert_eq!(words.items.len(), 4);
    assert_eq!(words.skipped, 1);
    assert_eq!(words.items[3].translated(), "baca");

    let sentences = repo.sentences().await.unwrap();
    assert_eq!(sentences.items.len(), 2);
    assert_eq!(
        sentences.items[1].translated_words(),
        ["saya", "minum", "air"]
    );
}

#[tokio::test]
async fn empty_file_yields_empty_pool() {
    let vocabulary = write_csv("");
    let sentences = write_csv("original,translated\n");
    let repo = CsvContentRepository::new(vocabulary.path(), sentences.path());

    assert!(repo.vocabulary().await.unwrap().is_empty());
    assert!(repo.sentences().await.unwrap().is_empty());
}

#[tokio::test]
async fn bundled_data_parses_cleanly() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let repo = CsvContentRepository::new(root.join("beginner.csv"), root.join("advanced.csv"));

    let words = repo.vocabulary().await.unwrap();
    assert_eq!(words.skipped, 0);
    assert!(words.items.len() >= 4);

    let sentences = repo.sentences().await.unwrap();
    assert_eq!(sentences.skipped, 0);
    assert!(sentences.items.iter().all(|s| s.word_count() > 0));
}
