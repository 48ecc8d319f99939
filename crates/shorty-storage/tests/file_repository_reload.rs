use std::io::Write;

use shorty_core::ShortCode;
use shorty_storage::{FileRecord, FileRepository, Repository, StorageError};
use tempfile::TempDir;

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

fn last_record(path: &std::path::Path) -> FileRecord {
    let contents = std::fs::read_to_string(path).unwrap();
    let line = contents.lines().last().expect("log is not empty");
    serde_json::from_str(line).unwrap()
}

#[tokio::test]
async fn reopen_restores_records_and_sequence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("urls.json");
    const N: u64 = 25;

    {
        let repo = FileRepository::open(&path).unwrap();
        for i in 0..N {
            repo.save(&code(&format!("code{i:04}")), &format!("https://example.com/{i}"))
                .await
                .unwrap();
        }
    }

    let repo = FileRepository::open(&path).unwrap();
    assert_eq!(repo.len(), N as usize);
    assert_eq!(repo.last_sequence(), N);
    for i in 0..N {
        let url = repo.get(&code(&format!("code{i:04}"))).await.unwrap();
        assert_eq!(url, format!("https://example.com/{i}"));
    }

    repo.save(&code("fresh001"), "https://example.com/fresh")
        .await
        .unwrap();
    assert_eq!(last_record(&path).uuid, (N + 1).to_string());
}

#[tokio::test]
async fn reopened_store_still_rejects_known_codes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("urls.json");

    FileRepository::open(&path)
        .unwrap()
        .save(&code("abc12345"), "https://example.com/a")
        .await
        .unwrap();

    let repo = FileRepository::open(&path).unwrap();
    let err = repo
        .save(&code("abc12345"), "https://example.com/b")
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::AlreadyExists(_)));
    assert_eq!(
        repo.get(&code("abc12345")).await.unwrap(),
        "https://example.com/a"
    );
}

#[test]
fn sequence_resumes_from_the_maximum_not_the_count() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("urls.json");
    std::fs::write(
        &path,
        concat!(
            "{\"uuid\":\"3\",\"short_url\":\"aaaaaaaa\",\"original_url\":\"https://a.example\"}\n",
            "\n",
            "{\"uuid\":\"9\",\"short_url\":\"bbbbbbbb\",\"original_url\":\"https://b.example\"}\n",
            "{\"uuid\":\"5\",\"short_url\":\"cccccccc\",\"original_url\":\"https://c.example\"}\n",
        ),
    )
    .unwrap();

    let repo = FileRepository::open(&path).unwrap();

    assert_eq!(repo.len(), 3);
    assert_eq!(repo.last_sequence(), 9);
}

#[test]
fn non_numeric_sequence_is_loaded_but_not_counted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("urls.json");
    std::fs::write(
        &path,
        concat!(
            "{\"uuid\":\"2\",\"short_url\":\"aaaaaaaa\",\"original_url\":\"https://a.example\"}\n",
            "{\"uuid\":\"not-a-number\",\"short_url\":\"bbbbbbbb\",\"original_url\":\"https://b.example\"}\n",
        ),
    )
    .unwrap();

    let repo = FileRepository::open(&path).unwrap();

    assert_eq!(repo.len(), 2);
    assert_eq!(repo.last_sequence(), 2);
}

#[tokio::test]
async fn duplicate_codes_in_log_keep_the_first_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("urls.json");
    std::fs::write(
        &path,
        concat!(
            "{\"uuid\":\"1\",\"short_url\":\"aaaaaaaa\",\"original_url\":\"https://first.example\"}\n",
            "{\"uuid\":\"2\",\"short_url\":\"aaaaaaaa\",\"original_url\":\"https://second.example\"}\n",
        ),
    )
    .unwrap();

    let repo = FileRepository::open(&path).unwrap();

    assert_eq!(repo.len(), 1);
    assert_eq!(repo.last_sequence(), 2);
    assert_eq!(
        repo.get(&code("aaaaaaaa")).await.unwrap(),
        "https://first.example"
    );
}

#[test]
fn corrupt_line_aborts_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("urls.json");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "{{\"uuid\":\"1\",\"short_url\":\"aaaaaaaa\",\"original_url\":\"https://a.example\"}}"
    )
    .unwrap();
    writeln!(file, "{{\"uuid\":\"2\",\"short_url\":").unwrap();
    drop(file);

    let err = FileRepository::open(&path).unwrap_err();

    assert!(matches!(err, StorageError::Corrupt { line: 2, .. }));
}
