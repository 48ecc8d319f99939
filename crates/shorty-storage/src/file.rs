use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shorty_core::error::{Result, StorageError};
use shorty_core::{Repository, ShortCode};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::fmt::Debug;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// One line of the append-only log.
///
/// `uuid` carries the sequence number as decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub uuid: String,
    pub short_url: String,
    pub original_url: String,
}

/// Append handle of the log, truncatable so a torn write can be cut off.
trait LogFile: Write + Debug + Send + Sync {
    fn end(&self) -> io::Result<u64>;

    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl LogFile for File {
    fn end(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

#[derive(Debug)]
struct FileState {
    urls: HashMap<String, String>,
    last_sequence: u64,
    log: Box<dyn LogFile>,
}

impl FileState {
    /// Appends one line. On failure the log is cut back to its previous end,
    /// so a partial line never precedes the next record.
    fn append(&mut self, record: &FileRecord) -> Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let end = self.log.end()?;
        let written = self
            .log
            .write_all(&line)
            .and_then(|()| self.log.flush());

        if let Err(err) = written {
            if let Err(truncate_err) = self.log.truncate(end) {
                error!(
                    error = %truncate_err,
                    offset = end,
                    "failed to cut torn record from file log"
                );
            }
            return Err(err.into());
        }
        Ok(())
    }
}

/// Repository backed by a newline-delimited JSON log.
///
/// The log is the source of truth; the map is a read cache rebuilt from it in
/// [`FileRepository::open`]. Map, sequence counter and append handle share one
/// reader/writer lock, so a save is checked, inserted and appended as a unit.
#[derive(Debug)]
pub struct FileRepository {
    path: PathBuf,
    state: RwLock<FileState>,
}

impl FileRepository {
    /// Opens the log at `path`, creating it if absent, and replays it.
    ///
    /// A line that fails to decode aborts with [`StorageError::Corrupt`]. After
    /// replay the file is reopened in append mode for subsequent saves.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (urls, last_sequence) = replay(&path)?;

        let log = OpenOptions::new().append(true).create(true).open(&path)?;

        info!(
            path = %path.display(),
            records = urls.len(),
            last_sequence,
            "file repository loaded"
        );

        Ok(Self::from_parts(path, urls, last_sequence, Box::new(log)))
    }

    fn from_parts(
        path: PathBuf,
        urls: HashMap<String, String>,
        last_sequence: u64,
        log: Box<dyn LogFile>,
    ) -> Self {
        Self {
            path,
            state: RwLock::new(FileState {
                urls,
                last_sequence,
                log,
            }),
        }
    }

    /// Path of the backing log.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.state.read().urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().urls.is_empty()
    }

    /// Highest sequence number written so far; the next save uses this plus one.
    pub fn last_sequence(&self) -> u64 {
        self.state.read().last_sequence
    }
}

fn replay(path: &Path) -> Result<(HashMap<String, String>, u64)> {
    // write(true) is only there so `create` is allowed; nothing is written here.
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)?;

    let mut urls = HashMap::new();
    let mut last_sequence = 0u64;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: FileRecord = serde_json::from_str(&line).map_err(|source| {
            error!(path = %path.display(), line = index + 1, error = %source, "failed to decode record");
            StorageError::Corrupt {
                line: index + 1,
                source,
            }
        })?;

        match record.uuid.parse::<u64>() {
            Ok(sequence) => last_sequence = last_sequence.max(sequence),
            Err(_) => warn!(
                path = %path.display(),
                line = index + 1,
                uuid = %record.uuid,
                "record has a non-numeric sequence number"
            ),
        }

        match urls.entry(record.short_url) {
            Entry::Vacant(slot) => {
                slot.insert(record.original_url);
            }
            Entry::Occupied(slot) => warn!(
                path = %path.display(),
                line = index + 1,
                code = %slot.key(),
                "duplicate short code in log, keeping the first record"
            ),
        }
    }

    Ok((urls, last_sequence))
}

#[async_trait]
impl Repository for FileRepository {
    /// Checks, inserts and appends under the write lock.
    ///
    /// The append is a buffered write plus flush (no fsync) and runs inline on
    /// the calling worker; records reach the log in sequence order.
    async fn save(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let slot = match state.urls.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => return Err(StorageError::AlreadyExists(code.to_string())),
            Entry::Vacant(slot) => slot,
        };
        let Some(sequence) = state.last_sequence.checked_add(1) else {
            return Err(StorageError::InvalidData(format!(
                "sequence number {} cannot be advanced",
                state.last_sequence
            )));
        };
        slot.insert(original_url.to_owned());

        let record = FileRecord {
            uuid: sequence.to_string(),
            short_url: code.as_str().to_owned(),
            original_url: original_url.to_owned(),
        };

        if let Err(err) = state.append(&record) {
            // Map must not hold a record the log lacks.
            state.urls.remove(code.as_str());
            error!(path = %self.path.display(), code = %code, error = %err, "failed to append record");
            return Err(err);
        }

        state.last_sequence = sequence;
        debug!(code = %code, sequence, "appended record to file log");
        Ok(())
    }

    async fn get(&self, code: &ShortCode) -> Result<String> {
        self.state
            .read()
            .urls
            .get(code.as_str())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(code.to_string()))
    }
}
