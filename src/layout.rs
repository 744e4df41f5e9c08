// Layout of a test directory on disk and the file-level helpers that
// map I/O failures onto the open/read error categories.

use crate::error::{PushError, Result};
use crate::model::{self, Permutation, Test};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const METADATA_FILE: &str = "metadata.csv";
pub const SOLUTIONS_FILE: &str = "solutions.csv";
/// Test-level renderings, uploaded as `pdf1` and `pdf2`.
pub const TEST_PDFS: [&str; 2] = ["alln.pdf", "alls.pdf"];

/// A directory produced by the exam generator.
#[derive(Debug, Clone)]
pub struct TestDir {
    root: PathBuf,
}

impl TestDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        TestDir { root: root.into() }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Make sure the metadata file and both test PDFs can be opened.
    /// Runs before any upload so a bad directory never reaches the server.
    pub fn check(&self) -> Result<()> {
        for name in std::iter::once(METADATA_FILE).chain(TEST_PDFS) {
            let path = self.path(name);
            open(&path)?;
            debug!(path = %path.display(), "found");
        }
        Ok(())
    }

    pub fn read_test_metadata(&self) -> Result<Test> {
        let path = self.path(METADATA_FILE);
        model::parse_metadata(&read_text(&path)?)
    }

    pub fn read_permutations(&self) -> Result<Vec<Permutation>> {
        let path = self.path(SOLUTIONS_FILE);
        model::parse_permutations(&read_text(&path)?)
    }

    /// Contents of a file in the directory, as raw bytes.
    pub fn read_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path(name);
        let mut file = open(&path)?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .map_err(|source| PushError::Read { path, source })?;
        Ok(buf)
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| PushError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn read_text(path: &Path) -> Result<String> {
    let mut file = open(path)?;
    let mut text = String::new();
    file.read_to_string(&mut text)
        .map_err(|source| PushError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(text)
}
