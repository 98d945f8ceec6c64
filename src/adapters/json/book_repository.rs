use crate::domain::{Book, BookRecord};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, RepositoryError, Result};
use serde::Serialize;
use serde_json::error::Category;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Indentation used for every write of the backing file.
const INDENT: &[u8] = b"    ";

/// JSON file implementation of BookRepository
///
/// The whole catalog is one JSON array of book records.
/// Every save rewrites the entire file; nothing is appended or patched.
pub struct BookRepository {
    path: PathBuf,
}

impl BookRepository {
    /// Create a repository bound to a backing file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Encode books as a 4-space indented JSON array
    fn encode(books: &[Book]) -> Result<Vec<u8>> {
        let records: Vec<BookRecord> = books.iter().map(Book::to_record).collect();

        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        records
            .serialize(&mut serializer)
            .map_err(RepositoryError::Encode)?;

        Ok(buf)
    }

    /// Decode a JSON array of book records
    ///
    /// Syntax errors mean the file is corrupted. Data errors mean the JSON is
    /// valid but a record has a missing key or a wrong type. Either way the
    /// whole decode fails; individual records are never skipped.
    fn decode(contents: &str) -> Result<Vec<Book>> {
        let records: Vec<BookRecord> =
            serde_json::from_str(contents).map_err(|e| match e.classify() {
                Category::Data => RepositoryError::MalformedRecord(e),
                Category::Io => RepositoryError::Io(io::Error::other(e)),
                Category::Syntax | Category::Eof => RepositoryError::Corrupt(e),
            })?;

        Ok(records.into_iter().map(Book::from_record).collect())
    }
}

impl BookRepositoryTrait for BookRepository {
    /// Read and decode the backing file
    ///
    /// A missing file is reported as `NotFound` so the caller can treat it as
    /// an empty catalog rather than a failure.
    fn load(&self) -> Result<Vec<Book>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RepositoryError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(RepositoryError::Io(e)),
        };

        Self::decode(&contents)
    }

    /// Overwrite the backing file with the full catalog
    fn save(&self, books: &[Book]) -> Result<()> {
        let buf = Self::encode(books)?;
        fs::write(&self.path, buf)?;
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
