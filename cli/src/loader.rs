use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use codespan_reporting::files::SimpleFiles;

use renderer::{LoadError, LoadedSource, SourceLoader};

/// Reads placeholder sources from disk, relative to the working directory,
/// and keeps their text for diagnostics. Each file is read once per run.
pub struct FsLoader {
    files: SimpleFiles<String, String>,
    ids: HashMap<String, usize>,
}

impl FsLoader {
    pub fn new() -> Self {
        FsLoader {
            files: SimpleFiles::new(),
            ids: HashMap::new(),
        }
    }

    pub fn files(&self) -> &SimpleFiles<String, String> {
        &self.files
    }
}

impl SourceLoader for FsLoader {
    fn load(&mut self, filename: &str) -> Result<LoadedSource, LoadError> {
        if let Some(&file_id) = self.ids.get(filename) {
            if let Ok(file) = self.files.get(file_id) {
                return Ok(LoadedSource {
                    text: file.source().clone(),
                    file_id,
                });
            }
        }

        let text = fs::read_to_string(filename).map_err(|source| LoadError::Io {
            path: filename.to_string(),
            source,
        })?;
        let file_id = self.files.add(filename.to_string(), text.clone());
        self.ids.insert(filename.to_string(), file_id);
        Ok(LoadedSource { text, file_id })
    }
}

// ---------------------------------------------------------------------------
// Target documents
// ---------------------------------------------------------------------------

/// Where target Markdown documents are read from and written back to.
pub trait DocumentStore {
    fn read(&mut self, path: &Path) -> io::Result<String>;
    fn write(&mut self, path: &Path, text: &str) -> io::Result<()>;
}

/// Documents on the local filesystem.
pub struct FsDocuments;

impl DocumentStore for FsDocuments {
    fn read(&mut self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&mut self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)
    }
}
