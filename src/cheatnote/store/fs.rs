use super::{read_snapshot, write_snapshot, Loaded, NoteStore, StorageBackend};
use crate::error::{CheatnoteError, Result};
use log::{debug, error};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const TEMP_SUFFIX: &str = ".tmp";

/// Single-file database backend.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next snapshot is staged in before the rename.
    pub fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(TEMP_SUFFIX);
        PathBuf::from(name)
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(CheatnoteError::Io)?;
            }
        }
        Ok(())
    }

    fn write_temp(&self, tmp: &Path, store: &NoteStore) -> Result<()> {
        let file = File::create(tmp).map_err(CheatnoteError::Io)?;
        let mut writer = BufWriter::new(file);
        write_snapshot(&mut writer, store)?;
        writer.flush().map_err(CheatnoteError::Io)?;
        let file = writer
            .into_inner()
            .map_err(|e| CheatnoteError::Io(e.into_error()))?;
        file.sync_all().map_err(CheatnoteError::Io)?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn load(&self) -> Result<Loaded> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "event=db_load status=missing path={}",
                    self.path.display()
                );
                return Ok(Loaded::default());
            }
            Err(e) => return Err(CheatnoteError::Io(e)),
        };
        read_snapshot(&mut BufReader::new(file))
    }

    fn save(&self, store: &NoteStore) -> Result<()> {
        self.ensure_parent_dir()?;

        let tmp = self.temp_path();
        if let Err(e) = self.write_temp(&tmp, store) {
            error!("event=db_save status=error stage=write error={}", e);
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        if let Err(e) = fs::rename(&tmp, &self.path) {
            error!("event=db_save status=error stage=rename error={}", e);
            let _ = fs::remove_file(&tmp);
            return Err(CheatnoteError::Io(e));
        }

        debug!(
            "event=db_save status=ok records={} path={}",
            store.len(),
            self.path.display()
        );
        Ok(())
    }
}
