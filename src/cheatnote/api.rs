//! # API Facade
//!
//! The single entry point for note operations, whatever the UI.
//!
//! [`CheatnoteApi`] loads the store from its backend once, dispatches to the
//! command layer, and saves after every successful mutation. A failed
//! command never reaches `save`, so the database on disk is left exactly as
//! it was.
//!
//! Notices raised while loading (a damaged file replaced by an empty store,
//! suspicious records) are attached to the first result handed back.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `CheatnoteApi<FileBackend>`
//! - Testing: `CheatnoteApi<MemoryBackend>`

use crate::commands;
use crate::error::Result;
use crate::model::NoteUpdate;
use crate::search::SearchOptions;
use crate::store::{NoteStore, StorageBackend};
use std::path::{Path, PathBuf};

pub struct CheatnoteApi<B: StorageBackend> {
    backend: B,
    store: NoteStore,
    config_dir: PathBuf,
    pending: Vec<CmdMessage>,
}

impl<B: StorageBackend> CheatnoteApi<B> {
    /// Loads the store through `backend`.
    pub fn open(backend: B, config_dir: impl Into<PathBuf>) -> Result<Self> {
        let loaded = backend.load()?;
        Ok(Self {
            backend,
            store: loaded.store,
            config_dir: config_dir.into(),
            pending: loaded.notices.into_iter().map(CmdMessage::info).collect(),
        })
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn add_note(
        &mut self,
        title: &str,
        content: &str,
        tags: Option<&str>,
    ) -> Result<CmdResult> {
        let result = commands::add::run(&mut self.store, title, content, tags)?;
        self.commit(result)
    }

    pub fn edit_note(&mut self, id: u32, update: &NoteUpdate) -> Result<CmdResult> {
        let result = commands::edit::run(&mut self.store, id, update)?;
        self.commit(result)
    }

    pub fn delete_note(&mut self, id: u32) -> Result<CmdResult> {
        let result = commands::delete::run(&mut self.store, id)?;
        self.commit(result)
    }

    pub fn import_notes(&mut self, path: &Path, merge: bool) -> Result<CmdResult> {
        let result = commands::import::run(&mut self.store, path, merge)?;
        self.commit(result)
    }

    pub fn list_notes(&mut self, opts: &SearchOptions) -> Result<CmdResult> {
        let result = commands::list::run(&self.store, opts)?;
        Ok(self.finish(result))
    }

    pub fn stats(&mut self) -> Result<CmdResult> {
        let result = commands::stats::run(&self.store)?;
        Ok(self.finish(result))
    }

    pub fn export_notes(&mut self, path: &Path) -> Result<CmdResult> {
        let result = commands::export::run(&self.store, path)?;
        Ok(self.finish(result))
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        Ok(self.finish(result))
    }

    fn commit(&mut self, result: CmdResult) -> Result<CmdResult> {
        self.backend.save(&self.store)?;
        Ok(self.finish(result))
    }

    fn finish(&mut self, mut result: CmdResult) -> CmdResult {
        if !self.pending.is_empty() {
            let mut messages = std::mem::take(&mut self.pending);
            messages.append(&mut result.messages);
            result.messages = messages;
        }
        result
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, Stats};
