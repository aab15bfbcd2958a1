//! # Cheatnote Architecture
//!
//! Cheatnote keeps short snippets and notes in a single binary file. The
//! library does the work; the `cheatnote` binary is a thin client over it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, cli/)                                        │
//! │  - Parses arguments, prints notes, picks exit codes         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Loads once, dispatches, saves after each mutation        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs) and Match Engine (search.rs)      │
//! │  - Pure logic over a NoteStore, returns CmdResult           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/) over the Record Codec (codec.rs)          │
//! │  - NoteStore in memory, FileBackend / MemoryBackend on disk │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle of an Invocation
//!
//! Load the database, run at most one mutation or one filtered scan, and if
//! something changed save the whole store back. The store is a flat sequence
//! with no index; every query is a linear scan.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code returns `Result<CmdResult>` and never prints or
//! exits. Only the binary decides what is fatal for the process.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: add, edit, delete, list, stats, export, import, config
//! - [`search`]: Tag and content matching
//! - [`store`]: `NoteStore` and the persistence backends
//! - [`codec`]: Fixed-size binary record layout and bounded strings
//! - [`model`]: `Note`, `NoteUpdate` and the size limits
//! - [`config`]: Database path resolution and display preferences
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod search;
pub mod store;
