//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Decides the process exit status
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with API and configuration
//! - `handle_*()`: Per-command handlers that call API and format output

use super::render::{print_config, print_messages, print_notes, print_stats, ListStyle};
use super::setup::{Cli, Commands};
use cheatnote::api::{CheatnoteApi, CmdMessage, CmdResult, ConfigAction};
use cheatnote::config::{config_dir_for, db_path, CheatnoteConfig};
use cheatnote::error::{CheatnoteError, Result};
use cheatnote::model::NoteUpdate;
use cheatnote::search::SearchOptions;
use cheatnote::store::fs::FileBackend;
use clap::Parser;
use log::{debug, warn};
use std::io::IsTerminal;
use std::path::PathBuf;

const DEFAULT_EXPORT_FILE: &str = "cheatnotes_export.csv";

struct AppContext {
    api: CheatnoteApi<FileBackend>,
    config: CheatnoteConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add {
            title,
            content,
            tags,
            args,
        }) => handle_add(&mut ctx, title, content, tags, args),
        Some(Commands::Edit {
            id,
            title,
            content,
            tags,
            args,
        }) => handle_edit(&mut ctx, id, title, content, tags, args),
        Some(Commands::Delete { id_flag, id }) => handle_delete(&mut ctx, id_flag.or(id)),
        Some(Commands::List {
            search,
            tags,
            regex,
            case_insensitive,
            exact,
            word_boundary,
            multiline,
            compact,
            no_ids,
            pattern,
        }) => {
            let opts = SearchOptions {
                pattern: search.or(pattern),
                tags,
                regex,
                case_insensitive,
                exact_match: exact,
                word_boundary,
                multiline,
            };
            let style = ListStyle {
                compact: compact || ctx.config.compact,
                show_ids: !no_ids && ctx.config.show_ids,
            };
            handle_list(&mut ctx, &opts, style)
        }
        Some(Commands::Export { output, file }) => handle_export(&mut ctx, output.or(file)),
        Some(Commands::Import { input, merge, file }) => {
            handle_import(&mut ctx, input.or(file), merge)
        }
        Some(Commands::Stats) => handle_stats(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => {
            let style = ListStyle {
                compact: ctx.config.compact,
                show_ids: ctx.config.show_ids,
            };
            handle_list(&mut ctx, &SearchOptions::default(), style)
        }
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let path = db_path(cli.db.as_deref());
    let config_dir = config_dir_for(&path);
    let config = match CheatnoteConfig::load(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            warn!(
                "event=config_load status=fallback dir={} error=\"{}\"",
                config_dir.display(),
                e
            );
            CheatnoteConfig::default()
        }
    };

    if cli.no_color || !config.color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    debug!("event=cli_init db_path={}", path.display());
    let api = CheatnoteApi::open(FileBackend::new(path), config_dir)?;
    Ok(AppContext { api, config })
}

/// Flags take precedence; missing fields are filled from positionals in order.
fn merge_fields(flags: [Option<String>; 3], positionals: Vec<String>) -> [Option<String>; 3] {
    let mut positionals = positionals.into_iter();
    flags.map(|flag| match flag {
        Some(value) => Some(value),
        None => positionals.next(),
    })
}

fn handle_add(
    ctx: &mut AppContext,
    title: Option<String>,
    content: Option<String>,
    tags: Option<String>,
    args: Vec<String>,
) -> Result<()> {
    let [title, content, tags] = merge_fields([title, content, tags], args);
    let (title, content) = match (title, content) {
        (Some(t), Some(c)) => (t, c),
        _ => {
            return Err(CheatnoteError::InvalidInput(
                "Title and content are required".to_string(),
            ))
        }
    };

    let result = ctx.api.add_note(&title, &content, tags.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: Option<u32>,
    title: Option<String>,
    content: Option<String>,
    tags: Option<String>,
    mut args: Vec<String>,
) -> Result<()> {
    let id = match id {
        Some(id) => id,
        None if !args.is_empty() => parse_id(&args.remove(0))?,
        None => return Err(CheatnoteError::InvalidInput("Note ID is required".to_string())),
    };

    let [title, content, tags] = merge_fields([title, content, tags], args);
    let update = NoteUpdate {
        title,
        content,
        tags,
    };

    let result = ctx.api.edit_note(id, &update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: Option<u32>) -> Result<()> {
    let id = id.ok_or_else(|| CheatnoteError::InvalidInput("Note ID is required".to_string()))?;
    let result = ctx.api.delete_note(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, opts: &SearchOptions, style: ListStyle) -> Result<()> {
    let result = ctx.api.list_notes(opts)?;
    let (notices, summary) = split_summary(&result);
    print_messages(notices);
    print_notes(&result.listed_notes, style);
    print_messages(summary);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, file: Option<PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
    let result = ctx.api.export_notes(&path)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: Option<PathBuf>, merge: bool) -> Result<()> {
    let path = file.ok_or_else(|| {
        CheatnoteError::InvalidInput("Input file is required".to_string())
    })?;
    let result = ctx.api.import_notes(&path, merge)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.stats()?;
    print_messages(&result.messages);
    if let Some(stats) = result.stats.as_ref().filter(|s| s.total_notes > 0) {
        print_stats(stats);
    }
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(action)?;
    print_messages(&result.messages);
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    Ok(())
}

/// Load notices come first; the command's own message is the last one.
fn split_summary(result: &CmdResult) -> (&[CmdMessage], &[CmdMessage]) {
    let split = result.messages.len().saturating_sub(1);
    result.messages.split_at(split)
}

fn parse_id(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CheatnoteError::InvalidInput(format!("Invalid note ID: {}", raw))),
    }
}
