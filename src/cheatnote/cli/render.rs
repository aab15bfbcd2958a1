use chrono::{DateTime, Local, Utc};
use cheatnote::api::{CmdMessage, MessageLevel, Stats};
use cheatnote::config::CheatnoteConfig;
use cheatnote::model::Note;
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width budget for the first-line preview in compact listings.
const PREVIEW_WIDTH: usize = 100;
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ListStyle {
    pub compact: bool,
    pub show_ids: bool,
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Error => eprintln!("{}", render_message(message)),
            _ => println!("{}", render_message(message)),
        }
    }
}

pub(super) fn print_notes(notes: &[Note], style: ListStyle) {
    for note in notes {
        if style.compact {
            print!("{}", render_compact(note, style.show_ids));
        } else {
            println!("{}", render_full(note, style.show_ids));
        }
    }
}

pub(super) fn print_stats(stats: &Stats) {
    print!("{}", render_stats(stats));
}

pub(super) fn print_config(config: &CheatnoteConfig) {
    for key in CheatnoteConfig::KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key.cyan(), value);
        }
    }
}

fn render_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => format!("{} {}", "Info:".blue(), message.content),
        MessageLevel::Success => format!("{} {}", "✓".green(), message.content),
        MessageLevel::Warning => format!("{} {}", "Warning:".yellow(), message.content),
        MessageLevel::Error => format!("{} {}", "Error:".red(), message.content),
    }
}

fn heading(note: &Note, show_id: bool) -> String {
    let mut line = String::new();
    if show_id {
        line.push_str(&format!("{} ", format!("[{}]", note.id).yellow()));
    }
    line.push_str(&note.title.bold().to_string());
    if !note.tags.is_empty() {
        line.push_str(&format!(" {}", format!("({})", note.tags).magenta()));
    }
    line
}

fn render_full(note: &Note, show_id: bool) -> String {
    let bar = "│".blue();
    let mut out = format!("{}{}\n", "╭─ ".blue(), heading(note, show_id));

    out.push_str(&format!("{}\n", "├─ Content:".blue()));
    for line in note.content.lines() {
        out.push_str(&format!("{}  {}\n", bar, line));
    }

    out.push_str(&format!("{}\n", "├─ Timeline:".blue()));
    out.push_str(&format!(
        "{}  {} {}\n",
        bar,
        "Created:".dimmed(),
        format_date(note.created_at)
    ));
    out.push_str(&format!(
        "{}  {} {} {}\n",
        bar,
        "Modified:".dimmed(),
        format_date(note.modified_at),
        format!("({})", format_time_ago(note.modified_at)).dimmed()
    ));
    out.push_str(&format!("{}\n", "╰─".blue()));
    out
}

fn render_compact(note: &Note, show_id: bool) -> String {
    let mut out = format!("{}\n", heading(note, show_id));
    let summary = note.summary();
    if !summary.is_empty() {
        out.push_str(&format!(
            "  {}\n",
            truncate_to_width(summary, PREVIEW_WIDTH).dimmed()
        ));
    }
    out
}

fn render_stats(stats: &Stats) -> String {
    let mut out = format!("{}\n", "CheatNote Statistics".bold().cyan());
    out.push_str(&format!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━".blue()));
    out.push_str(&format!(
        "Total Notes:      {}\n",
        stats.total_notes.to_string().green()
    ));
    out.push_str(&format!(
        "Total Characters: {}\n",
        stats.total_chars.to_string().yellow()
    ));
    out.push_str(&format!(
        "Total Lines:      {}\n",
        stats.total_lines.to_string().yellow()
    ));
    out.push_str(&format!(
        "Avg Chars/Note:   {}\n",
        format!("{:.1}", stats.avg_chars).magenta()
    ));
    if let (Some(oldest), Some(newest)) = (stats.oldest, stats.newest) {
        out.push_str(&format!("Oldest Note:      {}\n", format_date(oldest).dimmed()));
        out.push_str(&format!("Newest Note:      {}\n", format_date(newest).dimmed()));
    }
    out.push_str(&format!(
        "Database Size:    {}\n",
        format!("{:.2} KB", stats.db_size_bytes as f64 / 1024.0).cyan()
    ));
    out
}

fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format(DATE_FORMAT).to_string()
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
