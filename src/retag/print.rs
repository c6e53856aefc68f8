use chrono::{DateTime, Utc};
use colored::Colorize;
use retag::api::{CmdMessage, MessageLevel};
use retag::config::{RetagConfig, CONFIG_KEYS};
use retag::error::Result;
use retag::model::{BatchResult, ChangeRecord};
use timeago::Formatter;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_batch(batch: &BatchResult, verbose: bool) {
    for change in &batch.changed {
        println!("{}", format_change(change, verbose));
    }
    for path in &batch.failed {
        println!("{} {}", "failed:".yellow(), path);
    }
}

pub(super) fn print_json(batch: &BatchResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(batch)?);
    Ok(())
}

pub(super) fn print_config(config: &RetagConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn format_tags(tags: &[String]) -> String {
    format!("[{}]", tags.join(", "))
}

fn format_change(change: &ChangeRecord, verbose: bool) -> String {
    let line = format!(
        "{}: {} -> {}",
        change.path.bold(),
        format_tags(&change.old_tags).dimmed(),
        format_tags(&change.new_tags).cyan()
    );
    match (verbose, change.modified) {
        (true, Some(modified)) => {
            format!("{} {}", line, format!("(modified {})", format_time_ago(modified)).dimmed())
        }
        _ => line,
    }
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
