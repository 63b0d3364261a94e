//! Line-oriented command surface on stdin.

use anyhow::{anyhow, bail, Context};
use chrono::{Duration, Utc};
use clipdeck_application::{ClipItem, ClipKind, ClipService, HistoryQuery, PasteMode};
use std::str::FromStr;

/// Characters of each entry shown by `list`.
const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Activate,
    List(HistoryQuery),
    Count,
    Paste(String, PasteMode),
    Pin(String),
    Delete(String),
    Clear,
    Prune(u32),
    Max(usize),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let id = || -> anyhow::Result<String> {
            if rest.is_empty() {
                bail!("{name} needs an entry id");
            }
            Ok(rest.to_string())
        };

        let command = match name {
            "activate" => Command::Activate,
            "list" => Command::List(text_query(HistoryQuery::all(), rest)),
            "kind" => {
                let (kind, query) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let kind: ClipKind = kind.parse()?;
                Command::List(text_query(HistoryQuery::all().with_kind(kind), query))
            }
            "count" => Command::Count,
            "paste" => Command::Paste(id()?, PasteMode::Rich),
            "paste-plain" => Command::Paste(id()?, PasteMode::Plain),
            "pin" => Command::Pin(id()?),
            "delete" => Command::Delete(id()?),
            "clear" => Command::Clear,
            "prune" => Command::Prune(rest.parse().context("prune needs a number of days")?),
            "max" => Command::Max(rest.parse().context("max needs an item count")?),
            "quit" | "exit" => Command::Quit,
            other => return Err(anyhow!("unknown command: {other}")),
        };
        Ok(command)
    }
}

fn text_query(query: HistoryQuery, text: &str) -> HistoryQuery {
    let text = text.trim();
    if text.is_empty() {
        query
    } else {
        query.with_text(text)
    }
}

fn print_item(item: &ClipItem) {
    let pin = if item.pinned { "*" } else { " " };
    let source = item.source_app_name.as_deref().unwrap_or("-");
    println!(
        "{pin} {id}  {kind:<5}  {when}  {source}  {preview}",
        id = item.id,
        kind = item.kind.label(),
        when = item.timestamp.format("%Y-%m-%d %H:%M:%S"),
        preview = item.preview(PREVIEW_CHARS),
    );
}

pub fn run(service: &ClipService, command: Command) -> Flow {
    match command {
        Command::Activate => match service.activate() {
            Some(app) => println!("target: {}", app.display_name()),
            None => println!("target: none"),
        },
        Command::List(query) => {
            for item in service.list(&query) {
                print_item(&item);
            }
        }
        Command::Count => println!("{}", service.count()),
        Command::Paste(id, mode) => match service.paste(&id, mode) {
            Ok(outcome) if outcome.wrote => println!("pasted {id}"),
            Ok(_) => println!("nothing to paste for {id}"),
            Err(e) => eprintln!("error: {e}"),
        },
        Command::Pin(id) => match service.toggle_pin(&id) {
            Some(true) => println!("pinned {id}"),
            Some(false) => println!("unpinned {id}"),
            None => eprintln!("error: no entry {id}"),
        },
        Command::Delete(id) => {
            if !service.delete(&id) {
                eprintln!("error: no entry {id}");
            }
        }
        Command::Clear => println!("removed {}", service.clear_all()),
        Command::Prune(days) => {
            let cutoff = Utc::now() - Duration::days(i64::from(days));
            println!("pruned {}", service.prune_older_than(cutoff));
        }
        Command::Max(max) => println!("evicted {}", service.set_max_items(max)),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("activate".parse::<Command>().unwrap(), Command::Activate);
        assert_eq!(" count ".parse::<Command>().unwrap(), Command::Count);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
        assert_eq!("prune 7".parse::<Command>().unwrap(), Command::Prune(7));
        assert_eq!("max 50".parse::<Command>().unwrap(), Command::Max(50));
    }

    #[test]
    fn test_parse_list_queries() {
        assert_eq!(
            "list".parse::<Command>().unwrap(),
            Command::List(HistoryQuery::all())
        );
        assert_eq!(
            "list hello world".parse::<Command>().unwrap(),
            Command::List(HistoryQuery::all().with_text("hello world"))
        );
        assert_eq!(
            "kind link github".parse::<Command>().unwrap(),
            Command::List(
                HistoryQuery::all()
                    .with_kind(ClipKind::Link)
                    .with_text("github")
            )
        );
    }

    #[test]
    fn test_parse_paste_modes() {
        assert_eq!(
            "paste T:abc".parse::<Command>().unwrap(),
            Command::Paste("T:abc".to_string(), PasteMode::Rich)
        );
        assert_eq!(
            "paste-plain I:def".parse::<Command>().unwrap(),
            Command::Paste("I:def".to_string(), PasteMode::Plain)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("paste".parse::<Command>().is_err());
        assert!("kind video".parse::<Command>().is_err());
        assert!("prune soon".parse::<Command>().is_err());
        assert!("launch".parse::<Command>().is_err());
    }
}
