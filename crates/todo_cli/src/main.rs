//! Terminal front end for the to-do core.
//!
//! # Responsibility
//! - Drive `ListController` against a SQLite file from the shell.
//! - Print the visible list one item per line after every command.
//!
//! Usage: `todo_cli [--db PATH] [--key KEY] [--log-dir DIR] <list [FILTER] | add TITLE | toggle INDEX | delete INDEX | ping>`

use std::path::PathBuf;
use std::process::ExitCode;
use todo_core::{
    default_log_level, init_logging, ListController, TodoConfig, TodoIndex, TodoItem,
};

const DEFAULT_DB_FILE: &str = "todo.sqlite3";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    List { filter: String },
    Add { title: String },
    Toggle { index: TodoIndex },
    Delete { index: TodoIndex },
    Ping,
}

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    db_path: PathBuf,
    key: Option<String>,
    log_dir: Option<String>,
    command: Command,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!(
                "usage: todo_cli [--db PATH] [--key KEY] [--log-dir DIR] <list [FILTER] | add TITLE | toggle INDEX | delete INDEX | ping>"
            );
            return ExitCode::from(2);
        }
    };

    match run(invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(invocation: Invocation) -> Result<(), String> {
    if let Some(log_dir) = &invocation.log_dir {
        // Logging is optional for the CLI; a bad directory only warns.
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    if invocation.command == Command::Ping {
        println!("todo_core ping={}", todo_core::ping());
        println!("todo_core version={}", todo_core::core_version());
        return Ok(());
    }

    let config = match invocation.key {
        Some(key) => TodoConfig::with_key(key).map_err(|err| err.to_string())?,
        None => TodoConfig::default(),
    };
    let mut controller =
        ListController::open_file(&invocation.db_path, &config).map_err(|err| err.to_string())?;

    match invocation.command {
        Command::List { filter } => controller.set_filter(filter),
        Command::Add { title } => {
            if controller.add(&title).is_none() {
                return Err("title cannot be empty".to_string());
            }
        }
        Command::Toggle { index } => {
            controller
                .toggle(index)
                .ok_or_else(|| format!("no item with index {index}"))?;
        }
        Command::Delete { index } => {
            controller
                .delete(index)
                .ok_or_else(|| format!("no item with index {index}"))?;
        }
        Command::Ping => {}
    }

    if let Some(ticket) = controller.take_last_save() {
        if let Err(err) = ticket.wait() {
            eprintln!("warning: change kept in memory only: {err}");
        }
    }

    for item in controller.visible_items() {
        println!("{}", format_item(&item));
    }
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut db_path = PathBuf::from(DEFAULT_DB_FILE);
    let mut key = None;
    let mut log_dir = None;
    let mut rest = args;

    while let Some((flag, tail)) = rest.split_first() {
        match flag.as_str() {
            "--db" => {
                let (value, tail) = tail.split_first().ok_or("--db needs a path")?;
                db_path = PathBuf::from(value);
                rest = tail;
            }
            "--key" => {
                let (value, tail) = tail.split_first().ok_or("--key needs a value")?;
                key = Some(value.clone());
                rest = tail;
            }
            "--log-dir" => {
                let (value, tail) = tail.split_first().ok_or("--log-dir needs a directory")?;
                log_dir = Some(value.clone());
                rest = tail;
            }
            _ => break,
        }
    }

    let (name, operands) = rest.split_first().ok_or("missing command")?;
    let command = match name.as_str() {
        "list" => Command::List {
            filter: operands.join(" "),
        },
        "add" => Command::Add {
            title: operands.join(" "),
        },
        "toggle" => Command::Toggle {
            index: parse_index(operands)?,
        },
        "delete" => Command::Delete {
            index: parse_index(operands)?,
        },
        "ping" => Command::Ping,
        other => return Err(format!("unknown command `{other}`")),
    };

    Ok(Invocation {
        db_path,
        key,
        log_dir,
        command,
    })
}

fn parse_index(operands: &[String]) -> Result<TodoIndex, String> {
    match operands {
        [value] => value
            .parse()
            .map_err(|_| format!("`{value}` is not a valid index")),
        _ => Err("expected exactly one INDEX".to_string()),
    }
}

fn format_item(item: &TodoItem) -> String {
    let mark = if item.done { "x" } else { " " };
    format!("{:>4} [{mark}] {}", item.index, item.title)
}

#[cfg(test)]
mod tests {
    use super::{format_item, parse_args, Command};
    use std::path::PathBuf;
    use todo_core::TodoItem;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parse_args_reads_flags_and_joins_title() {
        let invocation =
            parse_args(&args(&["--db", "/tmp/x.db", "add", "Buy", "milk"])).unwrap();
        assert_eq!(invocation.db_path, PathBuf::from("/tmp/x.db"));
        assert_eq!(
            invocation.command,
            Command::Add {
                title: "Buy milk".to_string()
            }
        );
    }

    #[test]
    fn parse_args_rejects_bad_index_and_unknown_command() {
        assert!(parse_args(&args(&["toggle", "one"])).is_err());
        assert!(parse_args(&args(&["toggle"])).is_err());
        assert!(parse_args(&args(&["archive"])).is_err());
        assert!(parse_args(&args(&["--db"])).is_err());
        assert!(parse_args(&args(&["--log-dir"])).is_err());
    }

    #[test]
    fn parse_args_reads_log_dir() {
        let invocation = parse_args(&args(&["--log-dir", "/tmp/todo-logs", "ping"])).unwrap();
        assert_eq!(invocation.log_dir.as_deref(), Some("/tmp/todo-logs"));
        assert_eq!(invocation.command, Command::Ping);
        assert!(parse_args(&args(&["ping"])).unwrap().log_dir.is_none());
    }

    #[test]
    fn list_without_filter_uses_empty_filter() {
        let invocation = parse_args(&args(&["--key", "work", "list"])).unwrap();
        assert_eq!(invocation.key.as_deref(), Some("work"));
        assert_eq!(
            invocation.command,
            Command::List {
                filter: String::new()
            }
        );
    }

    #[test]
    fn format_item_marks_done_items() {
        let mut item = TodoItem::new(3, "Buy eggs");
        item.done = true;
        assert_eq!(format_item(&item), "   3 [x] Buy eggs");
    }
}
