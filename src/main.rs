//! Terminal client entry point.
//!
//! Wires configuration, tracing and a [`SearchSession`] to a line-oriented
//! prompt. Input is read on a separate thread so that a new search or filter
//! can supersede a page request that is still loading.
//!
//! # Commands
//!
//! | Input                  | Message                          |
//! |------------------------|----------------------------------|
//! | `<text>`, `/search <q>`| `StartNewQuery`                  |
//! | `/topic <name>`        | `StartNewQuery` (topic as query) |
//! | `/type <category>`     | `AdjustFilter(Category)`         |
//! | `/orientation <o>`     | `AdjustFilter(Orientation)`      |
//! | `/more`                | `RequestNextPage`                |
//! | `/status`, `/help`     | local only                       |
//! | `/quit`                | exits                            |

use clap::Parser;
use pixsearch::app::{Filter, Message, NewQuery, SearchSession};
use pixsearch::domain::{Category, Orientation};
use pixsearch::infrastructure::default_config_file;
use pixsearch::ui::{render, renderer::status_line, ConsoleToast};
use pixsearch::Config;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How often the prompt loop checks for fetch completions.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

const HELP: &str = "\
Commands:
  <text> | /search <q>     search for images
  /topic <name>            browse a topic (replaces the query)
  /type <category>         all | photo | illustration | vector
  /orientation <o>         all | horizontal | vertical
  /more                    load the next page
  /status                  show the current state
  /quit                    exit";

/// Command-line arguments accepted by the `pixsearch` binary.
#[derive(Parser, Debug)]
#[command(name = "pixsearch", version, about = "Search Pixabay images from the terminal")]
struct CliArgs {
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "PIXSEARCH_CONFIG",
        help = "Configuration file (default: <config dir>/config.toml)"
    )]
    config: Option<PathBuf>,
    #[arg(long, value_name = "KEY", help = "Pixabay API key (overrides config and PIXABAY_API_KEY)")]
    api_key: Option<String>,
    #[arg(short, long, value_name = "QUERY", help = "Run this search on startup")]
    query: Option<String>,
    #[arg(long, value_name = "LEVEL", help = "Tracing level for the trace file")]
    trace_level: Option<String>,
}

/// A parsed prompt line.
#[derive(Debug, PartialEq)]
enum Command {
    Send(Message),
    Status,
    Help,
    Quit,
}

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(args) {
        eprintln!("pixsearch: {e}");
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> pixsearch::Result<()> {
    let config_path = match args.config {
        Some(path) => path,
        None => default_config_file()?,
    };
    let mut config = Config::load(&config_path)?;
    if let Some(key) = args.api_key {
        config.api_key = Some(key);
    }
    if let Some(level) = args.trace_level {
        config.trace_level = Some(level);
    }

    pixsearch::observability::init_tracing(&config);
    let _span = tracing::debug_span!("pixsearch_run").entered();

    let fetcher = pixsearch::initialize(&config)?;
    let mut session = SearchSession::new(
        Arc::new(fetcher),
        Box::new(ConsoleToast::stdout()),
        config.search_defaults(),
    );

    let input = spawn_input_reader()?;
    let mut stdout = io::stdout();
    let mut shown = 0;

    println!("{HELP}");
    if let Some(query) = args.query {
        session.dispatch(Message::StartNewQuery(NewQuery::text(query)));
        redraw(&session, &mut shown, &mut stdout)?;
    }
    prompt(&mut stdout)?;

    loop {
        match input.recv_timeout(POLL_INTERVAL) {
            Ok(line) => match parse_command(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(Command::Help)) => println!("{HELP}"),
                Ok(Some(Command::Status)) => print_status(&session),
                Ok(Some(Command::Send(message))) => {
                    if session.dispatch(message) {
                        redraw(&session, &mut shown, &mut stdout)?;
                    }
                }
                Ok(None) => {}
                Err(e) => println!("  {e}"),
            },
            Err(RecvTimeoutError::Timeout) => {
                if session.poll() {
                    redraw(&session, &mut shown, &mut stdout)?;
                    prompt(&mut stdout)?;
                }
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
        prompt(&mut stdout)?;
    }

    tracing::debug!("prompt closed");
    Ok(())
}

/// Reads stdin lines on a background thread.
fn spawn_input_reader() -> pixsearch::Result<Receiver<String>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("pixsearch-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })
        .map_err(|e| pixsearch::PixsearchError::Worker(format!("failed to spawn input reader: {e}")))?;
    Ok(rx)
}

/// Prints entries not yet on screen plus the status line.
fn redraw(session: &SearchSession, shown: &mut usize, out: &mut impl Write) -> io::Result<()> {
    let view = session.view();
    if view.results.len() < *shown {
        // A new query epoch started.
        *shown = 0;
    }
    render(&view, *shown, out)?;
    *shown = view.results.len();
    out.flush()
}

fn print_status(session: &SearchSession) {
    let state = session.state();
    println!(
        "  query=\"{}\" type={} orientation={} page={} status={} results={}",
        state.options.query,
        state.options.category,
        state.options.orientation,
        state.options.page,
        state.status,
        state.results.len(),
    );
    println!("  {}", status_line(&session.view()));
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Parses one prompt line. Blank lines yield `Ok(None)`.
fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if !line.starts_with('/') {
        return Ok(Some(Command::Send(Message::StartNewQuery(NewQuery::text(line)))));
    }

    let (name, arg) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(name, arg)| (name, arg.trim()));

    let command = match name {
        "/search" | "/topic" if arg.is_empty() => return Err(format!("{name} needs a value")),
        "/search" | "/topic" => Command::Send(Message::StartNewQuery(NewQuery::text(arg))),
        "/type" => {
            let category = arg.parse::<Category>()?;
            Command::Send(Message::AdjustFilter(Filter::Category(category)))
        }
        "/orientation" => {
            let orientation = arg.parse::<Orientation>()?;
            Command::Send(Message::AdjustFilter(Filter::Orientation(orientation)))
        }
        "/more" => Command::Send(Message::RequestNextPage),
        "/status" => Command::Status,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => return Err(format!("unknown command {other}, try /help")),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_text_is_a_search() {
        assert_eq!(
            parse_command("  red fox "),
            Ok(Some(Command::Send(Message::StartNewQuery(NewQuery::text("red fox")))))
        );
    }

    #[test]
    fn filters_parse_into_adjust_filter() {
        assert_eq!(
            parse_command("/orientation vertical"),
            Ok(Some(Command::Send(Message::AdjustFilter(Filter::Orientation(
                Orientation::Vertical
            )))))
        );
        assert!(parse_command("/type sculpture").is_err());
    }

    #[test]
    fn topic_replaces_the_query() {
        assert_eq!(
            parse_command("/topic nature"),
            Ok(Some(Command::Send(Message::StartNewQuery(NewQuery::text("nature")))))
        );
        assert!(parse_command("/topic").is_err());
    }

    #[test]
    fn control_commands() {
        assert_eq!(parse_command("/more"), Ok(Some(Command::Send(Message::RequestNextPage))));
        assert_eq!(parse_command("/quit"), Ok(Some(Command::Quit)));
        assert_eq!(parse_command(""), Ok(None));
        assert!(parse_command("/dance").is_err());
    }
}
