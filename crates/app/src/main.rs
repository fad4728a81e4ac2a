mod input;
mod terminal;

use std::fmt;
use std::io::BufRead;
use std::sync::Arc;

use quiz_core::model::AnswerRule;
use quiz_core::{BrowseConfig, QuizConfig};
use services::{QuizEvent, QuizService, ReviewBrowser};
use storage::{BankSource, FileBankSource, HttpBankSource};
use tokio::sync::mpsc;

use crate::input::{BrowseCommand, InputError, parse_browse_input, parse_quiz_input};
use crate::terminal::{TerminalPresenter, render_browse_page};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingBank,
    InvalidNumber { flag: &'static str, raw: String },
    InvalidRule { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingBank => write!(f, "--bank is required (or set QUIZ_BANK)"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidRule { raw } => write!(f, "invalid --rule value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(raw: String, flag: &'static str) -> Result<T, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [quiz]  --bank <path|url> [--rule letter|text] [--cap N] [--time-limit SECS] [--keep-empty]");
    eprintln!("  quiz browse  --bank <path|url> [--rule letter|text] [--group KEY] [--page N]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  quiz:   --rule letter --cap 20 --time-limit 300");
    eprintln!("  browse: --rule text --group CO1 --page 50");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quiz,
    Browse,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "quiz" => Some(Self::Quiz),
            "browse" => Some(Self::Browse),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    bank: String,
    rule: Option<AnswerRule>,
    cap: usize,
    time_limit_secs: u32,
    keep_empty: bool,
    group: String,
    page: usize,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bank = std::env::var("QUIZ_BANK").ok().filter(|v| !v.trim().is_empty());
        let mut parsed = Self {
            bank: String::new(),
            rule: None,
            cap: QuizConfig::DEFAULT_CAP,
            time_limit_secs: QuizConfig::DEFAULT_TIME_LIMIT_SECS,
            keep_empty: false,
            group: BrowseConfig::DEFAULT_GROUP.to_owned(),
            page: BrowseConfig::DEFAULT_MAX_QUESTIONS,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => bank = Some(require_value(args, "--bank")?),
                "--rule" => {
                    let value = require_value(args, "--rule")?;
                    parsed.rule = Some(match value.as_str() {
                        "letter" => AnswerRule::Letter,
                        "text" => AnswerRule::OptionText,
                        _ => return Err(ArgsError::InvalidRule { raw: value }),
                    });
                }
                "--cap" => parsed.cap = parse_number(require_value(args, "--cap")?, "--cap")?,
                "--time-limit" => {
                    parsed.time_limit_secs =
                        parse_number(require_value(args, "--time-limit")?, "--time-limit")?;
                }
                "--keep-empty" => parsed.keep_empty = true,
                "--group" => parsed.group = require_value(args, "--group")?,
                "--page" => parsed.page = parse_number(require_value(args, "--page")?, "--page")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        parsed.bank = bank.ok_or(ArgsError::MissingBank)?;
        Ok(parsed)
    }

    fn source(&self) -> Arc<dyn BankSource> {
        if self.bank.starts_with("http://") || self.bank.starts_with("https://") {
            Arc::new(HttpBankSource::new(self.bank.clone()))
        } else {
            Arc::new(FileBankSource::new(&self.bank))
        }
    }
}

/// Forward parsed stdin lines to `tx`. Runs on a plain thread so a pending
/// read never blocks the runtime or holds up shutdown.
fn spawn_stdin_reader<T: Send + 'static>(
    tx: mpsc::Sender<T>,
    parse: fn(&str) -> Result<T, InputError>,
) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse(&line) {
                Ok(item) => {
                    if tx.blocking_send(item).is_err() {
                        break;
                    }
                }
                Err(err) => eprintln!("{err}"),
            }
        }
    });
}

async fn run_quiz(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = QuizConfig::new(args.cap, args.time_limit_secs)?
        .with_filter_empty(!args.keep_empty)
        .with_answer_rule(args.rule.unwrap_or(AnswerRule::Letter));
    let service = QuizService::new(args.source(), config);

    let (tx, mut rx) = mpsc::channel(32);
    spawn_stdin_reader(tx, parse_quiz_input);

    let mut presenter = TerminalPresenter::new(std::io::stdout());
    service.launch(&mut presenter, &mut rx).await?;
    Ok(())
}

async fn run_browse(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = BrowseConfig::new(args.page, args.group.clone())?
        .with_answer_rule(args.rule.unwrap_or(AnswerRule::OptionText));
    let source = args.source();
    let mut browser = match ReviewBrowser::open(source.as_ref(), config).await {
        Ok(browser) => browser,
        Err(err) => {
            eprintln!("Error: {}", err.user_message());
            return Err(err.into());
        }
    };

    let mut out = std::io::stdout();
    render_browse_page(&mut out, &browser)?;
    eprintln!("Commands: group KEY | pick N L | reveal N | list | quit");

    let (tx, mut rx) = mpsc::channel(8);
    spawn_stdin_reader(tx, parse_browse_input);

    while let Some(command) = rx.recv().await {
        match command {
            BrowseCommand::Group(key) => {
                browser.select_group(key);
                render_browse_page(&mut out, &browser)?;
            }
            BrowseCommand::Pick { index, option } => {
                if let Err(err) = browser.select_option(index, option) {
                    eprintln!("{err}");
                }
            }
            BrowseCommand::Reveal(index) => match browser.reveal(index) {
                Ok(Some(answer)) => println!("Correct Answer: {answer}"),
                Ok(None) => println!("Correct Answer: unavailable"),
                Err(err) => eprintln!("{err}"),
            },
            BrowseCommand::List => render_browse_page(&mut out, &browser)?,
            BrowseCommand::Quit => break,
        }
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Quiz,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Quiz,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            ArgsError::UnknownArg(first.to_owned())
        })?,
    };

    if argv.first().is_some_and(|first| !first.starts_with("--")) {
        argv.remove(0);
    }

    let args = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    log::debug!("parsed arguments: {args:?}");

    match cmd {
        Command::Quiz => run_quiz(&args).await,
        Command::Browse => run_browse(&args).await,
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
