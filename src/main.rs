//! # Monthly Reminder
//!
//! Stores recurring monthly reminders and emails the ones due today.
//! Meant to be run once a day from cron:
//!
//!   monthly-reminder add -n Bills -d 15 -s "Reminder: Pay bills" -f body.html
//!   monthly-reminder list
//!   monthly-reminder delete
//!   monthly-reminder exec            # send what is due today

mod commands;

use std::ffi::OsString;
use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use reminder_channels::{SmtpMailer, TerminalInput};
use reminder_core::config::{AppConfig, expand_path};
use reminder_core::traits::MailTransport;
use reminder_scheduler::ReminderStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

use commands::{AddArgs, DeleteOutcome};

#[derive(Debug, Parser)]
#[command(
    name = "monthly-reminder",
    version,
    about = "📅 Monthly Reminder — recurring monthly email reminders",
    after_help = "Examples:\n  \
        monthly-reminder add -n Bills -d 15 -s \"Reminder: Pay bills\" -f body.html\n  \
        monthly-reminder add -n Rent -d 21 -s \"Reminder: Pay rent\" -b \"<h1>Pay the rent</h1>\"\n  \
        monthly-reminder add -n Rent -d 21 -b \"<h1>Pay the rent</h1>\" -r someone@example.com"
)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (JSON, or TOML with a .toml extension)
    #[arg(long, global = true, default_value = "~/.monthly-reminder/config.json")]
    config: String,

    /// Reminder store
    #[arg(long, global = true, default_value = "~/.monthly-reminder/reminders.json")]
    store: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Adds a reminder.
    Add(AddArgs),
    /// List all reminders.
    List,
    /// Delete reminder(s).
    #[command(visible_alias = "del")]
    Delete,
    /// Send emails for the reminders that are due today.
    #[command(visible_alias = "execute")]
    Exec {
        /// Evaluate against this date instead of the local date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

/// Print the help of one subcommand, with the full `monthly-reminder <sub>` usage line.
fn print_subcommand_help(name: &str) {
    let mut command = Cli::command();
    command.build();
    if let Some(sub) = command.find_subcommand_mut(name) {
        sub.print_help().ok();
        println!();
    }
}

/// Exit status for a rejected command line. `None` for help/version
/// requests, which are not errors.
fn usage_status(kind: ErrorKind) -> Option<u8> {
    match kind {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        _ => Some(1),
    }
}

/// First argument naming a subcommand. Non-UTF-8 arguments are skipped.
fn misused_subcommand(args: impl IntoIterator<Item = OsString>) -> Option<String> {
    let command = Cli::command();
    args.into_iter().skip(1).find_map(|arg| {
        arg.to_str()
            .and_then(|s| command.find_subcommand(s))
            .map(|c| c.get_name().to_string())
    })
}

/// Argument misuse: show the relevant help, then the error, and exit 1.
fn usage_error(err: clap::Error) -> ExitCode {
    let Some(status) = usage_status(err.kind()) else {
        err.exit()
    };

    match misused_subcommand(std::env::args_os()) {
        Some(name) => print_subcommand_help(&name),
        None => {
            Cli::command().print_help().ok();
            println!();
        }
    }
    err.print().ok();
    ExitCode::from(status)
}

fn default_filter(verbose: bool) -> EnvFilter {
    let filter = if verbose {
        "monthly_reminder=debug,reminder_scheduler=debug,reminder_channels=debug,reminder_core=debug"
    } else {
        "monthly_reminder=info,reminder_scheduler=info,reminder_channels=info,reminder_core=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
}

fn log_subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .finish()
}

/// Logs go to stderr so `list` output stays clean; colours only on a terminal.
fn init_logging(verbose: bool) {
    let subscriber = log_subscriber(
        default_filter(verbose),
        std::io::stderr,
        std::io::stderr().is_terminal(),
    );
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn connect_smtp(config: &AppConfig) -> reminder_core::Result<Box<dyn MailTransport>> {
    Ok(Box::new(SmtpMailer::new(&config.smtp)?))
}

async fn run(cli: Cli) -> Result<()> {
    let store = ReminderStore::new(&expand_path(&cli.store));

    match cli.command {
        Command::Add(args) => {
            let reminder = commands::add(&store, &args, &|| print_subcommand_help("add"))?;
            tracing::debug!("Stored '{}' in {}", reminder.name, store.path().display());
        }
        Command::List => {
            commands::list(&store, &mut std::io::stdout())?;
        }
        Command::Delete => {
            let mut input = TerminalInput::new()?;
            let outcome = commands::delete(&store, &mut input, &mut std::io::stdout()).await?;
            match outcome {
                DeleteOutcome::Deleted(n) => tracing::debug!("Removed {n} reminder(s)"),
                // Ctrl+C at the prompt is a normal way out
                DeleteOutcome::Interrupted => tracing::debug!("Delete cancelled"),
                DeleteOutcome::Unchanged | DeleteOutcome::NoReminders => {}
            }
        }
        Command::Exec { today } => {
            let config_path = expand_path(&cli.config);
            let config = AppConfig::load_from(&config_path)
                .with_context(|| format!("Cannot load config {}", config_path.display()))?;
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            commands::exec(&store, &config, today, connect_smtp).await?;
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage_error(e),
    };

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("❌ {e:?}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("monthly-reminder").chain(args.iter().copied()))
    }

    fn rejected(args: &[&str]) -> ErrorKind {
        parse(args).unwrap_err().kind()
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for Captured {
        type Writer = Captured;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_parses_with_aliases() {
        let cli = parse(&["add", "-n", "Rent", "-d", "21", "--pbd", "--rec", "me@example.com"]).unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.name, "Rent");
        assert_eq!(args.date, 21);
        assert!(args.previous_business_day);
        assert_eq!(args.recipient.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn test_command_aliases() {
        assert!(matches!(parse(&["del"]).unwrap().command, Command::Delete));
        let cli = parse(&["execute", "--today", "2026-10-15"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Exec { today: Some(d) } if d == NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
        ));
    }

    #[test]
    fn test_repeated_option_is_rejected() {
        assert_eq!(rejected(&["add", "-n", "x", "-d", "2", "-d", "25"]), ErrorKind::ArgumentConflict);
        assert_eq!(rejected(&["add", "-n", "x", "-n", "y", "-d", "2"]), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_conflicting_options_are_rejected() {
        assert_eq!(
            rejected(&["add", "-n", "x", "-d", "2", "-b", "<p>hi</p>", "-f", "body.html"]),
            ErrorKind::ArgumentConflict
        );
        assert_eq!(
            rejected(&["add", "-n", "x", "-d", "2", "--nbd", "--pbd"]),
            ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_missing_required_options_are_rejected() {
        assert_eq!(rejected(&["add", "-d", "2"]), ErrorKind::MissingRequiredArgument);
        assert_eq!(rejected(&["add", "-n", "x"]), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_usage_status() {
        assert_eq!(usage_status(ErrorKind::ArgumentConflict), Some(1));
        assert_eq!(usage_status(ErrorKind::MissingRequiredArgument), Some(1));
        assert_eq!(usage_status(ErrorKind::InvalidValue), Some(1));
        assert_eq!(usage_status(ErrorKind::DisplayHelp), None);
        assert_eq!(usage_status(ErrorKind::DisplayVersion), None);
    }

    #[test]
    fn test_misused_subcommand_found() {
        let args = ["monthly-reminder", "--store", "x.json", "add", "-n", "x"].map(OsString::from);
        assert_eq!(misused_subcommand(args).as_deref(), Some("add"));
        let args = ["monthly-reminder", "del"].map(OsString::from);
        assert_eq!(misused_subcommand(args).as_deref(), Some("delete"));
        let args = ["monthly-reminder", "--bogus"].map(OsString::from);
        assert_eq!(misused_subcommand(args), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_misused_subcommand_skips_non_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("monthly-reminder"),
            OsString::from("--store"),
            OsString::from_vec(b"x\xff".to_vec()),
            OsString::from("list"),
        ];
        assert_eq!(misused_subcommand(args).as_deref(), Some("list"));
    }

    #[test]
    fn test_logs_go_to_the_given_writer_without_colour() {
        let captured = Captured::default();
        let subscriber = log_subscriber(EnvFilter::new("info"), captured.clone(), false);
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("❌ Cannot load config");
            tracing::debug!("hidden");
        });

        let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("Cannot load config"));
        assert!(!text.contains("hidden"));
        assert!(!text.contains('\u{1b}'));
    }
}
