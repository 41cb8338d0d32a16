//! These structs provide the CLI interface for the tracker CLI.

use crate::model::{NumericText, Priority, Status, Table};
use crate::utils;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// tracker: A command-line dashboard for students.
///
/// Keep track of what you spend, how long you study and what is left on your todo list, then see
/// it all summarized on one dashboard: spending by category, study hours by weekday and todo
/// progress.
///
/// Records are stored in a SQLite file in the tracker home directory. Set TRACKER_DEMO_MODE to
/// any non-empty value to try the commands against sample data that is thrown away on exit.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the tracker home directory, its config file and an empty database.
    ///
    /// This is the first command you should run. The owner is the user id that all of your
    /// records are stored under. The display name, if given, is used to greet you on the
    /// dashboard.
    Init(InitArgs),
    /// Add an expense, study session or todo.
    Insert(InsertArgs),
    /// Change fields of an existing record. Fields you leave out are not touched.
    Update(UpdateArgs),
    /// Flip a todo between pending and completed.
    Toggle(ToggleArgs),
    /// Remove a record by id.
    Delete(DeleteArgs),
    /// Show your records, most recent first.
    List(ListArgs),
    /// Show the summary dashboard.
    Dashboard(DashboardArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where tracker data and configuration is held. Defaults to ~/tracker
    #[arg(long, env = "TRACKER_HOME", default_value_t = default_tracker_home())]
    tracker_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, tracker_home: PathBuf) -> Self {
        Self {
            log_level,
            tracker_home: tracker_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn tracker_home(&self) -> &DisplayPath {
        &self.tracker_home
    }
}

/// Args for the `tracker init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The user id that your records are stored under.
    #[arg(long)]
    owner: String,

    /// Your name, e.g. "Ada Lovelace". The dashboard greets you by the first word.
    #[arg(long)]
    display_name: Option<String>,
}

impl InitArgs {
    pub fn new(owner: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            owner: owner.into(),
            display_name,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// Args for the `tracker insert` command.
#[derive(Debug, Parser, Clone)]
pub struct InsertArgs {
    #[command(subcommand)]
    entity: InsertSubcommand,
}

impl InsertArgs {
    pub fn new(entity: InsertSubcommand) -> Self {
        Self { entity }
    }

    pub fn entity(&self) -> &InsertSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum InsertSubcommand {
    /// Record money you spent.
    Expense(InsertExpenseArgs),
    /// Record time you spent studying.
    StudySession(InsertStudySessionArgs),
    /// Add a task to your todo list. New todos are pending.
    Todo(InsertTodoArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct InsertExpenseArgs {
    /// Food, Transport, Books, Entertainment, Miscellaneous or anything else you like.
    #[arg(long)]
    pub category: String,

    /// A non-negative amount, e.g. 12.50
    #[arg(long, value_parser = utils::parse_non_negative)]
    pub amount: NumericText,

    #[arg(long)]
    pub description: Option<String>,

    /// The date of the expense as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Parser, Clone)]
pub struct InsertStudySessionArgs {
    #[arg(long)]
    pub subject: String,

    /// A non-negative number of hours, e.g. 1.5
    #[arg(long, value_parser = utils::parse_non_negative)]
    pub hours: NumericText,

    /// The date of the session as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Parser, Clone)]
pub struct InsertTodoArgs {
    #[arg(long)]
    pub task: String,

    #[arg(long, value_enum, default_value_t = Priority::default())]
    pub priority: Priority,

    /// Free text such as "Today 5pm" or "Friday".
    #[arg(long)]
    pub due_time: Option<String>,
}

/// Args for the `tracker update` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    #[command(subcommand)]
    entity: UpdateSubcommand,
}

impl UpdateArgs {
    pub fn new(entity: UpdateSubcommand) -> Self {
        Self { entity }
    }

    pub fn entity(&self) -> &UpdateSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum UpdateSubcommand {
    Expense(UpdateExpenseArgs),
    StudySession(UpdateStudySessionArgs),
    Todo(UpdateTodoArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateExpenseArgs {
    pub id: String,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, value_parser = utils::parse_non_negative)]
    pub amount: Option<NumericText>,

    /// Pass an empty string to clear the description.
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateStudySessionArgs {
    pub id: String,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long, value_parser = utils::parse_non_negative)]
    pub hours: Option<NumericText>,

    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateTodoArgs {
    pub id: String,

    #[arg(long)]
    pub task: Option<String>,

    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    #[arg(long, value_enum)]
    pub status: Option<Status>,

    /// Pass an empty string to clear the due time.
    #[arg(long)]
    pub due_time: Option<String>,
}

/// Args for the `tracker toggle` command.
#[derive(Debug, Parser, Clone)]
pub struct ToggleArgs {
    /// The id of the todo.
    id: String,
}

impl ToggleArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for the `tracker delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    #[command(subcommand)]
    entity: DeleteSubcommand,
}

impl DeleteArgs {
    pub fn new(entity: DeleteSubcommand) -> Self {
        Self { entity }
    }

    pub fn entity(&self) -> &DeleteSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeleteSubcommand {
    Expense(IdArg),
    StudySession(IdArg),
    Todo(IdArg),
}

impl DeleteSubcommand {
    pub fn table(&self) -> Table {
        match self {
            DeleteSubcommand::Expense(_) => Table::Expenses,
            DeleteSubcommand::StudySession(_) => Table::StudySessions,
            DeleteSubcommand::Todo(_) => Table::Todos,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            DeleteSubcommand::Expense(arg)
            | DeleteSubcommand::StudySession(arg)
            | DeleteSubcommand::Todo(arg) => &arg.id,
        }
    }
}

#[derive(Debug, Parser, Clone)]
pub struct IdArg {
    pub id: String,
}

/// Args for the `tracker list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Which records to show.
    #[arg(value_enum)]
    table: Table,

    /// Show at most this many records.
    #[arg(long)]
    limit: Option<usize>,
}

impl ListArgs {
    pub fn new(table: Table, limit: Option<usize>) -> Self {
        Self { table, limit }
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Args for the `tracker dashboard` command.
#[derive(Debug, Parser, Clone)]
pub struct DashboardArgs {
    /// Selects the quote of the day. The same seed always shows the same quote. Random when
    /// omitted.
    #[arg(long)]
    seed: Option<u64>,
}

impl DashboardArgs {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

fn default_tracker_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("tracker"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --tracker-home or TRACKER_HOME instead of relying on the \
                default tracker home directory.",
            );
            PathBuf::from("tracker")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
