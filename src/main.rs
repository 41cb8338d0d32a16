use clap::Parser;
use std::process::ExitCode;
use study_tracker::args::{Args, Command, InsertSubcommand, UpdateSubcommand};
use study_tracker::{commands, Config, Mode, Result};
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().tracker_home().path();

    // When TRACKER_DEMO_MODE is set and non-empty the mode is Mode::Demo and nothing is written
    // to disk, otherwise it is Mode::Sqlite.
    let mode = Mode::from_env();

    let _: () = match args.command() {
        Command::Init(init_args) => {
            commands::init(home, init_args.owner(), init_args.display_name())
                .await?
                .print()
        }

        Command::Insert(insert_args) => {
            let config = Config::load(home).await?;
            match insert_args.entity() {
                InsertSubcommand::Expense(args) => {
                    commands::insert_expense(config, mode, args.clone())
                        .await?
                        .print()
                }
                InsertSubcommand::StudySession(args) => {
                    commands::insert_study_session(config, mode, args.clone())
                        .await?
                        .print()
                }
                InsertSubcommand::Todo(args) => commands::insert_todo(config, mode, args.clone())
                    .await?
                    .print(),
            }
        }

        Command::Update(update_args) => {
            let config = Config::load(home).await?;
            match update_args.entity() {
                UpdateSubcommand::Expense(args) => {
                    commands::update_expense(config, mode, args.clone())
                        .await?
                        .print()
                }
                UpdateSubcommand::StudySession(args) => {
                    commands::update_study_session(config, mode, args.clone())
                        .await?
                        .print()
                }
                UpdateSubcommand::Todo(args) => commands::update_todo(config, mode, args.clone())
                    .await?
                    .print(),
            }
        }

        Command::Toggle(toggle_args) => {
            let config = Config::load(home).await?;
            commands::toggle(config, mode, toggle_args.clone())
                .await?
                .print()
        }

        Command::Delete(delete_args) => {
            let config = Config::load(home).await?;
            commands::delete(config, mode, delete_args.entity().clone())
                .await?
                .print()
        }

        Command::List(list_args) => {
            let config = Config::load(home).await?;
            commands::list(config, mode, list_args.clone())
                .await?
                .print()
        }

        Command::Dashboard(dashboard_args) => {
            let config = Config::load(home).await?;
            commands::dashboard(config, mode, dashboard_args.clone())
                .await?
                .print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => {
            // Only the library and the binary log at the requested level.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
