mod table;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Datelike, TimeDelta, Utc};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use ttrack_core::service::dto;
use ttrack_core::{
    data_dir, parse_day, parse_human_datetime, parse_location, parse_reason, parse_year, Error,
    ErrorPayload, FilePublicHolidayRepository, FileTimelogRepository, PublicHoliday,
    PublicHolidayService, ReportUseCase, Timelog, TimelogService,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "ttrack")]
#[command(about = "Personal time tracking with yearly attendance reports", long_about = None)]
struct Cli {
    /// Directory holding the JSON data files (default: ~/.ttrack)
    #[arg(long, global = true, env = "TTRACK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the attendance report of a year as JSON
    Report {
        year: String,
        /// Print tables instead of JSON
        #[arg(long)]
        table: bool,
    },
    /// List the years a report can be requested for
    ReportOptions,
    /// Record and edit timelogs
    #[command(subcommand)]
    Log(LogCommands),
    /// Manage public holidays
    #[command(subcommand)]
    Holiday(HolidayCommands),
}

#[derive(clap::Subcommand)]
enum LogCommands {
    /// Open a new timelog (usage: log start -r work -l home --at 08:30)
    Start {
        #[arg(short, long, default_value = "work")]
        reason: String,
        #[arg(short, long, default_value = "office")]
        location: String,
        #[arg(long, default_value = "now")]
        at: String,
    },
    /// Close the given timelog, or the latest open one
    Stop {
        id: Option<Uuid>,
        #[arg(long, default_value = "now")]
        at: String,
    },
    /// Add a finished (or still open) timelog
    Add {
        #[arg(long)]
        start: String,
        #[arg(long)]
        stop: Option<String>,
        #[arg(short, long, default_value = "work")]
        reason: String,
        #[arg(short, long, default_value = "office")]
        location: String,
    },
    /// List timelogs, optionally of one year
    List {
        #[arg(long)]
        year: Option<String>,
    },
    /// Delete a timelog
    Delete { id: Uuid },
}

#[derive(clap::Subcommand)]
enum HolidayCommands {
    /// Add a public holiday (usage: holiday add 2024-12-24 Christmas Eve --half-day)
    Add {
        day: String,
        #[arg(trailing_var_arg = true, required = true)]
        name: Vec<String>,
        #[arg(long)]
        half_day: bool,
    },
    /// List public holidays of one year, or all of them grouped by year as JSON
    List {
        #[arg(long)]
        year: Option<String>,
    },
    /// Delete a public holiday
    Delete { id: Uuid },
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to set up logging: {}", e))?;
    Ok(())
}

/// Prints the payload as the command's JSON output and turns it into the exit error.
fn fail(payload: ErrorPayload) -> anyhow::Error {
    error!(code = %payload.code, internal = %payload.internal, "{}", payload.external);
    match serde_json::to_string_pretty(&payload) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to encode error payload: {}", e),
    }
    payload.into()
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let base_dir = data_dir(cli.data_dir)?;
    let timelog_repo = FileTimelogRepository::new(Some(base_dir.clone()))?;
    let holiday_repo = FilePublicHolidayRepository::new(Some(base_dir))?;

    match cli.command {
        Commands::Report { year, table } => {
            let usecase = ReportUseCase::new(&timelog_repo, &holiday_repo);
            let report = usecase.yearly_report(&year).map_err(fail)?;
            if table {
                table::show_report(&report);
            } else {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Commands::ReportOptions => {
            let usecase = ReportUseCase::new(&timelog_repo, &holiday_repo);
            let years = usecase.options().map_err(fail)?;
            println!("{}", serde_json::to_string_pretty(&years)?);
        }
        Commands::Holiday(command) => {
            run_holiday(command, PublicHolidayService::new(holiday_repo), &timelog_repo)?
        }
        Commands::Log(command) => run_log(command, TimelogService::new(timelog_repo))?,
    }
    Ok(())
}

fn run_log(command: LogCommands, service: TimelogService<FileTimelogRepository>) -> Result<()> {
    match command {
        LogCommands::Start { reason, location, at } => {
            let at = parse_human_datetime(&at)?;
            let timelog = service.start(at, parse_reason(&reason)?, parse_location(&location)?)?;
            println!(
                "Timelog started: {} (ID: {})",
                timelog.start.format("%Y-%m-%d %H:%M"),
                timelog.id
            );
        }
        LogCommands::Stop { id, at } => {
            let timelog = service.stop(id, parse_human_datetime(&at)?)?;
            let duration = timelog.stop.map(|s| s - timelog.start).unwrap_or_else(TimeDelta::zero);
            println!(
                "Timelog stopped: {} (ID: {}, {}h {:02}m)",
                timelog.reason,
                timelog.id,
                duration.num_hours(),
                duration.num_minutes() % 60
            );
        }
        LogCommands::Add {
            start,
            stop,
            reason,
            location,
        } => {
            let start = parse_human_datetime(&start)?;
            let (reason, location) = (parse_reason(&reason)?, parse_location(&location)?);
            let mut timelog = Timelog::new(start, reason, location);
            if let Some(stop) = stop {
                timelog.stop = Some(parse_human_datetime(&stop)?);
            }
            let saved = service.save(timelog).map_err(|e| {
                let payload = match e.downcast_ref::<Error>() {
                    Some(Error::StartMandatory) => {
                        ErrorPayload::from_error(dto::CODE_VALIDATION, "invalid timelog", &e)
                    }
                    _ => ErrorPayload::from_error(dto::CODE_SAVE, "failed to save timelog", &e),
                };
                fail(payload)
            })?;
            println!("Timelog added: {} {} (ID: {})", saved.day_key(), saved.reason, saved.id);
        }
        LogCommands::List { year } => {
            let timelogs = match year {
                Some(year) => service.list_by_year(parse_year(&year)?)?,
                None => service.list()?,
            };
            table::show_timelogs(&timelogs);
        }
        LogCommands::Delete { id } => {
            service.delete(&id)?;
            println!("Timelog deleted: {}", id);
        }
    }
    Ok(())
}

fn run_holiday(
    command: HolidayCommands,
    service: PublicHolidayService<FilePublicHolidayRepository>,
    timelogs: &FileTimelogRepository,
) -> Result<()> {
    match command {
        HolidayCommands::Add {
            day,
            name,
            half_day,
        } => {
            let mut holiday = PublicHoliday::new(parse_day(&day)?, name.join(" "));
            holiday.half_day = half_day;
            let saved = service.save(holiday).map_err(|e| {
                let external = "failed to save public holiday";
                fail(ErrorPayload::from_error(dto::CODE_HOLIDAY_SAVE, external, &e))
            })?;
            println!("Public holiday added: {} {} (ID: {})", saved.date(), saved.name, saved.id);
        }
        HolidayCommands::List { year: Some(year) } => {
            table::show_holidays(&service.load_by_year(parse_year(&year)?)?);
        }
        HolidayCommands::List { year: None } => {
            let by_year = service.load_all(timelogs, Utc::now().year()).map_err(|e| {
                let external = "failed to load public holidays";
                fail(ErrorPayload::from_error(dto::CODE_HOLIDAYS_ALL, external, &e))
            })?;
            println!("{}", serde_json::to_string_pretty(&by_year)?);
        }
        HolidayCommands::Delete { id } => {
            service.delete(&id)?;
            println!("Public holiday deleted: {}", id);
        }
    }
    Ok(())
}
