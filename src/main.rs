use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use print_shop::config::{ReportConfig, SchedulerConfig};
use print_shop::report::write_report;
use print_shop::scheduler::{Assignment, LoadOutcome, Scheduler};

#[derive(Parser, Debug)]
#[command(name = "print-shop")]
#[command(version)]
#[command(about = "Assigns print jobs to the least-loaded printer")]
#[command(propagate_version = true)]
struct Args {
    /// Do not log dropped records or consistency failures
    #[arg(long, global = true)]
    quiet_errors: bool,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "table")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Load a system description and verify its consistency
    Check {
        /// Path to the XML system description
        file: PathBuf,
    },

    /// Load a system description, assign its jobs and write a report
    Run {
        /// Path to the XML system description
        file: PathBuf,

        /// Stop after this many assignments
        #[arg(long)]
        steps: Option<usize>,

        /// Mark every assigned job as finished right away
        #[arg(long)]
        finish: bool,

        /// Skip writing the report file
        #[arg(long)]
        no_report: bool,

        /// Directory reports are written to
        #[arg(long, default_value = "reports")]
        report_dir: PathBuf,

        /// Report file extension
        #[arg(long, default_value = "txt")]
        extension: String,
    },
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

// =============================================================================
// JSON Output Types
// =============================================================================

#[derive(Serialize)]
struct CheckOutput {
    #[serde(flatten)]
    outcome: LoadOutcome,
    inconsistency: Option<String>,
}

#[derive(Serialize)]
struct AssignmentOutput {
    job_number: i32,
    pages: i32,
    device: String,
    state: String,
}

#[derive(Serialize)]
struct RunOutput {
    #[serde(flatten)]
    outcome: LoadOutcome,
    assignments: Vec<AssignmentOutput>,
    remaining: usize,
    report: Option<String>,
}

// =============================================================================
// Helper Functions
// =============================================================================

fn describe(scheduler: &Scheduler, assignment: &Assignment) -> Option<AssignmentOutput> {
    let job = scheduler.job(assignment.job)?;
    let device = scheduler.device(assignment.device)?;
    Some(AssignmentOutput {
        job_number: job.number(),
        pages: job.page_count(),
        device: device.name().to_string(),
        state: job.state().to_string(),
    })
}

fn print_outcome(outcome: &LoadOutcome) {
    println!("Devices loaded:  {}", outcome.devices);
    println!("Jobs loaded:     {}", outcome.jobs);
    if outcome.dropped > 0 {
        println!("Records dropped: {}", outcome.dropped);
    }
    if outcome.skipped > 0 {
        println!("Tags skipped:    {}", outcome.skipped);
    }
    println!(
        "Consistent:      {}",
        if outcome.consistent { "yes" } else { "no" }
    );
}

// =============================================================================
// Command Handlers
// =============================================================================

fn handle_check(
    scheduler: &mut Scheduler,
    file: PathBuf,
    output_format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = scheduler.load(&file)?;

    match output_format {
        OutputFormat::Json => {
            let output = CheckOutput {
                outcome,
                inconsistency: scheduler.check_consistency().err().map(|e| e.to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            print_outcome(&outcome);
            if let Err(inconsistency) = scheduler.check_consistency() {
                println!("Reason:          {}", inconsistency);
            }
        }
    }

    if !outcome.consistent {
        std::process::exit(1);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_run(
    scheduler: &mut Scheduler,
    file: PathBuf,
    steps: Option<usize>,
    finish: bool,
    no_report: bool,
    report_config: ReportConfig,
    output_format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = scheduler.load(&file)?;
    if !outcome.consistent {
        eprintln!("Error: Inconsistent printing system, no jobs were scheduled");
        std::process::exit(1);
    }
    if scheduler.devices().is_empty() && scheduler.first_unprocessed_job().is_some() {
        eprintln!("Error: No devices available to process the queued jobs");
        std::process::exit(1);
    }

    let mut assignments = Vec::new();
    while steps.map_or(true, |limit| assignments.len() < limit) {
        let Some(assignment) = scheduler.assign_next() else {
            break;
        };
        if finish {
            scheduler.finish_job(assignment.job);
        }
        assignments.push(assignment);
    }

    let report = if no_report {
        None
    } else {
        Some(write_report(scheduler, &report_config)?)
    };

    let assignments: Vec<AssignmentOutput> = assignments
        .iter()
        .filter_map(|assignment| describe(scheduler, assignment))
        .collect();
    let remaining = scheduler.unfinished_jobs().len();

    match output_format {
        OutputFormat::Json => {
            let output = RunOutput {
                outcome,
                assignments,
                remaining,
                report: report.map(|path| path.display().to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            print_outcome(&outcome);
            if !assignments.is_empty() {
                println!();
                println!("{:<10} {:<8} {:<20} STATE", "JOB", "PAGES", "DEVICE");
                println!("{}", "-".repeat(52));
                for a in &assignments {
                    println!(
                        "{:<10} {:<8} {:<20} {}",
                        a.job_number, a.pages, a.device, a.state
                    );
                }
            }
            println!();
            println!("Unfinished jobs: {}", remaining);
            if let Some(path) = report {
                println!("Report:          {}", path.display());
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = SchedulerConfig::default().with_log_errors(!args.quiet_errors);
    let mut scheduler = Scheduler::new(config);

    match args.command {
        Commands::Check { file } => handle_check(&mut scheduler, file, &args.output),
        Commands::Run {
            file,
            steps,
            finish,
            no_report,
            report_dir,
            extension,
        } => {
            let report_config = ReportConfig::default()
                .with_directory(report_dir)
                .with_extension(&extension);
            handle_run(
                &mut scheduler,
                file,
                steps,
                finish,
                no_report,
                report_config,
                &args.output,
            )
        }
    }
}
