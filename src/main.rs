use clap::Parser;
use letscover::{CoverRequest, CoverResponse, SetCoverService, SolverBackend, SolverConfig};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Solve set-cover variants through a MILP engine.
///
/// Reads a JSON request (a list of `{label: [elements]}` objects, a list of
/// `[label, [elements]]` pairs, or `{"sets": ..., "variant": ..., "k": ...}`)
/// and prints the selected labels as JSON.
#[derive(Debug, Parser)]
#[command(name = "letscover", version)]
struct Args {
    /// Request file; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Problem variant: strict, relaxed or transpose (overrides the request)
    #[arg(long)]
    variant: Option<String>,

    /// Budget: uncovered elements for relaxed, sets for transpose (overrides the request)
    #[arg(short, long, allow_negative_numbers = true)]
    k: Option<i64>,

    /// MILP engine: auto, highs or cbc
    #[arg(long, default_value = "auto")]
    backend: SolverBackend,

    /// Engine time limit in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Relative MIP gap at which the engine may stop
    #[arg(long)]
    gap: Option<f64>,

    /// Let the engine print its own log
    #[arg(long)]
    engine_output: bool,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            backend: self.backend,
            time_limit: self.time_limit,
            gap_tolerance: self.gap,
            verbose: self.engine_output,
        }
    }

    fn read_input(&self) -> std::io::Result<String> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
            _ => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the response
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let service = SetCoverService::from_config(args.solver_config())?;
    tracing::info!(solver = service.solver_name(), "Solver ready");

    let text = args.read_input()?;
    let result = CoverRequest::from_json_str(&text).and_then(|mut request| {
        if let Some(variant) = &args.variant {
            request.variant = variant.clone();
        }
        if args.k.is_some() {
            request.k = args.k;
        }
        service.solve_raw(request.sets, &request.variant, request.k)
    });

    let exit = if result.is_err() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    };

    let response = CoverResponse::from(result);
    let json = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", json);

    Ok(exit)
}
