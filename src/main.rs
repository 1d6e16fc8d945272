use clap::Parser;
use pi_integral::{estimate_pi, Backend, Config, PiError};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pi_integral")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Estimate pi by parallel midpoint integration of 4/(1+x^2) over [0, 1]",
    long_about = None
)]
struct Cli {
    /// Number of subdivisions (default 100000000)
    #[arg(value_name = "N", allow_negative_numbers = true)]
    steps: Option<String>,

    /// Number of parallel workers (default: available hardware threads)
    #[arg(allow_negative_numbers = true)]
    workers: Option<String>,

    /// Where the workers run
    #[arg(long, value_enum, default_value_t = Backend::Threads)]
    backend: Backend,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pi_integral=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    if let Err(e) = run(&cli) {
        debug!(error = %e, "run failed");
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), PiError> {
    let config = Config::from_args(cli.steps.as_deref(), cli.workers.as_deref())?;
    debug!(steps = config.steps, workers = config.workers, "configuration accepted");

    println!("Subdivisions (n) = {}", config.steps);
    println!("Workers = {}", config.workers);

    let result = estimate_pi(&config, cli.backend)?;

    println!("Pi estimate = {:.12}", result.estimate);
    println!("Absolute error = {:.12}", result.absolute_error);
    println!("Elapsed = {:.12} s", result.elapsed.as_secs_f64());
    Ok(())
}
