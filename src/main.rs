use clap::Parser;
use compendium::Summary;
use compendium::error::{ErrorKind, Result};
use compendium_config::Config;
use exn::ResultExt;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Build or update the crafted-item compendium from the facility and tool tables.
#[derive(Parser)]
#[command(name = "compendium", version, about)]
struct Cli {
    /// Config file (TOML, YAML or JSON, by extension).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory holding the input tables and the compendium.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "compendium=info",
        1 => "compendium=debug",
        _ => "compendium=trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(data_dir) = &cli.data_dir {
        config.paths.data_dir = data_dir.clone();
    }
    Ok(config)
}

/// `Ok(None)` if interrupted before the compendium was written.
async fn build(cli: &Cli) -> Result<Option<Summary>> {
    let config = load_config(cli)?;
    tokio::select! {
        result = compendium::run(&config) => result.map(Some),
        _ = tokio::signal::ctrl_c() => Ok(None),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("could not start async runtime: {err}");
            return ExitCode::from(2);
        },
    };
    match runtime.block_on(build(&cli)) {
        Ok(Some(summary)) => {
            println!("{summary}");
            ExitCode::SUCCESS
        },
        Ok(None) => {
            tracing::warn!("Interrupted; compendium not written");
            ExitCode::from(1)
        },
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::from(2)
        },
    }
}
