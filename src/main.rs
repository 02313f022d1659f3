//! `wormhole` binary: parse the command line, load options and fly.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see per-pass
//! details and the frame rate.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use wormhole::{Options, Viewer, WormholeError};

/// Camera fly-through of a wireframe wormhole.
#[derive(Parser, Debug)]
#[command(name = "wormhole", version, about, long_about = None)]
struct Cli {
    /// TOML options file. Missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Seed for the box scatter. Overrides `scene.seed`.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the JSON schema of the options and exit.
    #[arg(long)]
    print_schema: bool,

    /// Print the effective options as TOML and exit.
    #[arg(long)]
    dump_options: bool,
}

fn load_options(cli: &Cli) -> Result<Options, WormholeError> {
    let mut options = match &cli.options {
        Some(path) => {
            log::info!("loading options from {}", path.display());
            Options::load(path)?
        }
        None => Options::default(),
    };
    if let Some(seed) = cli.seed {
        options.scene.seed = Some(seed);
    }
    options.validate()?;
    Ok(options)
}

#[allow(clippy::print_stdout)]
fn run(cli: &Cli) -> Result<(), WormholeError> {
    if cli.print_schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| WormholeError::OptionsParse(e.to_string()))?;
        println!("{schema}");
        return Ok(());
    }

    let options = load_options(cli)?;
    if cli.dump_options {
        print!("{}", options.to_toml()?);
        return Ok(());
    }

    Viewer::builder().with_options(options).build().run()
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
