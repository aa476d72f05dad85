use clap::{Parser, Subcommand};
use shop_directory::{config, generate, output, pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shop-directory")]
#[command(about = "Static site generator for local business directories")]
#[command(long_about = "\
Static site generator for local business directories

Feed it a scraped map export and get a searchable static site: one index page
listing every business and one detail page per business.

Source structure:

  data/
  ├── config.toml      # Site config (optional): copy, language, column map, colors
  ├── listing.csv      # One row per business (required)
  └── images.csv       # Map link → photo URL (optional)

Output structure:

  docs/
  ├── index.html
  ├── assets/style.css
  ├── assets/filter.js
  └── stores/<slug>/index.html

Rows without a name or map link are skipped. Everything else degrades to a
placeholder rather than failing the build.

Run 'shop-directory gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml and the input CSVs
    #[arg(long, default_value = "data", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "docs", global = true)]
    output: PathBuf,

    /// Log skipped rows and written pages to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: collect → generate
    Build,
    /// Load and normalize the inputs without writing anything
    Check,
    /// Print the normalized records as JSON
    Manifest,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Build => {
            println!("==> Collecting {}", cli.source.display());
            let collected = pipeline::collect(&cli.source)?;

            println!("==> Generating HTML → {}", cli.output.display());
            init_thread_pool(&collected.config.processing);
            let report = generate::generate(&collected.shops, &collected.config, &cli.output)?;
            output::print_generate_output(&collected.shops, &report);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let collected = pipeline::collect(&cli.source)?;
            output::print_check_output(&collected);
            println!("==> Inputs are valid");
        }
        Command::Manifest => {
            let collected = pipeline::collect(&cli.source)?;
            let json = serde_json::to_string_pretty(&collected.shops)?;
            println!("{}", json);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `--verbose` forces `debug`; otherwise `RUST_LOG`, falling back to `warn`.
fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = if verbose {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. Config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
