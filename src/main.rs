use anyhow::Result;
use censusflow::{
    cli::{rank_report, run_pipeline},
    config::RunConfig,
    summary::{Direction, RankOptions},
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reshape Census county extracts into merged county/state tables"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process and merge every source, then write tables and the division trend.
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long, default_value = "./output")]
        out: PathBuf,
        /// Value column for the division trend; defaults to the first source's label.
        #[arg(long)]
        trend_column: Option<String>,
    },
    /// Rank the counties of one state by mean value.
    Rank {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long, default_value = "NC")]
        state: String,
        #[arg(long, default_value = "top")]
        direction: Direction,
        #[arg(short, default_value_t = 5)]
        n: usize,
        #[arg(long, default_value = "enrollment_count")]
        column: String,
        /// Write the selected counties' series as JSON into this directory.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    match args.command {
        Command::Run {
            config,
            out,
            trend_column,
        } => {
            // ─── 2) load + process + merge + write ──────────────────
            let cfg = RunConfig::load(&config)?;
            info!("{} sources in {}", cfg.sources.len(), config.display());
            run_pipeline(&cfg, &out, trend_column.as_deref())?;
        }
        Command::Rank {
            config,
            state,
            direction,
            n,
            column,
            out,
        } => {
            let cfg = RunConfig::load(&config)?;
            let opts = RankOptions {
                column,
                state,
                direction,
                n,
            };
            let (ranked, _) = rank_report(&cfg, &opts, out.as_deref())?;
            for (i, c) in ranked.iter().enumerate() {
                match c.mean {
                    Some(m) => println!("{:>2}. {:<30} {:.2}", i + 1, c.county, m),
                    None => println!("{:>2}. {:<30} -", i + 1, c.county),
                }
            }
        }
    }

    Ok(())
}
