use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crawlfront::config::{PrerenderArgs, ServeArgs};
use crawlfront::{Server, edge, prerender};

#[derive(Parser)]
#[command(
    name = "crawlfront",
    about = "SEO prerendering and robots/sitemap edge rewriting for CreatorHub",
    version
)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Emit the prerender report as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write per-route HTML files with SEO metadata into the build output
    Prerender(PrerenderArgs),
    /// Serve /robots.txt and /sitemap.xml rewritten for the public domain
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Prerender(args) => {
            let config = args.build_config();
            info!(out_dir = %config.out_dir.display(), "prerendering");
            let report = prerender::run(&config).await.context("prerender failed")?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Commands::Serve(args) => {
            let state = edge::EdgeState::new(args.build_config()).context("building edge client")?;
            Server::bind(&args.bind)?
                .serve(edge::router(Arc::new(state)))
                .await
                .context("edge server failed")?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
