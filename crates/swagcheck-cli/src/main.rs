//! SwagCheck - swagger-ui version fingerprinting and vulnerability audit
//!
//! Reads a list of URLs, fingerprints the swagger-ui version each one
//! serves, and reports which known vulnerabilities apply.

mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};
use swagcheck_common::config::Config;
use swagcheck_common::logging::{init_logging_with_config, LogConfig};
use swagcheck_detect::{AssetClassifier, HttpClient};
use swagcheck_git::{prepare_repository, GitCli, VersionResolver};
use swagcheck_vuln::VulnerabilityCatalog;
use tracing::info;

/// SwagCheck swagger-ui audit tool
#[derive(Parser, Debug)]
#[command(name = "swagcheck")]
#[command(version)]
#[command(about = "Fingerprints deployed swagger-ui versions and reports known vulnerabilities", long_about = None)]
struct Args {
    /// File containing URLs pointing to swagger-uis, one per line
    #[arg(long)]
    url_list: String,

    /// Local repository containing swagger-ui
    #[arg(long)]
    repo: Option<String>,

    /// Git URL of swagger-ui
    #[arg(long)]
    git_source: Option<String>,

    /// URL containing the swagger-ui vulnerability table
    #[arg(long)]
    snyk_url: Option<String>,

    /// Do not clone the swagger-ui repo or validate its remote
    #[arg(long)]
    skip_repo_fetch: bool,

    /// Print one line of output per URL
    #[arg(long)]
    one_line: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "swagcheck.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (pretty, json, compact); overrides the config file
    #[arg(long)]
    log_format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = if Path::new(&args.config).exists() {
        Config::from_file(&args.config)?
    } else {
        Config::default()
    };
    let config = apply_overrides(config.merge_env(), &args);

    init_logging_with_config(
        LogConfig::new()
            .level(&config.logging.level)
            .format_from_str(&config.logging.format),
    );

    // Fatal configuration checks; everything past this point degrades
    // per URL instead of aborting.
    if !Path::new(&args.url_list).is_file() {
        bail!("URL file {} doesn't exist", args.url_list);
    }
    prepare_repository(&config.repository)?;
    info!(
        "Using local swagger-ui repository at {}",
        config.repository.path
    );

    let resolver = VersionResolver::new(
        Box::new(GitCli::new(&config.repository.path)),
        config.repository.special_cases.clone(),
    );
    let classifier = AssetClassifier::new(
        HttpClient::new(config.http.timeout_seconds, &config.http.user_agent),
        resolver,
    );

    let mut catalog =
        VulnerabilityCatalog::new(&config.catalog.url, &config.catalog.version_chip_class)?;
    catalog
        .load(&HttpClient::new(
            config.http.timeout_seconds,
            &config.http.user_agent,
        ))
        .await;

    let urls = std::fs::read_to_string(&args.url_list)
        .with_context(|| format!("failed to read URL file {}", args.url_list))?;
    let urls: Vec<&str> = urls
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    info!("Got {} URLs to try...", urls.len());
    let checkpoints = progress_checkpoints(urls.len());
    let start = Instant::now();
    let mut stdout = io::stdout();

    for (index, url) in urls.iter().enumerate() {
        if index != 0 {
            if let Some(percent) = checkpoints.get(&index) {
                let remaining = estimate_remaining(start.elapsed(), *percent);
                info!("Status: {}%, estimated {}s left.", percent, remaining);
            }
        }

        let version = classifier.classify(url).await;
        let vulns = match &version {
            Some(ver) => catalog.matches(ver),
            None => Vec::new(),
        };
        report::print_outcome(&mut stdout, url, version.as_deref(), &vulns, args.one_line)?;
    }

    info!("Done.");
    Ok(())
}

/// Command-line arguments win over config file and environment.
fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(repo) = &args.repo {
        config.repository.path = repo.clone();
    }
    if let Some(source) = &args.git_source {
        config.repository.remote = source.clone();
    }
    if let Some(url) = &args.snyk_url {
        config.catalog.url = url.clone();
    }
    if args.skip_repo_fetch {
        config.repository.fetch = false;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &args.log_format {
        config.logging.format = format.clone();
    }
    config
}

/// URL indexes at which to emit a progress line, in 5% steps.
fn progress_checkpoints(total: usize) -> HashMap<usize, u64> {
    (1..20).map(|step| (total * step / 20, (step * 5) as u64)).collect()
}

/// Linear estimate of the seconds left given the elapsed time at
/// `percent` completion.
fn estimate_remaining(elapsed: Duration, percent: u64) -> u64 {
    elapsed.as_secs() * (100 - percent) / percent
}
