use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use v2ray_to_clash::models::{CustomServer, Options};
use v2ray_to_clash::settings::load_options;

/// Convert V2Ray-style share links into a Clash configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File with one share link per line (reads stdin when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file path (writes stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Options file (TOML or YAML); flags below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit a full configuration instead of a bare proxy list
    #[arg(long)]
    full: bool,

    /// Use redir-host instead of fake-ip DNS
    #[arg(long)]
    redir_host: bool,

    /// Leave out the BEST-PING url-test group
    #[arg(long)]
    no_best_ping: bool,

    /// Add a LOAD-BALANCE group
    #[arg(long)]
    load_balance: bool,

    /// Add a FALLBACK group
    #[arg(long)]
    fallback: bool,

    /// Add every strategy group
    #[arg(long)]
    all_groups: bool,

    /// Disable the ads blocklist
    #[arg(long)]
    no_ads_block: bool,

    /// Disable the porn blocklist
    #[arg(long)]
    no_porn_block: bool,

    /// Skip links that fail to parse instead of aborting
    #[arg(long)]
    skip_failed: bool,

    /// Replace every server address with this host
    #[arg(long, value_name = "HOST")]
    custom_server: Option<String>,

    /// Prefix the original server name with the custom host instead of keeping it
    #[arg(long, requires = "custom_server")]
    wildcard: bool,
}

impl Args {
    /// Apply command line flags on top of `options`.
    fn apply_to(&self, options: &mut Options) {
        options.is_full_config |= self.full;
        if self.redir_host {
            options.use_fake_ip = false;
        }
        if self.no_best_ping {
            options.best_ping = false;
        }
        options.load_balance |= self.load_balance;
        options.fallback |= self.fallback;
        options.all_groups |= self.all_groups;
        if self.no_ads_block {
            options.ads_block = false;
        }
        if self.no_porn_block {
            options.porn_block = false;
        }
        options.skip_failed_links |= self.skip_failed;
        if let Some(value) = &self.custom_server {
            options.custom_server = Some(CustomServer {
                value: value.clone(),
                wildcard: self.wildcard,
            });
        }
    }
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read links from {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read links from stdin")?;
            Ok(buffer)
        }
    }
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    // Parse command line arguments
    let args = Args::parse();

    let mut options = match &args.config {
        Some(path) => load_options(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => Options::default(),
    };
    args.apply_to(&mut options);

    let links = read_input(args.input.as_ref())?;
    let config = v2ray_to_clash::convert(&links, &options).context("Conversion failed")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &config)
                .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
            info!("Configuration written to {}", path.display());
        }
        None => print!("{}", config),
    }

    Ok(())
}
