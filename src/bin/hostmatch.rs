//! hostmatch: CLI tool for checking addresses against a rule list.

use clap::{Args, Parser, Subcommand};
use hostmatch::{RuleConfig, RuleSet};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "hostmatch")]
#[command(version)]
#[command(about = "Check addresses against NO_PROXY style rule lists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where to read rules from. Sources are combined in the order
/// env, file, then `--rule` flags.
#[derive(Args)]
struct RuleSources {
    /// Rule entry (repeatable)
    #[arg(short, long = "rule")]
    rules: Vec<String>,

    /// Rule file (.json, .yaml/.yml, otherwise one rule per line)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Environment variable holding a comma separated rule list
    #[arg(short, long)]
    env: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether addresses match; exits 1 if any does not
    Check {
        #[command(flatten)]
        sources: RuleSources,

        /// Addresses to check (host[:port][/path])
        #[arg(required = true)]
        addrs: Vec<String>,
    },

    /// Print rule counts per bucket
    Stats {
        #[command(flatten)]
        sources: RuleSources,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { sources, addrs } => {
            load_rules(&sources).map(|ruleset| check(&ruleset, &addrs))
        }
        Commands::Stats { sources } => load_rules(&sources).map(|ruleset| {
            print_stats(&ruleset);
            true
        }),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Collect rules from every configured source.
fn load_rules(sources: &RuleSources) -> hostmatch::Result<RuleSet> {
    let mut config = RuleConfig::new("cli", Vec::<String>::new());

    if let Some(var) = &sources.env {
        config.merge(RuleConfig::from_env(var)?);
    }

    if let Some(path) = &sources.file {
        let file_config = RuleConfig::from_file(path)?;
        log::info!(
            "Loaded {} rules from {}",
            file_config.rules.len(),
            path.display()
        );
        config.merge(file_config);
    }

    config.merge(RuleConfig::new("", sources.rules.iter().cloned()));

    if config.rules.is_empty() {
        log::warn!("No rules given; only the empty address will match");
    }

    Ok(RuleSet::from_config(&config))
}

fn check(ruleset: &RuleSet, addrs: &[String]) -> bool {
    let mut all = true;
    for addr in addrs {
        let matched = ruleset.matches(addr);
        println!("{}\t{}", addr, if matched { "match" } else { "no-match" });
        all &= matched;
    }
    all
}

fn print_stats(ruleset: &RuleSet) {
    let stats = ruleset.stats();
    if stats.match_all {
        println!("match all: yes");
        return;
    }
    println!("ip:          {}", stats.ip);
    println!("domain:      {}", stats.domain);
    println!("ip+path:     {}", stats.ip_path);
    println!("domain+path: {}", stats.domain_path);
    println!("dropped:     {}", stats.dropped);
}
