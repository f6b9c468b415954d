//! simcfg CLI
//!
//! Entry point for the `simcfg` command-line tool.

use clap::{Parser, Subcommand};
use simcfg::{ConfigResolver, EntityDescription, TestPlan};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "simcfg")]
#[command(about = "Testbench configuration resolver for HDL simulation runs", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configurations to run for an entity and architecture
    Resolve {
        /// Path to the test plan file (TOML)
        #[arg(long, short = 'p')]
        plan: PathBuf,

        /// Path to the entity description file (JSON)
        #[arg(long, short = 'e')]
        entity: PathBuf,

        /// Architecture name to resolve for
        #[arg(long, short = 'a')]
        arch: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Parse and validate a test plan file
    Verify {
        /// Path to the test plan file (TOML)
        #[arg(long, short = 'p')]
        plan: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            plan,
            entity,
            arch,
            pretty,
        } => {
            run_resolve(&plan, &entity, &arch, pretty);
        }
        Commands::Verify { plan } => {
            run_verify(&plan);
        }
    }
}

fn run_resolve(plan_path: &PathBuf, entity_path: &PathBuf, arch: &str, pretty: bool) {
    let plan = match TestPlan::from_file(plan_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error loading plan: {}", e);
            process::exit(1);
        }
    };

    let entity = match EntityDescription::from_file(entity_path) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error loading entity description: {}", e);
            process::exit(1);
        }
    };

    let mut resolver = ConfigResolver::new();
    if let Err(e) = plan.apply(&mut resolver) {
        eprintln!("Error applying plan: {}", e);
        process::exit(1);
    }

    let configurations = match resolver.get_configurations(&entity, arch) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Resolution error: {}", e);
            process::exit(1);
        }
    };

    let json = if pretty {
        serde_json::to_string_pretty(&configurations)
    } else {
        serde_json::to_string(&configurations)
    };

    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_verify(plan_path: &PathBuf) {
    match TestPlan::from_file(plan_path) {
        Ok(plan) => {
            println!("Plan valid: {}", plan_path.display());
            println!();
            println!("  Generic defaults: {}", plan.generics.len());
            println!("  PLI registrations: {}", plan.pli.len());
            if !plan.configs.is_empty() {
                println!("  Named configurations:");
                for config in &plan.configs {
                    println!("    {}.{}", config.entity, config.name);
                }
            }
        }
        Err(e) => {
            eprintln!("Plan error: {}", e);
            process::exit(1);
        }
    }
}
