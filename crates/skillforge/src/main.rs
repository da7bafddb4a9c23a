// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Skillforge - build and invoke agent tools from stored skills.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skillforge_config::SkillforgeConfig;

/// Skillforge - build and invoke agent tools from stored skills.
#[derive(Parser, Debug)]
#[command(name = "skillforge", version, about, long_about = None)]
struct Cli {
    /// Config file to load instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List stored skills.
    Skills {
        /// Only list skills of this project.
        #[arg(long)]
        project: Option<String>,
    },
    /// Show the tools a skill turns into.
    Tools {
        /// Skill id, or skill name when `--project` is given.
        skill: String,
        #[arg(long)]
        project: Option<String>,
    },
    /// Invoke one tool of a skill with the given input.
    Invoke {
        /// Skill id, or skill name when `--project` is given.
        skill: String,
        /// Tool name, e.g. `sql_db_query`.
        tool: String,
        /// SQL query or question; a JSON object is passed through as is.
        input: String,
        #[arg(long)]
        project: Option<String>,
    },
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => skillforge_config::load_and_validate_path(path),
        None => skillforge_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            skillforge_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let code = match run(cli.command, config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    };
    std::process::exit(code);
}

async fn run(
    command: Commands,
    config: SkillforgeConfig,
) -> Result<i32, skillforge_core::SkillforgeError> {
    if let Commands::Config = command {
        println!("{}", commands::render_config(&config)?);
        return Ok(0);
    }

    let app = commands::App::open(config)?;
    match command {
        Commands::Skills { project } => {
            print!("{}", app.list_skills(project.as_deref())?);
            Ok(0)
        }
        Commands::Tools { skill, project } => {
            print!("{}", app.describe_tools(&skill, project.as_deref())?);
            Ok(0)
        }
        Commands::Invoke {
            skill,
            tool,
            input,
            project,
        } => {
            let output = app
                .invoke(&skill, project.as_deref(), &tool, &input)
                .await?;
            println!("{}", output.content);
            Ok(if output.is_error { 1 } else { 0 })
        }
        Commands::Config => Ok(0),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("skillforge={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
