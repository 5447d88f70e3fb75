//! # skillkit CLI Entry Point
//!
//! Assembles subcommands and dispatches to the library.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use skillkit::config::Config;
use skillkit::generator::prompt::{EditorSource, LineSource, ReaderSource};
use skillkit::output::{ConsoleOutput, Output};
use skillkit::scaffold::{self, Template};
use skillkit::script_check::{self, CheckSettings};
use skillkit::{generator, package, skillpacks};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Create, validate, test and package agent skills.
#[derive(Parser, Debug)]
#[command(name = "skillkit", version, about)]
struct Cli {
    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold a new skill from a template.
    Init(InitArgs),
    /// Build a skill step by step through prompts.
    Create(CreateArgs),
    /// Check a skill's structure and references.
    Validate(PathArg),
    /// Validate a skill and write a .skill archive.
    Package(PackageArgs),
    /// Syntax-check the skill's Python scripts.
    Test(TestArgs),
}

#[derive(Args, Debug)]
struct PathArg {
    /// Skill directory
    skill: PathBuf,
}

#[derive(Args, Debug)]
struct InitArgs {
    /// Name of the skill (kebab-case)
    name: String,

    /// Directory to create the skill in
    #[arg(long, env = "SKILLKIT_OUTPUT_DIR")]
    path: Option<PathBuf>,

    /// Template to start from
    #[arg(long = "type", value_enum)]
    template: Option<Template>,
}

#[derive(Args, Debug)]
struct CreateArgs {
    /// Default answer for the output directory question
    #[arg(long, env = "SKILLKIT_OUTPUT_DIR")]
    path: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PackageArgs {
    /// Skill directory
    skill: PathBuf,

    /// Where the archive goes
    #[arg(env = "SKILLKIT_DIST_DIR")]
    dist: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TestArgs {
    /// Skill directory
    skill: PathBuf,

    /// Python interpreter used for the syntax check
    #[arg(long, env = "SKILLKIT_PYTHON")]
    python: Option<String>,

    /// Per-script timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    skillkit::init_tracing(cli.verbose);

    let out = ConsoleOutput::new();

    match cli.command {
        Commands::Init(args) => {
            let config = Config::load()?;
            let parent = args.path.unwrap_or_else(|| config.output_dir());
            let template = args.template.unwrap_or_else(|| config.template());
            scaffold::init_skill(&args.name, &parent, template, &out)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Create(args) => {
            let config = Config::load()?;
            let default_output = args
                .path
                .or(config.init.output_dir)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string());
            let mut source: Box<dyn LineSource> = if std::io::stdin().is_terminal() {
                Box::new(EditorSource::new()?)
            } else {
                Box::new(ReaderSource::new(std::io::stdin().lock()))
            };
            match generator::run(source.as_mut(), &out, &default_output) {
                Ok(_) => Ok(ExitCode::SUCCESS),
                Err(e) => {
                    out.error(&format!("Error creating skill: {:#}", e));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Validate(args) => {
            let report = skillpacks::validate(&args.skill);
            println!("{}", report.message);
            Ok(exit_code(report.valid))
        }
        Commands::Package(args) => {
            let config = Config::load()?;
            let dist = args.dist.unwrap_or_else(|| config.dist_dir());
            match package::package_skill(&args.skill, &dist, &out) {
                Ok(_) => Ok(ExitCode::SUCCESS),
                Err(e) => {
                    println!("{}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Test(args) => {
            let config = Config::load()?;
            let settings = CheckSettings {
                interpreter: args.python.unwrap_or_else(|| config.interpreter()),
                timeout: Duration::from_millis(
                    args.timeout_ms.unwrap_or_else(|| config.timeout_ms()),
                ),
            };
            let passed = script_check::check_scripts(&args.skill, &settings, &out)?;
            Ok(exit_code(passed))
        }
    }
}
