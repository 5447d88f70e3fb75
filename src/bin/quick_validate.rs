//! Standalone validator: prints the verdict message, exits 0 when the skill is valid.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "quick-validate", about = "Validate a skill directory")]
struct Args {
    /// Skill directory
    skill_directory: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    skillkit::init_tracing(false);

    let (valid, message) = skillkit::skillpacks::validate(&args.skill_directory).into_parts();
    println!("{}", message);
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
