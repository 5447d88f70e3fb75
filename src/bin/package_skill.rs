//! Standalone packager: validates, then writes `<dist>/<dir-name>.skill`.

use clap::Parser;
use skillkit::output::ConsoleOutput;
use skillkit::package::package_skill;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "package-skill", about = "Validate and package a skill directory")]
struct Args {
    /// Skill directory
    skill_directory: PathBuf,

    /// Output directory for the archive
    #[arg(default_value = "./dist")]
    dist_directory: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    skillkit::init_tracing(false);

    let out = ConsoleOutput::new();
    match package_skill(&args.skill_directory, &args.dist_directory, &out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e);
            ExitCode::FAILURE
        }
    }
}
