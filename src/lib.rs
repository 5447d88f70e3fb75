//! Authoring, validation and packaging of skill bundles.
//!
//! A skill is a directory with a `SKILL.md` manifest (YAML frontmatter plus
//! markdown body) and optional `scripts/`, `references/` and `assets/`
//! folders. `skillpacks::validate` decides whether a bundle is well-formed;
//! everything else produces bundles for it or consumes its verdict.

pub mod config;
pub mod generator;
pub mod output;
pub mod package;
pub mod scaffold;
pub mod script_check;
pub mod skillpacks;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "skillkit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
