//! Skill packs: a `SKILL.md` manifest with YAML frontmatter plus optional
//! `scripts/`, `references/` and `assets/` folders.
//!
//! This module parses manifests and decides whether a bundle on disk is
//! well-formed.

pub mod error;
pub mod parser;
pub mod refs;
pub mod validate;

/// Manifest file name, relative to the bundle root
pub const MANIFEST_FILE: &str = "SKILL.md";

pub use error::ValidationError;
pub use parser::{MetaValue, Metadata};
pub use validate::{check, validate, ValidSkill, ValidationReport};
