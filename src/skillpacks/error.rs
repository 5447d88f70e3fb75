//! Validation failure kinds.
//!
//! Every variant is a verdict about the bundle, not a fault of the tool.
//! The `Display` text is exactly what the reporting entry points print.

use std::path::PathBuf;
use thiserror::Error;

/// Why a skill bundle was judged invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `SKILL.md` is absent from the bundle root.
    #[error("Missing {}", .path.display())]
    MissingManifest { path: PathBuf },

    /// `SKILL.md` exists but could not be read as text.
    #[error("Failed to read {}: {reason}", .path.display())]
    ManifestUnreadable { path: PathBuf, reason: String },

    /// No `---` delimited block at the start of the manifest.
    #[error("Invalid or missing YAML frontmatter in SKILL.md")]
    MalformedMetadataBlock,

    /// The delimited block is not valid YAML.
    #[error("YAML Syntax Error: {0}")]
    MetadataSyntaxError(String),

    /// The block parsed, but to a scalar or a sequence.
    #[error("Frontmatter must be a YAML dictionary")]
    MetadataNotAMapping,

    #[error("Missing required field '{0}' in frontmatter")]
    MissingField(&'static str),

    #[error("Skill name '{0}' must be kebab-case (lowercase, digits, hyphens)")]
    InvalidNameFormat(String),

    /// Body references that do not exist on disk, sorted.
    #[error("{}", format_missing(.0))]
    DanglingReference(Vec<String>),
}

fn format_missing(missing: &[String]) -> String {
    missing
        .iter()
        .map(|r| format!("Referenced file not found: {}", r))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ValidationError {
    /// Short stable identifier, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingManifest { .. } => "missing_manifest",
            ValidationError::ManifestUnreadable { .. } => "manifest_unreadable",
            ValidationError::MalformedMetadataBlock => "malformed_metadata_block",
            ValidationError::MetadataSyntaxError(_) => "metadata_syntax_error",
            ValidationError::MetadataNotAMapping => "metadata_not_a_mapping",
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::InvalidNameFormat(_) => "invalid_name_format",
            ValidationError::DanglingReference(_) => "dangling_reference",
        }
    }
}
