//! Scaffolding a new skill bundle from a typed template.

use crate::output::Output;
use crate::skillpacks::refs::{extract_references, RESOURCE_DIRS};
use crate::skillpacks::MANIFEST_FILE;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Starting point for a new skill
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Multi-step process
    #[default]
    Workflow,
    /// Wrapper around a script
    Tool,
    /// Domain context with reference docs
    Knowledge,
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Workflow => "workflow",
            Template::Tool => "tool",
            Template::Knowledge => "knowledge",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            Template::Workflow => WORKFLOW_TEMPLATE,
            Template::Tool => TOOL_TEMPLATE,
            Template::Knowledge => KNOWLEDGE_TEMPLATE,
        }
    }

    /// SKILL.md text for a skill called `name`
    pub fn render(&self, name: &str) -> String {
        self.source().replace("{name}", name)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const WORKFLOW_TEMPLATE: &str = r#"---
name: {name}
description: |
  A workflow skill for [High-level Task].
  # TRIGGER SCENARIOS
  - User wants to perform a multi-step [Process]
  - Complex [Data Type] needs to be processed sequentially
---

# {name} Workflow

## Steps
1. **Analyze**: Initial state assessment.
2. **Execute**: Main processing step.
3. **Verify**: Integrity check.

## Details
Refer to [specific references] if needed.
"#;

const TOOL_TEMPLATE: &str = r#"---
name: {name}
description: |
  A tool wrapper skill for [Specific Tool/Script].
  # TRIGGER SCENARIOS
  - User requests [Action] that requires [Script]
  - [Input File] needs to be processed via [Library]
---

# {name} Tool

## Usage
Run the following script:
`python scripts/main.py --input <file>`

## Parameters
- `--input`: Path to the input resource.
"#;

const KNOWLEDGE_TEMPLATE: &str = r#"---
name: {name}
description: |
  A knowledge skill providing context for [Domain].
  # TRIGGER SCENARIOS
  - User asks about [Domain/Service]
  - Reference information for [Schema/Policy] is needed
---

# {name} Knowledge Base

## Overview
This skill provides context about [Domain].

## Key Concepts
- **Concept A**: Description.
- **Concept B**: Description.

## References
Detailed docs are in `references/docs.md`.
"#;

/// Scaffolder name rule: starts with a letter, then `[a-z0-9-]`, no trailing hyphen.
///
/// Stricter than [`crate::skillpacks::validate::is_valid_name`]; the two rules
/// are kept separate on purpose.
pub fn validate_skill_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    let rest_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !starts_with_letter || !rest_ok {
        return Err("Skill name must be lowercase with hyphens (kebab-case)".to_string());
    }
    if name.ends_with('-') {
        return Err("Skill name cannot end with a hyphen".to_string());
    }
    Ok(())
}

/// Create `<parent>/<name>` from `template` and return the new directory
pub fn init_skill(
    name: &str,
    parent: &Path,
    template: Template,
    out: &dyn Output,
) -> Result<PathBuf> {
    if let Err(msg) = validate_skill_name(name) {
        bail!("{}: '{}'", msg, name);
    }

    let skill_dir = parent.join(name);
    std::fs::create_dir_all(&skill_dir)
        .with_context(|| format!("Failed to create {}", skill_dir.display()))?;
    for dir in RESOURCE_DIRS {
        std::fs::create_dir_all(skill_dir.join(dir))?;
    }

    let content = template.render(name);
    let manifest = skill_dir.join(MANIFEST_FILE);
    if manifest.exists() {
        tracing::warn!(path = %manifest.display(), "overwriting existing manifest");
    }
    std::fs::write(&manifest, &content)
        .with_context(|| format!("Failed to write {}", manifest.display()))?;

    let body = crate::skillpacks::parser::split_frontmatter(&content)
        .map(|fm| fm.body)
        .unwrap_or_default();
    write_placeholders(&skill_dir, extract_references(body))?;

    out.line(&format!(
        "Initialized '{}' skill at: {}",
        template,
        skill_dir.display()
    ));
    Ok(skill_dir)
}

/// Create an empty file for each referenced path that does not exist yet
pub(crate) fn write_placeholders(
    skill_dir: &Path,
    references: impl IntoIterator<Item = String>,
) -> Result<Vec<String>> {
    let mut created = Vec::new();
    for rel in references {
        let path = skill_dir.join(&rel);
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, "")
            .with_context(|| format!("Failed to write placeholder {}", path.display()))?;
        tracing::debug!(reference = %rel, "created placeholder");
        created.push(rel);
    }
    Ok(created)
}
