//! Interactive skill generator.
//!
//! Asks for a name, description, skill type, agent tools and bundled
//! resources, then writes a SKILL.md composed from those answers together
//! with stub files, and validates the result.

pub mod prompt;
pub mod snippets;

use crate::output::Output;
use crate::scaffold::{validate_skill_name, write_placeholders};
use crate::skillpacks::parser::split_frontmatter;
use crate::skillpacks::refs::extract_references;
use crate::skillpacks::{validate, MANIFEST_FILE};
use anyhow::{Context, Result};
use prompt::{LineSource, Prompter};
use std::path::{Path, PathBuf};

/// Minimum description length accepted by the generator
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Shape of the generated skill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillType {
    Workflow,
    Tool,
    Knowledge,
    Interactive,
}

impl SkillType {
    pub const ALL: [SkillType; 4] = [
        SkillType::Workflow,
        SkillType::Tool,
        SkillType::Knowledge,
        SkillType::Interactive,
    ];

    fn menu_label(&self) -> &'static str {
        match self {
            SkillType::Workflow => "Workflow - Multi-step process (e.g., deployment, testing)",
            SkillType::Tool => "Tool Integration - Specific formats/APIs (e.g., PDF, GitHub)",
            SkillType::Knowledge => "Knowledge Base - Domain expertise (e.g., schemas, policies)",
            SkillType::Interactive => {
                "Interactive - User-guided workflows (e.g., tutorials, reviews)"
            }
        }
    }
}

/// Agent capability the skill can document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentTool {
    BrowserSubagent,
    GenerateImage,
    NotifyUser,
    TaskBoundary,
    RunCommand,
}

impl AgentTool {
    pub const ALL: [AgentTool; 5] = [
        AgentTool::BrowserSubagent,
        AgentTool::GenerateImage,
        AgentTool::NotifyUser,
        AgentTool::TaskBoundary,
        AgentTool::RunCommand,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AgentTool::BrowserSubagent => "browser_subagent",
            AgentTool::GenerateImage => "generate_image",
            AgentTool::NotifyUser => "notify_user",
            AgentTool::TaskBoundary => "task_boundary",
            AgentTool::RunCommand => "run_command",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            AgentTool::BrowserSubagent => "Web automation and data extraction",
            AgentTool::GenerateImage => "Visual asset generation",
            AgentTool::NotifyUser => "User interaction and approval",
            AgentTool::TaskBoundary => "Progress tracking",
            AgentTool::RunCommand => "Script execution",
        }
    }

    fn menu_label(&self) -> &'static str {
        match self {
            AgentTool::BrowserSubagent => {
                "browser_subagent - Web automation, scraping, visual verification"
            }
            AgentTool::GenerateImage => "generate_image - UI mockups, diagrams, visual assets",
            AgentTool::NotifyUser => "notify_user - User approval points, feedback requests",
            AgentTool::TaskBoundary => "task_boundary - Progress tracking for long operations",
            AgentTool::RunCommand => "run_command - Execute scripts, shell commands",
        }
    }
}

/// Everything the generator needs to write a skill
#[derive(Debug, Clone)]
pub struct SkillInfo {
    pub name: String,
    pub description: String,
    pub triggers: String,
    pub skill_type: SkillType,
    pub tools: Vec<AgentTool>,
    pub needs_scripts: bool,
    pub needs_references: bool,
    pub needs_assets: bool,
}

impl SkillInfo {
    fn needs_resources(&self) -> bool {
        self.needs_scripts || self.needs_references || self.needs_assets
    }
}

/// Quote a YAML scalar when the plain form would not read back as the same string
fn yaml_scalar(value: &str) -> String {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%',
        '@', '`',
    ];
    let needs_quotes = value.is_empty()
        || value.trim() != value
        || value.starts_with(INDICATORS)
        || value.contains(": ")
        || value.contains(" #")
        || value.ends_with(':')
        || value.contains(['\n', '\t']);
    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\t', "\\t");
    format!("\"{}\"", escaped)
}

/// Compose SKILL.md from the collected answers
pub fn compose_manifest(info: &SkillInfo) -> String {
    let description = format!("{} Use when {}", info.description, info.triggers);
    let mut content = format!(
        "---\nname: {name}\ndescription: {desc}\n---\n\n# {title}\n\n## Overview\n\n{overview}\n\nThis skill is triggered when: {triggers}\n\n",
        name = info.name,
        desc = yaml_scalar(&description),
        title = snippets::title_case(&info.name),
        overview = info.description,
        triggers = info.triggers,
    );

    content.push_str(snippets::type_section(info.skill_type));

    if !info.tools.is_empty() {
        content.push_str("\n## Agent Tools\n");
        content.push_str("\nThis skill uses the following agent capabilities:\n");
        for tool in &info.tools {
            content.push_str(&format!("- **{}**: {}\n", tool.name(), tool.summary()));
        }
        for tool in &info.tools {
            content.push_str(&snippets::tool_example(*tool, &info.name));
        }
    }

    if info.needs_resources() {
        content.push_str("\n## Bundled Resources\n\n");
        if info.needs_scripts {
            content.push_str("### Scripts\n\n");
            content.push_str(
                "This skill includes executable scripts for deterministic operations:\n\n",
            );
            content.push_str("- `scripts/[script-name].py`: [Description]\n\n");
        }
        if info.needs_references {
            content.push_str("### References\n\n");
            content.push_str("Additional documentation and reference materials:\n\n");
            content.push_str("- `references/[reference-name].md`: [Description]\n\n");
        }
        if info.needs_assets {
            content.push_str("### Assets\n\n");
            content.push_str("Templates and resources used in output:\n\n");
            content.push_str("- `assets/[asset-name]`: [Description]\n\n");
        }
    }

    content.push_str(snippets::BEST_PRACTICES);
    content
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the skill directory under `output_path` and return it
pub fn create_skill_structure(
    info: &SkillInfo,
    output_path: &Path,
    out: &dyn Output,
) -> Result<PathBuf> {
    let skill_dir = output_path.join(&info.name);
    std::fs::create_dir_all(&skill_dir)
        .with_context(|| format!("Failed to create {}", skill_dir.display()))?;

    let content = compose_manifest(info);
    write_file(&skill_dir.join(MANIFEST_FILE), &content)?;
    out.success(&format!("Created {}/{}", info.name, MANIFEST_FILE));

    if info.needs_scripts {
        write_file(
            &skill_dir.join("scripts/example_script.py"),
            &snippets::example_script(&info.name),
        )?;
        out.success("Created scripts/example_script.py stub");
    }
    if info.needs_references {
        write_file(
            &skill_dir.join("references/example_reference.md"),
            snippets::EXAMPLE_REFERENCE,
        )?;
        out.success("Created references/example_reference.md stub");
    }
    if info.needs_assets {
        write_file(&skill_dir.join("assets/README.md"), snippets::ASSETS_README)?;
        out.success("Created assets/ directory");
    }

    let body = split_frontmatter(&content).map(|fm| fm.body).unwrap_or_default();
    let placeholders = write_placeholders(&skill_dir, extract_references(body))?;
    for rel in &placeholders {
        out.success(&format!("Created placeholder {}", rel));
    }

    Ok(skill_dir)
}

/// Ask every question of the guided flow
pub fn collect_info(
    prompter: &mut Prompter<'_>,
    out: &dyn Output,
    default_output: &str,
) -> Result<(SkillInfo, PathBuf)> {
    out.info("Step 1: Basic Information");
    let name = prompter.input(
        "Skill name (kebab-case, e.g., 'web-scraper')",
        None,
        Some(&validate_skill_name),
    )?;
    let min_description = |v: &str| {
        if v.chars().count() >= MIN_DESCRIPTION_CHARS {
            Ok(())
        } else {
            Err(format!(
                "Description should be at least {} characters",
                MIN_DESCRIPTION_CHARS
            ))
        }
    };
    let description = prompter.input(
        "Brief description (1-2 sentences)",
        None,
        Some(&min_description),
    )?;
    let triggers = prompter.input(
        "When should this skill trigger? (e.g., 'users need to extract data from websites')",
        None,
        None,
    )?;

    out.info("Step 2: Skill Type");
    let labels: Vec<&str> = SkillType::ALL.iter().map(|t| t.menu_label()).collect();
    let skill_type = SkillType::ALL[prompter.choice("What type of skill is this?", &labels)?];

    out.info("Step 3: Agent Tools");
    let labels: Vec<&str> = AgentTool::ALL.iter().map(|t| t.menu_label()).collect();
    let tools = prompter
        .multichoice("Which agent tools will this skill use?", &labels)?
        .into_iter()
        .map(|i| AgentTool::ALL[i])
        .collect();

    out.info("Step 4: Resources");
    let resources = prompter.multichoice(
        "What resources does this skill need?",
        &[
            "Scripts - Deterministic operations",
            "References - Documentation, schemas, examples",
            "Assets - Templates, images, boilerplate code",
        ],
    )?;

    out.info("Step 5: Output Location");
    let output = prompter.input("Output directory", Some(default_output), None)?;

    let info = SkillInfo {
        name,
        description,
        triggers,
        skill_type,
        tools,
        needs_scripts: resources.contains(&0),
        needs_references: resources.contains(&1),
        needs_assets: resources.contains(&2),
    };
    Ok((info, PathBuf::from(output)))
}

/// Full interactive session: ask, write, validate, print next steps
pub fn run(
    source: &mut dyn LineSource,
    out: &dyn Output,
    default_output: &str,
) -> Result<PathBuf> {
    out.header("Skill Creator - Interactive Mode");
    out.line("Let's create a skill together!");

    let (info, output_path) = {
        let mut prompter = Prompter::new(source, out);
        collect_info(&mut prompter, out, default_output)?
    };

    out.header("Generating your skill...");
    let skill_dir = create_skill_structure(&info, &output_path, out)?;

    out.info("Validating generated skill...");
    let report = validate(&skill_dir);
    if report.valid {
        out.success(&report.message);
    } else {
        out.error(&report.message);
    }

    out.header(&format!("Your skill is ready at: {}", skill_dir.display()));
    out.line("Next steps:");
    let mut steps = vec![format!(
        "Review and customize {}",
        skill_dir.join(MANIFEST_FILE).display()
    )];
    if info.needs_scripts {
        steps.push("Implement scripts/example_script.py".to_string());
    }
    if info.needs_references {
        steps.push("Add documentation to references/".to_string());
    }
    steps.push(format!("Run: skillkit validate {}", skill_dir.display()));
    steps.push(format!("Package: skillkit package {}", skill_dir.display()));
    for (i, step) in steps.iter().enumerate() {
        out.line(&format!("  {}. {}", i + 1, step));
    }

    Ok(skill_dir)
}
