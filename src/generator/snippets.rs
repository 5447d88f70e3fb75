//! Markdown sections the generator stitches into SKILL.md.

use super::{AgentTool, SkillType};

/// `web-scraper` -> `web_scraper`
fn snake(name: &str) -> String {
    name.replace('-', "_")
}

/// `web-scraper` -> `Web Scraper`. A letter is capitalised when it does not follow another letter.
pub fn title_case(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for c in name.replace('-', " ").chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            title.push(c);
            prev_alpha = false;
        }
    }
    title
}

pub fn type_section(skill_type: SkillType) -> &'static str {
    match skill_type {
        SkillType::Workflow => {
            r#"
## Workflow

This skill implements a multi-step workflow:

1. **[Step 1 Name]**: [Brief description]
2. **[Step 2 Name]**: [Brief description]
3. **[Step 3 Name]**: [Brief description]
4. **[Step 4 Name]**: [Brief description]

### Execution Flow

[Describe the overall flow, decision points, and error handling]
"#
        }
        SkillType::Tool => {
            r#"
## Tool Integration

This skill provides integration with [tool/format/API name].

### Key Operations

- **[Operation 1]**: [Description]
- **[Operation 2]**: [Description]
- **[Operation 3]**: [Description]

### Usage Patterns

[Describe common usage patterns and examples]
"#
        }
        SkillType::Knowledge => {
            r#"
## Domain Knowledge

This skill provides specialized knowledge for [domain/area].

### Key Concepts

[List and explain key domain concepts]

### Reference Materials

See the `references/` directory for detailed documentation:
- [reference-file-1.md](references/reference-file-1.md): [Description]
- [reference-file-2.md](references/reference-file-2.md): [Description]
"#
        }
        SkillType::Interactive => {
            r#"
## Interactive Workflow

This skill guides users through an interactive process.

### Workflow Steps

1. **Initialize**: Set up the environment and gather initial requirements
2. **Interactive Loop**:
   - Present options or request input
   - Process user responses
   - Provide feedback
3. **Complete**: Finalize and deliver results

### User Interaction Points

[Describe when and how to interact with users]
"#
        }
    }
}

/// Worked example for one agent tool
pub fn tool_example(tool: AgentTool, skill_name: &str) -> String {
    match tool {
        AgentTool::BrowserSubagent => format!(
            r#"
## Using browser_subagent

For web automation and data extraction:

```python
browser_subagent(
    TaskName="Extracting Data from Website",
    Task="""Navigate to [target URL],
    capture [specific data elements],
    return the results as [format - JSON/text/etc.]

    Return when: [completion condition]""",
    RecordingName="{}_extraction"
)
```

**Best Practices**:
- State a clear return condition in the task
- Use descriptive recording names for debugging
- Handle timeouts gracefully
- Say exactly which data to extract and in what format
"#,
            snake(skill_name)
        ),
        AgentTool::GenerateImage => format!(
            r#"
## Generating Visual Assets

For mockups, diagrams, or other visual assets:

```python
generate_image(
    Prompt="""[Detailed description]
    - Style: [modern, minimalist, professional, etc.]
    - Colors: [specific color scheme]
    - Layout: [structure and composition]
    - Elements: [key components to include]""",
    ImageName="{}_asset"
)
```

**Tips**:
- Be specific about style, colors, and layout
- Include context and purpose in the prompt
- Mention any text or labels to include
"#,
            snake(skill_name)
        ),
        AgentTool::NotifyUser => r#"
## User Interaction Points

For requesting approval or feedback:

```python
notify_user(
    PathsToReview=["/path/to/file.md", "/path/to/output"],
    BlockedOnUser=True,
    Message="[Clear explanation of what you need from the user]",
    ShouldAutoProceed=False
)
```

**When to Use**:
- Before destructive changes
- When user input decides the next step
- For reviewing generated content
"#
        .to_string(),
        AgentTool::TaskBoundary => format!(
            r#"
## Progress Tracking

For long-running operations:

```python
task_boundary(
    TaskName="Processing {}",
    Mode="EXECUTION",
    TaskSummary="Starting [operation description]",
    TaskStatus="Loading and validating input",
    PredictedTaskSize=5
)

task_boundary(
    TaskName="%SAME%",
    TaskSummary="Processed 50/100 items. [Current status]",
    TaskStatus="Processing remaining items"
)

task_boundary(
    TaskName="%SAME%",
    Mode="VERIFICATION",
    TaskSummary="Completed processing. [Summary of results]",
    TaskStatus="Finalizing outputs"
)
```

**Modes**:
- PLANNING for research and design
- EXECUTION for implementation
- VERIFICATION for testing
"#,
            title_case(skill_name)
        ),
        AgentTool::RunCommand => r#"
## Running Scripts and Commands

For deterministic operations:

```python
run_command(
    CommandLine="python3 scripts/process.py input.txt --output results.json",
    Cwd="/path/to/working/directory",
    SafeToAutoRun=False,
    WaitMsBeforeAsync=1000
)
```

**Safety**:
- Keep SafeToAutoRun=False for anything destructive
- Use absolute paths for Cwd
- Check command output for errors
"#
        .to_string(),
    }
}

pub const BEST_PRACTICES: &str = r#"
## Best Practices

- [Add skill-specific best practices]
- [Common pitfalls to avoid]
- [Optimization tips]

## Examples

### Example 1: [Use Case]

```
[Example usage with expected input/output]
```

### Example 2: [Use Case]

```
[Example usage with expected input/output]
```
"#;

pub fn example_script(skill_name: &str) -> String {
    format!(
        r#"#!/usr/bin/env python3
"""
Example script for {name}
"""


def main():
    """Main entry point"""
    print("{name}: not implemented yet")


if __name__ == "__main__":
    main()
"#,
        name = skill_name
    )
}

pub const EXAMPLE_REFERENCE: &str = r#"# Reference Documentation

Add detailed reference documentation, schemas, or domain knowledge here.

## Section 1

[Content]

## Section 2

[Content]
"#;

pub const ASSETS_README: &str = r#"# Assets Directory

Place templates, images, boilerplate code, and other output resources here.

Examples:
- Templates (HTML, React, etc.)
- Images and icons
- Sample documents
- Font files
"#;
