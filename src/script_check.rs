//! Dry-run syntax check for a skill's Python scripts.

use crate::output::Output;
use crate::skillpacks::validate::resolve;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// How scripts are compiled
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub interpreter: String,
    pub timeout: Duration,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            timeout: Duration::from_millis(30_000),
        }
    }
}

/// Outcome for one script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStatus {
    Ok,
    Failed(String),
    TimedOut,
}

/// `scripts/*.py`, sorted, not recursive
fn python_scripts(scripts_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut scripts: Vec<PathBuf> = std::fs::read_dir(scripts_dir)
        .with_context(|| format!("Failed to list {}", scripts_dir.display()))?
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "py"))
        .collect();
    scripts.sort();
    Ok(scripts)
}

/// Compile one script without running it
pub fn compile_script(script: &Path, settings: &CheckSettings) -> Result<ScriptStatus> {
    let mut child = Command::new(&settings.interpreter)
        .arg("-m")
        .arg("py_compile")
        .arg(script)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to run interpreter '{}'", settings.interpreter))?;

    // Read while waiting; the child blocks once the pipe buffer is full.
    let stderr_reader = child.stderr.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = String::new();
            let _ = pipe.read_to_string(&mut buf);
            buf
        })
    });

    let Some(status) = child.wait_timeout(settings.timeout)? else {
        let _ = child.kill();
        let _ = child.wait();
        return Ok(ScriptStatus::TimedOut);
    };

    let stderr = stderr_reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();
    if status.success() {
        return Ok(ScriptStatus::Ok);
    }
    Ok(ScriptStatus::Failed(stderr))
}

/// Check every script of the skill. True when all of them compile.
pub fn check_scripts(
    skill_path: &Path,
    settings: &CheckSettings,
    out: &dyn Output,
) -> Result<bool> {
    let scripts_dir = resolve(skill_path).join("scripts");
    if !scripts_dir.is_dir() {
        out.line("No scripts to test.");
        return Ok(true);
    }

    out.line(&format!("Testing scripts in {}...", scripts_dir.display()));

    let mut all_passed = true;
    for script in python_scripts(&scripts_dir)? {
        let file_name = script
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::debug!(script = %file_name, interpreter = %settings.interpreter, "compiling");

        match compile_script(&script, settings)? {
            ScriptStatus::Ok => out.line(&format!("Checking syntax for {}... OK", file_name)),
            ScriptStatus::Failed(stderr) => {
                out.error(&format!(
                    "Checking syntax for {}... FAILED\n{}",
                    file_name,
                    stderr.trim_end()
                ));
                all_passed = false;
            }
            ScriptStatus::TimedOut => {
                out.error(&format!(
                    "Checking syntax for {}... FAILED (timed out after {} ms)",
                    file_name,
                    settings.timeout.as_millis()
                ));
                all_passed = false;
            }
        }
    }

    Ok(all_passed)
}
