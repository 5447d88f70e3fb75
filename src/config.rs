use crate::scaffold::Template;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding project and user config files
pub const CONFIG_DIR: &str = ".skillkit";

/// Settings for `init` and `create`
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InitConfig {
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub template: Option<Template>,
}

/// Settings for `package`
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PackageConfig {
    #[serde(default)]
    pub dist_dir: Option<PathBuf>,
}

/// Settings for the script syntax check
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TestConfig {
    #[serde(default)]
    pub interpreter: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("./dist")
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub init: InitConfig,
    #[serde(default)]
    pub package: PackageConfig,
    #[serde(default)]
    pub test: TestConfig,
}

impl Config {
    /// Load configuration from default paths
    /// Priority: local (.skillkit/config.local.toml) > project (.skillkit/config.toml) > user (~/.skillkit/config.toml)
    pub fn load() -> Result<Self> {
        let user_dir = dirs::home_dir().map(|h| h.join(CONFIG_DIR));
        Self::load_layered(user_dir.as_deref(), Path::new(CONFIG_DIR))
    }

    /// Merge the user layer, then the project and local layers under `project_dir`
    pub fn load_layered(user_dir: Option<&Path>, project_dir: &Path) -> Result<Self> {
        let mut config = Config::default();

        let mut layers = Vec::new();
        if let Some(dir) = user_dir {
            layers.push(dir.join("config.toml"));
        }
        layers.push(project_dir.join("config.toml"));
        layers.push(project_dir.join("config.local.toml"));

        for path in layers {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config layer");
                config.merge(Self::load_from(&path)?);
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Merge another config into this one (other takes priority for every value it sets)
    pub fn merge(&mut self, other: Config) {
        if other.init.output_dir.is_some() {
            self.init.output_dir = other.init.output_dir;
        }
        if other.init.template.is_some() {
            self.init.template = other.init.template;
        }
        if other.package.dist_dir.is_some() {
            self.package.dist_dir = other.package.dist_dir;
        }
        if other.test.interpreter.is_some() {
            self.test.interpreter = other.test.interpreter;
        }
        if other.test.timeout_ms.is_some() {
            self.test.timeout_ms = other.test.timeout_ms;
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.init.output_dir.clone().unwrap_or_else(default_output_dir)
    }

    pub fn template(&self) -> Template {
        self.init.template.unwrap_or_default()
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.package.dist_dir.clone().unwrap_or_else(default_dist_dir)
    }

    pub fn interpreter(&self) -> String {
        self.test.interpreter.clone().unwrap_or_else(default_interpreter)
    }

    pub fn timeout_ms(&self) -> u64 {
        self.test.timeout_ms.unwrap_or_else(default_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output_dir(), PathBuf::from("./output"));
        assert_eq!(config.dist_dir(), PathBuf::from("./dist"));
        assert_eq!(config.interpreter(), "python3");
        assert_eq!(config.timeout_ms(), 30_000);
        assert_eq!(config.template(), Template::Workflow);
    }

    #[test]
    fn test_parse_sections() {
        let config: Config = toml::from_str(
            r#"
[init]
output_dir = "skills"
template = "knowledge"

[package]
dist_dir = "build/dist"

[test]
interpreter = "python3.12"
timeout_ms = 5000
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir(), PathBuf::from("skills"));
        assert_eq!(config.template(), Template::Knowledge);
        assert_eq!(config.dist_dir(), PathBuf::from("build/dist"));
        assert_eq!(config.interpreter(), "python3.12");
        assert_eq!(config.timeout_ms(), 5000);
    }

    #[test]
    fn test_layer_priority() {
        let tmp = TempDir::new().unwrap();
        let user = tmp.path().join("home");
        let project = tmp.path().join("project");
        fs::create_dir_all(&user).unwrap();
        fs::create_dir_all(&project).unwrap();

        fs::write(
            user.join("config.toml"),
            "[package]\ndist_dir = \"user-dist\"\n[test]\ninterpreter = \"py-user\"\n",
        )
        .unwrap();
        fs::write(
            project.join("config.toml"),
            "[package]\ndist_dir = \"project-dist\"\n",
        )
        .unwrap();
        fs::write(project.join("config.local.toml"), "[test]\ntimeout_ms = 10\n").unwrap();

        let config = Config::load_layered(Some(&user), &project).unwrap();
        assert_eq!(config.dist_dir(), PathBuf::from("project-dist"));
        assert_eq!(config.interpreter(), "py-user");
        assert_eq!(config.timeout_ms(), 10);
    }

    #[test]
    fn test_invalid_config_names_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[init\n").unwrap();
        let err = Config::load_layered(None, tmp.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }
}
