//! Skill bundle validation.
//!
//! Checks run in a fixed order and stop at the first failure, except the
//! reference check which collects every missing file before failing.

use super::error::ValidationError;
use super::parser::{normalize_newlines, split_frontmatter, Metadata};
use super::refs::extract_references;
use super::MANIFEST_FILE;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keys every frontmatter must carry, in reporting order
pub const REQUIRED_FIELDS: [&str; 2] = ["name", "description"];

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("name pattern is valid"));

/// A bundle that passed every check
#[derive(Debug, Clone)]
pub struct ValidSkill {
    pub name: String,
    pub description: String,
    pub root: PathBuf,
    pub metadata: Metadata,
    /// Body references, all of which exist
    pub references: Vec<String>,
}

/// Boolean verdict plus the message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub message: String,
}

impl ValidationReport {
    pub fn into_parts(self) -> (bool, String) {
        (self.valid, self.message)
    }
}

impl From<Result<ValidSkill, ValidationError>> for ValidationReport {
    fn from(result: Result<ValidSkill, ValidationError>) -> Self {
        match result {
            Ok(skill) => Self {
                valid: true,
                message: format!("Skill '{}' is valid!", skill.name),
            },
            Err(e) => Self {
                valid: false,
                message: e.to_string(),
            },
        }
    }
}

/// Validate the bundle at `skill_path`. Never fails; problems become the report.
pub fn validate(skill_path: &Path) -> ValidationReport {
    let report = ValidationReport::from(check(skill_path));
    debug!(path = %skill_path.display(), valid = report.valid, "validated skill");
    report
}

/// Validator name rule: one or more of `[a-z0-9-]`.
///
/// Looser than the scaffolder's rule in [`crate::scaffold::validate_skill_name`].
pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

/// Run every check against the bundle and return the parsed skill on success
pub fn check(skill_path: &Path) -> Result<ValidSkill, ValidationError> {
    let root = resolve(skill_path);

    let manifest = root.join(MANIFEST_FILE);
    if !manifest.is_file() {
        return Err(ValidationError::MissingManifest { path: manifest });
    }

    let raw =
        std::fs::read_to_string(&manifest).map_err(|e| ValidationError::ManifestUnreadable {
            path: manifest.clone(),
            reason: e.to_string(),
        })?;
    let content = normalize_newlines(&raw);

    let frontmatter =
        split_frontmatter(&content).ok_or(ValidationError::MalformedMetadataBlock)?;
    let metadata = Metadata::parse(frontmatter.yaml)?;

    for field in REQUIRED_FIELDS {
        if !metadata.contains_key(field) {
            return Err(ValidationError::MissingField(field));
        }
    }

    let name = metadata
        .get("name")
        .map(|v| v.to_string())
        .unwrap_or_default();
    if !is_valid_name(&name) {
        return Err(ValidationError::InvalidNameFormat(name));
    }
    let description = metadata
        .get("description")
        .map(|v| v.to_string())
        .unwrap_or_default();

    let references = extract_references(frontmatter.body);
    let missing: Vec<String> = references
        .iter()
        .filter(|r| !root.join(r.as_str()).exists())
        .cloned()
        .collect();
    if !missing.is_empty() {
        debug!(count = missing.len(), "dangling references");
        return Err(ValidationError::DanglingReference(missing));
    }

    Ok(ValidSkill {
        name,
        description,
        root,
        metadata,
        references: references.into_iter().collect(),
    })
}

/// Absolute form of `path`, canonical when it exists
pub(crate) fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_skill(dir: &Path, content: &str) {
        fs::write(dir.join(MANIFEST_FILE), content).unwrap();
    }

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn manifest(name: &str, body: &str) -> String {
        format!("---\nname: {}\ndescription: does things\n---\n{}", name, body)
    }

    #[test]
    fn test_valid_skill_with_reference() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), &manifest("my-skill", "See scripts/run.py for details.\n"));
        touch(tmp.path(), "scripts/run.py");

        let report = validate(tmp.path());
        assert_eq!(
            report.into_parts(),
            (true, "Skill 'my-skill' is valid!".to_string())
        );
    }

    #[test]
    fn test_missing_referenced_file() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), &manifest("my-skill", "See scripts/run.py for details.\n"));

        let report = validate(tmp.path());
        assert_eq!(
            report.into_parts(),
            (false, "Referenced file not found: scripts/run.py".to_string())
        );
    }

    #[test]
    fn test_dangling_references_accumulate_sorted() {
        let tmp = TempDir::new().unwrap();
        write_skill(
            tmp.path(),
            &manifest(
                "my-skill",
                "Use scripts/a.py with references/b.md and assets/c.png\n",
            ),
        );
        touch(tmp.path(), "references/b.md");

        let err = check(tmp.path()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DanglingReference(vec![
                "assets/c.png".to_string(),
                "scripts/a.py".to_string(),
            ])
        );
        assert!(!err.to_string().contains("references/b.md"));
    }

    #[test]
    fn test_missing_manifest_wins_over_everything() {
        let tmp = TempDir::new().unwrap();
        let err = check(tmp.path()).unwrap_err();
        let expected = fs::canonicalize(tmp.path()).unwrap().join(MANIFEST_FILE);
        assert_eq!(err, ValidationError::MissingManifest { path: expected.clone() });
        assert_eq!(
            validate(tmp.path()).message,
            format!("Missing {}", expected.display())
        );
    }

    #[test]
    fn test_missing_bundle_directory() {
        let tmp = TempDir::new().unwrap();
        let report = validate(&tmp.path().join("nope"));
        assert!(!report.valid);
        assert!(report.message.starts_with("Missing "));
        assert!(report.message.ends_with("nope/SKILL.md"));
    }

    #[test]
    fn test_manifest_directory_is_not_a_manifest() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(MANIFEST_FILE)).unwrap();
        assert!(matches!(
            check(tmp.path()),
            Err(ValidationError::MissingManifest { .. })
        ));
    }

    #[test]
    fn test_non_utf8_manifest_is_reported() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), [0xff, 0xfe, 0x00]).unwrap();
        let err = check(tmp.path()).unwrap_err();
        assert_eq!(err.kind(), "manifest_unreadable");
    }

    #[test]
    fn test_malformed_block() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), "# No frontmatter\n\nname: my-skill\n");
        let report = validate(tmp.path());
        assert_eq!(
            report.into_parts(),
            (
                false,
                "Invalid or missing YAML frontmatter in SKILL.md".to_string()
            )
        );
    }

    #[test]
    fn test_yaml_syntax_error() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), "---\nname: [broken\ndescription: x\n---\n");
        let report = validate(tmp.path());
        assert!(!report.valid);
        assert!(report.message.starts_with("YAML Syntax Error: "));
    }

    #[test]
    fn test_frontmatter_not_a_mapping() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), "---\n- name\n- description\n---\n");
        assert_eq!(
            validate(tmp.path()).message,
            "Frontmatter must be a YAML dictionary"
        );
    }

    #[test]
    fn test_missing_fields_in_order() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), "---\nother: value\n---\n");
        assert_eq!(
            validate(tmp.path()).message,
            "Missing required field 'name' in frontmatter"
        );

        write_skill(tmp.path(), "---\nname: my-skill\n---\n");
        assert_eq!(
            check(tmp.path()).unwrap_err(),
            ValidationError::MissingField("description")
        );
    }

    #[test]
    fn test_name_format_boundaries() {
        let tmp = TempDir::new().unwrap();
        for good in ["my-skill", "skill2", "a-b-c"] {
            write_skill(tmp.path(), &manifest(good, ""));
            let report = validate(tmp.path());
            assert!(report.valid, "{} should pass: {}", good, report.message);
        }

        for bad in ["My-Skill", "skill_name", "''"] {
            write_skill(tmp.path(), &manifest(bad, ""));
            let err = check(tmp.path()).unwrap_err();
            assert_eq!(err.kind(), "invalid_name_format", "{} should fail", bad);
        }

        write_skill(tmp.path(), &manifest("My-Skill", ""));
        assert_eq!(
            validate(tmp.path()).message,
            "Skill name 'My-Skill' must be kebab-case (lowercase, digits, hyphens)"
        );
    }

    #[test]
    fn test_empty_name_present_vs_absent() {
        let tmp = TempDir::new().unwrap();

        write_skill(tmp.path(), "---\nname:\ndescription: d\n---\n");
        assert_eq!(
            check(tmp.path()).unwrap_err(),
            ValidationError::InvalidNameFormat("None".to_string())
        );

        write_skill(tmp.path(), "---\ndescription: d\n---\n");
        assert_eq!(
            check(tmp.path()).unwrap_err(),
            ValidationError::MissingField("name")
        );
    }

    #[test]
    fn test_numeric_name_is_coerced() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), "---\nname: 42\ndescription: d\n---\n");
        assert_eq!(validate(tmp.path()).message, "Skill '42' is valid!");
    }

    #[test]
    fn test_boolean_name_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), "---\nname: true\ndescription: d\n---\n");
        assert_eq!(
            validate(tmp.path()).into_parts(),
            (
                false,
                "Skill name 'True' must be kebab-case (lowercase, digits, hyphens)".to_string()
            )
        );
    }

    #[test]
    fn test_crlf_manifest() {
        let tmp = TempDir::new().unwrap();
        write_skill(
            tmp.path(),
            "---\r\nname: my-skill\r\ndescription: does things\r\n---\r\nRun scripts/run.py\r\n",
        );
        touch(tmp.path(), "scripts/run.py");

        let skill = check(tmp.path()).unwrap();
        assert_eq!(skill.name, "my-skill");
        assert_eq!(skill.description, "does things");
        assert_eq!(skill.references, vec!["scripts/run.py"]);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let tmp = TempDir::new().unwrap();
        write_skill(
            tmp.path(),
            "---\nname: Bad_Name\ndescription: d\nname: my-skill\n---\n",
        );
        assert_eq!(validate(tmp.path()).message, "Skill 'my-skill' is valid!");
    }

    #[test]
    fn test_extra_keys_accepted() {
        let tmp = TempDir::new().unwrap();
        write_skill(
            tmp.path(),
            "---\nname: my-skill\ndescription: d\nlicense: MIT\ntags: [a, b]\nowner:\n  team: x\n---\nbody\n",
        );
        let skill = check(tmp.path()).unwrap();
        assert_eq!(skill.metadata.len(), 5);
        assert_eq!(skill.description, "d");
    }

    #[test]
    fn test_name_need_not_match_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("some-dir");
        fs::create_dir(&dir).unwrap();
        write_skill(&dir, &manifest("other-name", ""));
        assert_eq!(validate(&dir).message, "Skill 'other-name' is valid!");
    }

    #[test]
    fn test_references_in_frontmatter_are_ignored() {
        let tmp = TempDir::new().unwrap();
        write_skill(
            tmp.path(),
            "---\nname: my-skill\ndescription: uses scripts/missing.py\n---\nNo refs here.\n",
        );
        assert!(validate(tmp.path()).valid);
    }

    #[test]
    fn test_relative_path_resolves() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), &manifest("my-skill", ""));
        let skill = check(tmp.path()).unwrap();
        assert!(skill.root.is_absolute());
    }

    #[test]
    fn test_idempotent() {
        let tmp = TempDir::new().unwrap();
        write_skill(tmp.path(), &manifest("my-skill", "scripts/x.sh assets/y\n"));
        let first = validate(tmp.path());
        let second = validate(tmp.path());
        assert_eq!(first, second);
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("-leading-and-trailing-"));
        assert!(is_valid_name("0"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("with space"));
    }
}
