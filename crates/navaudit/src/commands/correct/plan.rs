//! Correction plan files.
//!
//! ```toml
//! [[correction]]
//! path = "01 Unit_UI_Testing/CheatSheet.md"
//! [correction.set]
//! parent = "Unit & UI Testing"
//! ```
//!
//! The same shape is accepted as YAML when the file ends in `.yaml` or `.yml`.

use crate::runtime::error::{NavauditError, NavauditResult};
use crate::runtime::fs::read_text_file;
use nav_hierarchy::Correction;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::path::{Component, Path};

/// Serialization format of a plan file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlanFormat {
    /// TOML (default).
    Toml,
    /// YAML.
    Yaml,
}

impl PlanFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Toml,
        }
    }
}

/// Deserialized plan file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CorrectionPlan {
    /// Entries in application order.
    #[serde(default, rename = "correction", alias = "corrections")]
    pub entries: Vec<PlanEntry>,
}

/// One plan entry.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PlanEntry {
    /// Target path relative to the corpus root.
    pub path: String,
    /// Header key to new value.
    #[serde(default)]
    pub set: BTreeMap<String, PlanValue>,
}

/// Scalar value in a plan. Written back as its literal text.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PlanValue {
    /// Integer, e.g. a `nav_order`.
    Integer(i64),
    /// Fractional number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Anything else.
    Text(String),
}

impl Display for PlanValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PlanValue::Integer(value) => write!(f, "{value}"),
            PlanValue::Float(value) => write!(f, "{value}"),
            PlanValue::Bool(value) => write!(f, "{value}"),
            PlanValue::Text(value) => f.write_str(value),
        }
    }
}

/// Read and validate a plan file.
pub fn load_plan(path: &Path) -> NavauditResult<Vec<Correction>> {
    let body = read_text_file(path)?;
    parse_plan(&body, PlanFormat::from_path(path))
        .map_err(|err| err.with_path(path).with_operation("load corrections plan"))
}

/// Parse and validate plan text.
pub fn parse_plan(body: &str, format: PlanFormat) -> NavauditResult<Vec<Correction>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let plan: CorrectionPlan = match format {
        PlanFormat::Toml => toml::from_str(body)
            .map_err(|err| NavauditError::config(format!("invalid TOML plan: {err}")))?,
        PlanFormat::Yaml => serde_yaml::from_str(body)
            .map_err(|err| NavauditError::config(format!("invalid YAML plan: {err}")))?,
    };
    plan.entries.into_iter().map(into_correction).collect()
}

fn into_correction(entry: PlanEntry) -> NavauditResult<Correction> {
    let path = normalize_plan_path(&entry.path)?;
    let mut correction = Correction::new(path);
    for (key, value) in entry.set {
        let key = key.trim().to_string();
        if key.is_empty() || key.contains(':') || key.contains(char::is_whitespace) {
            return Err(NavauditError::config(format!(
                "invalid header key `{key}` for `{}`",
                correction.path
            )));
        }
        let value = value.to_string();
        if value.contains(['\n', '\r']) {
            return Err(NavauditError::config(format!(
                "value for `{key}` in `{}` spans multiple lines",
                correction.path
            )));
        }
        correction = correction.set(key, value);
    }
    Ok(correction)
}

/// Root-relative `/`-separated path. Absolute paths and `..` are rejected.
fn normalize_plan_path(raw: &str) -> NavauditResult<String> {
    let unified = raw.trim().replace('\\', "/");
    let path = Path::new(&unified);
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(NavauditError::validation(format!(
                    "plan path `{raw}` must stay inside the corpus root"
                ))
                .with_hint("use a path relative to --root without `..`"));
            }
        }
    }
    if parts.is_empty() {
        return Err(NavauditError::validation("plan entry has an empty path"));
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::ErrorCategory;
    use pretty_assertions::assert_eq;

    #[test]
    fn toml_plan_becomes_corrections_in_order() {
        let corrections = parse_plan(
            r#"
[[correction]]
path = '01 Unit_UI_Testing\CheatSheet.md'
[correction.set]
parent = "Unit & UI Testing"

[[correction]]
path = "./15 TheQuestionBank/index.md"
set = { nav_order = 15, title = "Question Bank" }
"#,
            PlanFormat::Toml,
        )
        .expect("parse");

        assert_eq!(
            corrections,
            vec![
                Correction::new("01 Unit_UI_Testing/CheatSheet.md")
                    .set("parent", "Unit & UI Testing"),
                Correction::new("15 TheQuestionBank/index.md")
                    .set("nav_order", "15")
                    .set("title", "Question Bank"),
            ]
        );
    }

    #[test]
    fn yaml_plan_uses_the_same_shape() {
        let corrections = parse_plan(
            "correction:\n  - path: 15 TheQuestionBank/03_Coroutines.md\n    set:\n      title: Coroutines Q&A\n      nav_order: 2.5\n",
            PlanFormat::Yaml,
        )
        .expect("parse");

        assert_eq!(
            corrections,
            vec![Correction::new("15 TheQuestionBank/03_Coroutines.md")
                .set("nav_order", "2.5")
                .set("title", "Coroutines Q&A")]
        );
    }

    #[test]
    fn empty_plans_are_empty() {
        assert!(parse_plan("", PlanFormat::Toml).expect("toml").is_empty());
        assert!(parse_plan("", PlanFormat::Yaml).expect("yaml").is_empty());
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(PlanFormat::from_path(Path::new("fix.YML")), PlanFormat::Yaml);
        assert_eq!(PlanFormat::from_path(Path::new("fix.yaml")), PlanFormat::Yaml);
        assert_eq!(PlanFormat::from_path(Path::new("fix.toml")), PlanFormat::Toml);
        assert_eq!(PlanFormat::from_path(Path::new("fix")), PlanFormat::Toml);
    }

    #[test]
    fn escaping_paths_are_rejected() {
        for raw in ["../outside.md", "/etc/passwd.md", "docs/../../x.md", "  "] {
            let err = normalize_plan_path(raw).expect_err(raw);
            assert_eq!(err.category, ErrorCategory::Validation);
        }
    }

    #[test]
    fn multiline_values_and_bad_keys_are_rejected() {
        let err = parse_plan(
            "[[correction]]\npath = \"a.md\"\nset = { title = \"a\\nb\" }\n",
            PlanFormat::Toml,
        )
        .expect_err("multiline");
        assert_eq!(err.category, ErrorCategory::Config);

        let err = parse_plan(
            "[[correction]]\npath = \"a.md\"\nset = { \"nav order\" = 1 }\n",
            PlanFormat::Toml,
        )
        .expect_err("bad key");
        assert_eq!(err.category, ErrorCategory::Config);
    }

    #[test]
    fn unknown_entry_fields_are_rejected() {
        let err = parse_plan(
            "[[correction]]\npath = \"a.md\"\nupdate = { title = \"x\" }\n",
            PlanFormat::Toml,
        )
        .expect_err("typo");
        assert!(err.to_string().contains("update"));
    }
}
