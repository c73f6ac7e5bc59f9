//! Record types shared by the loader, the filter engine and the tools.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Description used when a document yields no prose at all.
pub const NO_DESCRIPTION: &str = "No description available";

/// Author used when a document does not name one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Kind of customization document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CustomizationKind {
    #[serde(rename = "rules")]
    Rule,
    #[serde(rename = "workflows")]
    Workflow,
}

impl CustomizationKind {
    /// Directory name, which doubles as the `type` value of a record.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rule => "rules",
            Self::Workflow => "workflows",
        }
    }
}

impl fmt::Display for CustomizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomizationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rule" | "rules" => Ok(Self::Rule),
            "workflow" | "workflows" => Ok(Self::Workflow),
            other => Err(format!(
                "unknown customization type '{}' (expected rules or workflows)",
                other
            )),
        }
    }
}

/// When a rule or workflow is meant to be applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    AlwaysOn,
    ModelDecision,
    Glob,
    #[default]
    Manual,
}

impl Activation {
    /// Parse an authored activation value. Unknown spellings yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "always" | "always_on" => Some(Self::AlwaysOn),
            "model" | "model_decision" | "model_decided" => Some(Self::ModelDecision),
            "glob" | "pattern" | "pattern_based" => Some(Self::Glob),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlwaysOn => "always_on",
            Self::ModelDecision => "model_decision",
            Self::Glob => "glob",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule or workflow document and its derived display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: CustomizationKind,
    pub category: String,
    pub labels: Vec<String>,
    pub author: String,
    pub activation: Activation,
    pub filename: String,
    pub path: String,
    #[serde(alias = "windsurfPath")]
    pub source_path: String,
    pub modified: String,
}

impl Customization {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Case-folded text the free-text search runs against.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3 + self.labels.len());
        parts.push(&self.title);
        parts.push(&self.description);
        parts.push(&self.category);
        parts.extend(self.labels.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

/// Map a raw category or subdirectory key onto its display name.
///
/// Known keys go through a fixed table; anything else is title-cased word by
/// word, splitting on `-`.
pub fn format_category(key: &str) -> String {
    let normalized = key.trim().to_lowercase();
    let mapped = match normalized.as_str() {
        "language" | "languages" => Some("Languages"),
        "framework" | "frameworks & libraries" => Some("Frameworks & Libraries"),
        "security" => Some("Security"),
        "style" => Some("Style"),
        "maintenance" => Some("Maintenance"),
        "setup" => Some("Setup"),
        _ => None,
    };
    if let Some(mapped) = mapped {
        return mapped.to_string();
    }

    normalized
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, trim, drop empties and duplicates while keeping first-seen order.
pub fn normalize_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        let label = label.as_ref().trim().to_lowercase();
        if !label.is_empty() && !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("language", "Languages")]
    #[case("Languages", "Languages")]
    #[case("framework", "Frameworks & Libraries")]
    #[case("Frameworks & Libraries", "Frameworks & Libraries")]
    #[case("security", "Security")]
    #[case("style", "Style")]
    #[case("maintenance", "Maintenance")]
    #[case("setup", "Setup")]
    #[case("code-quality", "Code Quality")]
    #[case("DEVOPS", "Devops")]
    fn test_format_category(#[case] key: &str, #[case] expected: &str) {
        check!(format_category(key) == expected);
    }

    #[rstest]
    #[case("always_on", Some(Activation::AlwaysOn))]
    #[case("Always", Some(Activation::AlwaysOn))]
    #[case("model-decided", Some(Activation::ModelDecision))]
    #[case("model_decision", Some(Activation::ModelDecision))]
    #[case("glob", Some(Activation::Glob))]
    #[case("pattern-based", Some(Activation::Glob))]
    #[case("manual", Some(Activation::Manual))]
    #[case("sometimes", None)]
    fn test_activation_parse(#[case] input: &str, #[case] expected: Option<Activation>) {
        check!(Activation::parse(input) == expected);
    }

    #[test]
    fn test_normalize_labels_dedups_in_order() {
        let labels = normalize_labels(["TypeScript", " react ", "", "typescript", "Testing"]);
        check!(labels == vec!["typescript", "react", "testing"]);
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        check!("rules".parse::<CustomizationKind>() == Ok(CustomizationKind::Rule));
        check!("Workflow".parse::<CustomizationKind>() == Ok(CustomizationKind::Workflow));
        check!("skills".parse::<CustomizationKind>().is_err());
        check!(CustomizationKind::Workflow.to_string() == "workflows");
    }

    #[test]
    fn test_serialized_field_names() {
        let record = Customization {
            id: "rules-style-x".to_string(),
            title: "X".to_string(),
            description: NO_DESCRIPTION.to_string(),
            kind: CustomizationKind::Rule,
            category: "Style".to_string(),
            labels: vec![],
            author: UNKNOWN_AUTHOR.to_string(),
            activation: Activation::Manual,
            filename: "x.md".to_string(),
            path: "../docs/rules/style/x.md".to_string(),
            source_path: "../.windsurf/rules/style/x.md".to_string(),
            modified: "Today".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        check!(json["type"] == "rules");
        check!(json["sourcePath"] == "../.windsurf/rules/style/x.md");
        check!(json["activation"] == "manual");
    }
}
