//! Keyword-based label inference.
//!
//! Used only when a document carries no explicit labels. A label is attached as
//! soon as any one of its trigger substrings appears anywhere in the text, so a
//! single mention among several near-synonyms is enough.

/// Label → trigger substrings. Triggers are lowercase; matching is
/// case-insensitive. Tuning this table is a content change.
pub const LABEL_PATTERNS: &[(&str, &[&str])] = &[
    // Core languages
    ("javascript", &["javascript", "js", ".js", ".jsx"]),
    ("typescript", &["typescript", "ts", ".ts", ".tsx"]),
    ("python", &["python", ".py", "django", "flask"]),
    ("java", &["java", ".java", "jvm"]),
    // Popular frameworks
    ("react", &["react", "jsx", "hooks"]),
    ("vue", &["vue", "vuejs"]),
    ("angular", &["angular", "ng-"]),
    ("nodejs", &["node", "npm", "nodejs"]),
    // Key practices
    ("security", &["security", "secure", "authentication"]),
    ("testing", &["testing", "unit test", "integration test"]),
    ("debugging", &["debugging", "troubleshooting"]),
    ("workflow", &["workflow", "setup", "installation"]),
];

/// Infer topical labels from free text.
///
/// Pure and total: the empty string yields no labels, and no input can fail.
/// Output follows table order and never repeats a label.
pub fn infer_labels(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let haystack = text.to_lowercase();
    LABEL_PATTERNS
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| haystack.contains(t)))
        .map(|(label, _)| (*label).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;
    use std::collections::HashSet;

    #[test]
    fn test_empty_text_has_no_labels() {
        check!(infer_labels("").is_empty());
    }

    #[rstest]
    #[case("Handle Authentication carefully", "security")]
    #[case("Write a UNIT TEST for every bug", "testing")]
    #[case("Troubleshooting guide", "debugging")]
    #[case("Run npm install", "nodejs")]
    #[case("Use Django models", "python")]
    #[case("Prefer function components with hooks", "react")]
    fn test_single_trigger_is_enough(#[case] text: &str, #[case] label: &str) {
        check!(infer_labels(text).contains(&label.to_string()));
    }

    #[test]
    fn test_no_match_yields_empty() {
        check!(infer_labels("Keep changes small.").is_empty());
    }

    #[test]
    fn test_security_and_authentication_infers_security_once() {
        let labels = infer_labels("security matters; authentication must be secure");
        check!(labels.iter().filter(|l| *l == "security").count() == 1);
    }

    #[test]
    fn test_idempotent_and_unique() {
        let text = "A TypeScript + React setup with Jest testing and npm scripts";
        let first = infer_labels(text);
        let second = infer_labels(text);
        check!(first == second);

        let unique: HashSet<_> = first.iter().collect();
        check!(unique.len() == first.len());
    }

    #[rstest]
    #[case("Москва")]
    #[case("日本")]
    #[case("🦀")]
    #[case("\n\t ")]
    fn test_unicode_and_whitespace_do_not_panic(#[case] input: &str) {
        let _labels = infer_labels(input);
    }

    #[test]
    fn test_table_triggers_are_lowercase() {
        for (label, triggers) in LABEL_PATTERNS {
            check!(*label == label.to_lowercase());
            for trigger in *triggers {
                check!(*trigger == trigger.to_lowercase());
            }
        }
    }
}
