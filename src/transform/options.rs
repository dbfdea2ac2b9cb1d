//! Knobs for the rewrite rules
//!
//! Defaults reproduce the canonical Nunjucks → Twig behavior. The
//! `kusari-config` crate layers user settings on top of them.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Filters whose Twig name differs, e.g. `safe` → `raw`
    pub filter_renames: BTreeMap<String, String>,
    /// Relative-path marker stripped from include targets
    pub include_prefix: String,
    /// Rewrite `{{ x if x }}` to `{{ x }}`
    pub collapse_self_conditional: bool,
}

impl TransformOptions {
    pub fn filter_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.filter_renames
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    /// Include target with the relative marker removed
    pub fn include_path<'a>(&self, path: &'a str) -> &'a str {
        if self.include_prefix.is_empty() {
            return path;
        }
        path.strip_prefix(self.include_prefix.as_str())
            .unwrap_or(path)
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        let mut filter_renames = BTreeMap::new();
        filter_renames.insert("safe".to_string(), "raw".to_string());
        TransformOptions {
            filter_renames,
            include_prefix: "./".to_string(),
            collapse_self_conditional: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_renames() {
        let options = TransformOptions::default();
        assert_eq!(options.filter_name("safe"), "raw");
        assert_eq!(options.filter_name("join"), "join");
    }

    #[test]
    fn test_include_path() {
        let options = TransformOptions::default();
        assert_eq!(options.include_path("./foo.html"), "foo.html");
        assert_eq!(options.include_path("partials/foo.html"), "partials/foo.html");
        // only the leading marker goes
        assert_eq!(options.include_path("a/./b.html"), "a/./b.html");
    }

    #[test]
    fn test_empty_prefix_keeps_path() {
        let options = TransformOptions {
            include_prefix: String::new(),
            ..TransformOptions::default()
        };
        assert_eq!(options.include_path("./foo.html"), "./foo.html");
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let options: TransformOptions =
            serde_json::from_str(r#"{"collapse_self_conditional": true}"#).unwrap();
        assert!(options.collapse_self_conditional);
        assert_eq!(options.include_prefix, "./");
        assert_eq!(options.filter_name("safe"), "raw");
    }
}
