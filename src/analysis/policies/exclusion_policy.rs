/// Field names dropped wherever they occur (large or binary-ish payloads)
pub const DEFAULT_IGNORED_FIELDS: &[&str] = &["favicon", "html", "data_preview", "raw_html"];

/// A rule over the fully-qualified dotted path of an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRule {
    Exact(String),
    /// Path ends with `suffix` and contains `within` somewhere
    SuffixWithin { suffix: String, within: String },
    Prefix(String),
}

impl PathRule {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathRule::Exact(exact) => path == exact,
            PathRule::SuffixWithin { suffix, within } => {
                path.ends_with(suffix.as_str()) && path.contains(within.as_str())
            }
            PathRule::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

/// Decides which attributes never become table columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    ignored_fields: Vec<String>,
    path_rules: Vec<PathRule>,
}

impl ExclusionPolicy {
    pub fn new(ignored_fields: Vec<String>, path_rules: Vec<PathRule>) -> Self {
        Self {
            ignored_fields,
            path_rules,
        }
    }

    pub fn default_path_rules() -> Vec<PathRule> {
        vec![
            PathRule::Exact("banners".to_string()),
            PathRule::SuffixWithin {
                suffix: ".data".to_string(),
                within: "banners".to_string(),
            },
            PathRule::Prefix("ssl.cert.extensions".to_string()),
        ]
    }

    /// Replaces the ignore list, keeping the path rules
    pub fn with_ignored_fields(mut self, ignored_fields: Vec<String>) -> Self {
        self.ignored_fields = ignored_fields;
        self
    }

    /// Adds extra prefix exclusions after the built-in rules
    pub fn with_extra_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.path_rules
            .extend(prefixes.into_iter().map(PathRule::Prefix));
        self
    }

    pub fn ignored_fields(&self) -> &[String] {
        &self.ignored_fields
    }

    pub fn is_ignored_field(&self, name: &str) -> bool {
        self.ignored_fields.iter().any(|f| f == name)
    }

    pub fn is_excluded_path(&self, path: &str) -> bool {
        self.path_rules.iter().any(|rule| rule.matches(path))
    }
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_IGNORED_FIELDS.iter().map(|s| s.to_string()).collect(),
            Self::default_path_rules(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ignored_fields() {
        let policy = ExclusionPolicy::default();
        assert!(policy.is_ignored_field("favicon"));
        assert!(policy.is_ignored_field("raw_html"));
        assert!(!policy.is_ignored_field("http"));
    }

    #[test]
    fn test_default_path_rules() {
        let policy = ExclusionPolicy::default();
        assert!(policy.is_excluded_path("banners"));
        assert!(policy.is_excluded_path("host.banners.data"));
        assert!(policy.is_excluded_path("ssl.cert.extensions"));
        assert!(policy.is_excluded_path("ssl.cert.extensions.x"));
        assert!(!policy.is_excluded_path("host.data"));
        assert!(!policy.is_excluded_path("banners_count"));
        assert!(!policy.is_excluded_path("ssl.cert.issued"));
    }

    #[test]
    fn test_extra_prefixes() {
        let policy = ExclusionPolicy::default().with_extra_prefixes(vec!["http.headers".into()]);
        assert!(policy.is_excluded_path("http.headers.server"));
        assert!(policy.is_excluded_path("banners"));
    }
}
