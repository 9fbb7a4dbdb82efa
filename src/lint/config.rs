/// Configuration of a lint run.
///
/// With the `json` feature the configuration can be read from a JSON document. Every key is
/// optional:
///
/// ```json
/// { "rules": ["defined-types-are-used", "key-directive-fields"], "parallel": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Deserialize))]
#[cfg_attr(feature = "json", serde(default, deny_unknown_fields))]
pub struct LintConfig {
    /// Names of the rules to run. All registered rules run when this is empty.
    pub rules: Vec<String>,
    /// Whether several documents are linted concurrently.
    pub parallel: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        LintConfig {
            rules: Vec::new(),
            parallel: true,
        }
    }
}

#[cfg(feature = "json")]
impl LintConfig {
    /// Read a configuration from a JSON document.
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(LintConfig::from_json("{}").unwrap(), LintConfig::default());
        assert!(LintConfig::default().parallel);
    }

    #[test]
    fn from_json() {
        let config = LintConfig::from_json(r#"{ "rules": ["relay-page-info-spec"], "parallel": false }"#)
            .unwrap();
        assert_eq!(config.rules, ["relay-page-info-spec"]);
        assert!(!config.parallel);

        assert!(LintConfig::from_json(r#"{ "rule": [] }"#).is_err());
        assert!(LintConfig::from_json(r#"{ "rules": "all" }"#).is_err());
    }
}
