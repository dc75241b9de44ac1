//! Decoding of `rpmspec` query output.

use serde::{Deserialize, Serialize};

use crate::constants::{NAME_KEY, VERSION_KEY};

/// Package names and version declared by a spec file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecQueryResult {
    /// Spec version; empty when the output carried no `Version` line.
    pub version: String,

    /// One entry per `Name` line, in output order. Duplicates are kept.
    #[serde(rename = "packages")]
    pub package_names: Vec<String>,
}

impl SpecQueryResult {
    /// Decode `Key=Value` lines produced by the query template.
    ///
    /// Lines are split on the first `=` only, so values may themselves contain
    /// `=`. Lines without `=` and unknown keys are skipped. `Version` is
    /// last-write-wins; `Name` values are appended in order.
    ///
    /// ```
    /// use specq::spec::SpecQueryResult;
    ///
    /// let result = SpecQueryResult::decode(["Name=example", "Version=1.0.0", "Name=example-devel"]);
    /// assert_eq!(result.version, "1.0.0");
    /// assert_eq!(result.package_names, ["example", "example-devel"]);
    /// ```
    pub fn decode<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Self::default();
        let mut version_seen = false;

        for line in lines {
            let line = line.as_ref();
            let Some((key, value)) = line.split_once('=') else {
                tracing::trace!(target: "specq::spec", "Skipping line without '=': {}", line);
                continue;
            };

            match key {
                VERSION_KEY => {
                    if version_seen && result.version != value {
                        tracing::warn!(
                            target: "specq::spec",
                            "Conflicting versions in rpmspec output: '{}' replaced by '{}'",
                            result.version,
                            value
                        );
                    }
                    result.version = value.to_string();
                    version_seen = true;
                }
                NAME_KEY => result.package_names.push(value.to_string()),
                _ => {
                    tracing::trace!(target: "specq::spec", "Ignoring unknown key '{}'", key);
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::capture_logs;
    use tracing::Level;

    #[test]
    fn test_split_on_first_equals() {
        let result = SpecQueryResult::decode(["Version=1.2=3"]);
        assert_eq!(result.version, "1.2=3");

        let result = SpecQueryResult::decode(["Name=a=b="]);
        assert_eq!(result.package_names, ["a=b="]);
    }

    #[test]
    fn test_lines_without_equals_are_skipped() {
        let result = SpecQueryResult::decode(["garbage", "Name=foo", ""]);
        assert_eq!(result.package_names, ["foo"]);
        assert_eq!(result.version, "");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let result = SpecQueryResult::decode([
            "Release=3.azl3",
            "Name=foo",
            "name=lowercase-is-not-a-key",
            "Summary=A=B",
            "Version=2.1",
        ]);
        assert_eq!(result.package_names, ["foo"]);
        assert_eq!(result.version, "2.1");
    }

    #[test]
    fn test_name_order_preserved() {
        let result = SpecQueryResult::decode(["Name=c", "Name=a", "Name=b"]);
        assert_eq!(result.package_names, ["c", "a", "b"]);
    }

    #[test]
    fn test_duplicate_names_preserved() {
        let result = SpecQueryResult::decode(["Name=a", "Name=a"]);
        assert_eq!(result.package_names, ["a", "a"]);
    }

    #[test]
    fn test_version_last_write_wins() {
        let result = SpecQueryResult::decode(["Version=1.0", "Version=2.0"]);
        assert_eq!(result.version, "2.0");
    }

    #[test]
    fn test_conflicting_versions_warn() {
        let logs = capture_logs(Level::WARN, || {
            let result = SpecQueryResult::decode(["Version=1.0", "Name=a", "Version=2.0"]);
            assert_eq!(result.version, "2.0");
        });

        assert!(logs.contains("WARN"), "logs: {logs}");
        assert!(logs.contains("Conflicting versions"), "logs: {logs}");
        assert!(logs.contains("'1.0'") && logs.contains("'2.0'"), "logs: {logs}");
    }

    #[test]
    fn test_repeated_identical_version_does_not_warn() {
        let logs = capture_logs(Level::WARN, || {
            let result = SpecQueryResult::decode(["Version=1.0", "Name=a", "Version=1.0"]);
            assert_eq!(result.version, "1.0");
        });

        assert!(logs.is_empty(), "logs: {logs}");
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let result = SpecQueryResult::decode(["Name= spaced ", "Version="]);
        assert_eq!(result.package_names, [" spaced "]);
        assert_eq!(result.version, "");
    }

    #[test]
    fn test_empty_output() {
        let result = SpecQueryResult::decode(Vec::<String>::new());
        assert_eq!(result, SpecQueryResult::default());
        assert!(result.package_names.is_empty());
        assert_eq!(result.version, "");
    }

    #[test]
    fn test_decode_is_repeatable() {
        let lines = vec!["Name=x".to_string(), "Version=1".to_string(), "junk".to_string()];
        assert_eq!(SpecQueryResult::decode(&lines), SpecQueryResult::decode(&lines));
    }

    #[test]
    fn test_multi_package_spec() {
        let result =
            SpecQueryResult::decode(["Name=example", "Version=1.0.0", "Name=example-devel"]);
        assert_eq!(
            result,
            SpecQueryResult {
                version: "1.0.0".to_string(),
                package_names: vec!["example".to_string(), "example-devel".to_string()],
            }
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let result = SpecQueryResult::decode(["Name=example", "Version=1.0.0"]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"version": "1.0.0", "packages": ["example"]}));
    }
}
