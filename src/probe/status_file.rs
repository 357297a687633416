use std::collections::BTreeMap;

/// Name of the status file inside each role's working directory
pub const STATUS_FILE_NAME: &str = ".team";

/// Parse `key=value` lines. Blank lines, `#` comments, lines without `=`
/// and empty keys are skipped; later keys win.
pub fn parse_status_file(content: &str) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        values.insert(key.to_string(), value.trim().to_string());
    }

    values
}

/// What an agent reports about itself through its status file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamStatus {
    values: BTreeMap<String, String>,
}

impl TeamStatus {
    pub fn parse(content: &str) -> Self {
        Self {
            values: parse_status_file(content),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// `status`, trimmed and lower-cased; empty when absent
    pub fn status(&self) -> String {
        self.get("status")
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default()
    }

    pub fn is_complete(&self) -> bool {
        self.status() == "complete"
    }

    pub fn current_loop(&self) -> Option<u32> {
        self.get("current_loop").and_then(|v| v.trim().parse().ok())
    }

    pub fn intensity(&self) -> Option<u32> {
        self.get("intensity").and_then(|v| v.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_blanks_and_junk() {
        let content = "\n# written by the agent\nteam = audit-perf\nstatus=running\nnot a pair\n=orphan\ncurrent_loop= 2 \nextra=ignored=kept\n";
        let values = parse_status_file(content);

        assert_eq!(values.len(), 4);
        assert_eq!(values["team"], "audit-perf");
        assert_eq!(values["current_loop"], "2");
        assert_eq!(values["extra"], "ignored=kept");
    }

    #[test]
    fn test_complete_is_case_and_whitespace_insensitive() {
        assert!(TeamStatus::parse("status=  COMPLETE \n").is_complete());
        assert!(TeamStatus::parse("status=Complete").is_complete());
        assert!(!TeamStatus::parse("status=completed").is_complete());
        assert!(!TeamStatus::parse("current_loop=3").is_complete());
    }

    #[test]
    fn test_numeric_fields_fall_back_on_garbage() {
        let status = TeamStatus::parse("current_loop=abc\nintensity=4\n");

        assert_eq!(status.current_loop(), None);
        assert_eq!(status.intensity(), Some(4));
    }
}
