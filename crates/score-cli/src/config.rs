use std::path::PathBuf;

pub const INPUT_ENV: &str = "SCORE_CLI_INPUT";
pub const PRETTY_ENV: &str = "SCORE_CLI_PRETTY";

/// Resolved command-line options. Flags win over environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Read from stdin when `None`.
    pub input: Option<PathBuf>,
    pub pretty: bool,
    pub summary: bool,
}

impl CliConfig {
    pub fn from_env_and_args(args: &[String]) -> Self {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    pub fn resolve(args: &[String], env: impl Fn(&str) -> Option<String>) -> Self {
        let input = args
            .iter()
            .position(|a| a == "--input")
            .and_then(|i| args.get(i + 1))
            .map(PathBuf::from)
            .or_else(|| env(INPUT_ENV).filter(|v| !v.is_empty()).map(PathBuf::from));

        let pretty = args.iter().any(|a| a == "--pretty")
            || env(PRETTY_ENV).is_some_and(|v| is_truthy(&v));

        Self {
            input,
            pretty,
            summary: args.iter().any(|a| a == "--summary"),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults_read_stdin() {
        let config = CliConfig::resolve(&args(&["score-cli"]), |_| None);
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_flags() {
        let config = CliConfig::resolve(
            &args(&["score-cli", "--input", "aapl.json", "--pretty", "--summary"]),
            |_| None,
        );
        assert_eq!(config.input, Some(PathBuf::from("aapl.json")));
        assert!(config.pretty);
        assert!(config.summary);
    }

    #[test]
    fn test_env_fallback_and_flag_override() {
        let env: HashMap<&str, &str> =
            HashMap::from([(INPUT_ENV, "from-env.json"), (PRETTY_ENV, "1")]);
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());

        let config = CliConfig::resolve(&args(&["score-cli"]), lookup);
        assert_eq!(config.input, Some(PathBuf::from("from-env.json")));
        assert!(config.pretty);

        let config = CliConfig::resolve(&args(&["score-cli", "--input", "flag.json"]), lookup);
        assert_eq!(config.input, Some(PathBuf::from("flag.json")));
    }

    #[test]
    fn test_pretty_env_values() {
        let with = |value: &'static str| {
            CliConfig::resolve(&args(&["score-cli"]), move |key| {
                (key == PRETTY_ENV).then(|| value.to_string())
            })
            .pretty
        };
        assert!(with("true"));
        assert!(with("YES"));
        assert!(!with("0"));
        assert!(!with(""));
    }

    #[test]
    fn test_dangling_input_flag_is_ignored() {
        let config = CliConfig::resolve(&args(&["score-cli", "--input"]), |_| None);
        assert_eq!(config.input, None);
    }
}
