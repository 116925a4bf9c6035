use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format when `--format` is not given
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Tsv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
scoring:
  ideal_wpm: 150
  weights:
    fluency: 0.3
output:
  format: json
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let scoring = config.scoring.unwrap();
        assert_eq!(scoring.ideal_wpm, Some(150.0));
        assert_eq!(scoring.weights().fluency, 0.3);
        assert_eq!(config.output.unwrap().format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []");
        assert!(result.is_err());
    }
}
