use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(wpm) = config.ideal_wpm {
        if !wpm.is_finite() || wpm <= 0.0 {
            errors.push(format!("scoring.ideal_wpm: must be a positive number, got {}", wpm));
        }
    }

    if let Some(ref weights) = config.weights {
        for (name, value) in weights.entries() {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    errors.push(format!(
                        "scoring.weights.{}: must be a non-negative number, got {}",
                        name, value
                    ));
                }
            }
        }

        // Only meaningful once every individual weight is sane
        if errors.is_empty() && config.weights().total() <= 0.0 {
            errors.push("scoring.weights: at least one weight must be positive".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::WeightConfig;

    fn weights(fluency: f64, grammar: f64) -> WeightConfig {
        WeightConfig {
            fluency: Some(fluency),
            grammar: Some(grammar),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let config = ScoringConfig {
            ideal_wpm: Some(150.0),
            weights: Some(weights(0.3, 0.2)),
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_scoring(&ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_ideal_wpm() {
        let config = ScoringConfig {
            ideal_wpm: Some(0.0),
            weights: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.ideal_wpm"));
    }

    #[test]
    fn test_negative_weight() {
        let config = ScoringConfig {
            ideal_wpm: None,
            weights: Some(weights(-0.1, 0.2)),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.weights.fluency"));
    }

    #[test]
    fn test_nan_weight() {
        let config = ScoringConfig {
            ideal_wpm: None,
            weights: Some(weights(0.2, f64::NAN)),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("scoring.weights.grammar"));
    }

    #[test]
    fn test_all_zero_weights() {
        let config = ScoringConfig {
            ideal_wpm: None,
            weights: Some(WeightConfig {
                fluency: Some(0.0),
                grammar: Some(0.0),
                clarity: Some(0.0),
                relevance: Some(0.0),
                confidence: Some(0.0),
                vocabulary: Some(0.0),
            }),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert!(errors[0].contains("at least one weight"));
    }

    #[test]
    fn test_zeroing_some_weights_is_fine() {
        // unset weights keep their defaults
        let config = ScoringConfig {
            ideal_wpm: None,
            weights: Some(weights(0.0, 0.0)),
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let config = ScoringConfig {
            ideal_wpm: Some(-5.0),            // Error 1
            weights: Some(weights(-1.0, -2.0)), // Errors 2 and 3
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
