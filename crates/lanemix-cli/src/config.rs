use std::path::Path;

use lanemix_balancer::BalancerConfig;
use lanemix_rating::RatingConfig;
use serde::{Deserialize, Serialize};

use crate::util;

/// Settings loaded from `--config`; missing sections fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub balancer: BalancerConfig,
    pub rating: RatingConfig,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => util::read_json_file("config", path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "balancer": { "trial_count": 500, "seed": 3 } }"#).unwrap();
        assert_eq!(config.balancer.trial_count, 500);
        assert_eq!(config.balancer.seed, Some(3));
        assert_eq!(
            config.balancer.exclusion_threshold,
            BalancerConfig::DEFAULT_EXCLUSION_THRESHOLD
        );
        assert_eq!(config.rating, RatingConfig::default());
    }

    #[test]
    fn test_missing_path_is_default() {
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }
}
