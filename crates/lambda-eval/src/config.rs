use serde::{Deserialize, Serialize};

/// Evaluation limits.
///
/// Expressions can reference themselves, so an evaluation may not finish on
/// its own. Gas bounds the total number of steps (node visits plus function
/// applications) and `max_depth` bounds how many expression references and
/// function applications may be in progress at once. Nesting of primitive
/// arguments does not count towards depth. Hitting either limit yields the
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub gas_limit: u64,
    pub max_depth: usize,
}

impl EvalConfig {
    pub const DEFAULT_GAS_LIMIT: u64 = 100_000;
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub fn with_gas_limit(self, gas_limit: u64) -> Self {
        Self { gas_limit, ..self }
    }

    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            gas_limit: Self::DEFAULT_GAS_LIMIT,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EvalConfig = serde_json::from_str(r#"{ "gas_limit": 50 }"#).unwrap();
        assert_eq!(config.gas_limit, 50);
        assert_eq!(config.max_depth, EvalConfig::DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn builders() {
        let config = EvalConfig::default().with_gas_limit(10).with_max_depth(3);
        assert_eq!(config, EvalConfig { gas_limit: 10, max_depth: 3 });
    }
}
