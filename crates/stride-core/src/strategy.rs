use serde::{Deserialize, Serialize};

/// Policy deciding which providers participate in an orchestration round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Query every available provider
    #[default]
    All,
    /// Query exactly one provider, rotating through the registry
    Rotate,
    /// Query the configured default provider
    Single,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_snake_case() {
        assert_eq!(serde_json::from_str::<Strategy>("\"rotate\"").unwrap(), Strategy::Rotate);
        assert_eq!(serde_json::from_str::<Strategy>("\"all\"").unwrap(), Strategy::All);
    }

    #[test]
    fn defaults_to_all() {
        assert_eq!(Strategy::default(), Strategy::All);
    }
}
