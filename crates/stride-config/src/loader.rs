use std::path::Path;

use stride_core::Strategy;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// A missing or empty API key is deliberately not an error: that
    /// backend degrades to unavailable at registry construction instead of
    /// failing the process.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider has an empty model identifier or the
    /// call timeout is zero
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, provider) in &self.analysis.providers {
            if provider.model.trim().is_empty() {
                anyhow::bail!("provider '{name}' has an empty model identifier");
            }
        }

        if self.analysis.call_timeout.is_zero() {
            anyhow::bail!("analysis.call_timeout must be greater than zero");
        }

        if self.analysis.strategy == Strategy::Single
            && let Some(ref default) = self.analysis.default_provider
            && !self.analysis.providers.contains_key(default)
            && !self.analysis.providers.values().any(|p| p.model == *default)
        {
            // Not fatal: SINGLE falls back to the first available adapter
            tracing::warn!(
                default_provider = %default,
                "default_provider does not match any configured provider"
            );
        }

        Ok(())
    }
}
