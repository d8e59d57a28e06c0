//! Selection strategies over the provider registry

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use stride_core::Strategy;

use crate::provider::Provider;
use crate::registry::ProviderRegistry;

/// Resolves the ordered provider subset for one orchestration round
///
/// The rotation counter is the only mutable state shared across concurrent
/// rounds; the atomic increment serializes selection so two simultaneous
/// rounds never act on a stale read.
pub struct Selector {
    registry: Arc<ProviderRegistry>,
    default_provider: Option<String>,
    rotation: AtomicUsize,
}

impl Selector {
    /// Create a selector over a registry
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>, default_provider: Option<String>) -> Self {
        Self {
            registry,
            default_provider,
            rotation: AtomicUsize::new(0),
        }
    }

    /// The registry this selector draws from
    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// Resolve the provider subset for a strategy
    ///
    /// An empty result means a no-op round, never an error.
    pub fn select(&self, strategy: Strategy) -> Vec<Arc<dyn Provider>> {
        match strategy {
            Strategy::All => self
                .registry
                .providers()
                .iter()
                .filter(|p| p.is_available())
                .cloned()
                .collect(),
            Strategy::Rotate => self.rotate(),
            Strategy::Single => self.single(),
        }
    }

    /// Advance the rotation counter and pick one provider
    ///
    /// The counter only advances on selection, never on call outcome, and
    /// wraps on overflow; the modulo keeps any counter value valid.
    fn rotate(&self) -> Vec<Arc<dyn Provider>> {
        let providers = self.registry.providers();
        if providers.is_empty() {
            return Vec::new();
        }

        let index = self.rotation.fetch_add(1, Ordering::Relaxed) % providers.len();
        vec![Arc::clone(&providers[index])]
    }

    /// Pick the configured default provider, falling back to the first
    /// available adapter
    fn single(&self) -> Vec<Arc<dyn Provider>> {
        if let Some(ref id) = self.default_provider
            && let Some(provider) = self.registry.find(id)
        {
            return vec![provider];
        }

        self.registry
            .providers()
            .iter()
            .find(|p| p.is_available())
            .map_or_else(Vec::new, |p| vec![Arc::clone(p)])
    }
}
