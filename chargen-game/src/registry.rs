//! Rule-system registry: maps an identifier to its composed step chain.

use log::{debug, error};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{ChargenError, Result};
use crate::pipeline::{Layer, RuleSystem};
use crate::systems::BUILTIN_LAYERS;

/// Composed rule systems keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    systems: BTreeMap<&'static str, RuleSystem>,
}

static BUILTIN: OnceLock<Registry> = OnceLock::new();

impl Registry {
    /// Shared registry of the built-in layers, composed on first use.
    #[must_use]
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            let mut registry = Self::default();
            for layer in &BUILTIN_LAYERS {
                if let Err(err) = registry.register(layer) {
                    error!("skipping built-in layer {}: {err}", layer.id);
                }
            }
            registry
        })
    }

    /// Compose `layer` on top of its already-registered parent.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::RuleSystemNotFound`] when the parent has not
    /// been registered yet.
    pub fn register(&mut self, layer: &Layer) -> Result<()> {
        let parent = match layer.parent {
            Some(id) => Some(
                self.systems
                    .get(id)
                    .ok_or_else(|| ChargenError::RuleSystemNotFound(id.to_string()))?,
            ),
            None => None,
        };
        let system = RuleSystem::compose(layer, parent);
        debug!("registered {} with steps {:?}", layer.id, system.step_names());
        self.systems.insert(layer.id, system);
        Ok(())
    }

    /// Look up a playable rule system by exact id.
    ///
    /// # Errors
    ///
    /// Returns [`ChargenError::RuleSystemNotFound`] for unknown ids and for
    /// abstract layers.
    pub fn resolve(&self, id: &str) -> Result<&RuleSystem> {
        self.systems
            .get(id)
            .filter(|system| system.is_resolvable())
            .ok_or_else(|| ChargenError::RuleSystemNotFound(id.to_string()))
    }

    /// Ids of every playable rule system, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        self.systems
            .values()
            .filter(|system| system.is_resolvable())
            .map(RuleSystem::id)
            .collect()
    }

    pub fn systems(&self) -> impl Iterator<Item = &RuleSystem> {
        self.systems.values().filter(|system| system.is_resolvable())
    }
}
