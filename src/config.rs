//! Engine configuration and name registries
//!
//!     An [`EngineConfig`] names the fixers and transformers a session uses. Names are resolved
//!     to instances through a [`FixerRegistry`] and a [`TransformerRegistry`]; both come with the
//!     shipped set pre-registered and accept further entries, so callers can plug in their own
//!     rules without touching the engine.
//!
//!     max_passes: 10
//!     fixers: [elseif, phpdoc_trim]
//!     transformers: [namespace_operator, use_keyword]
//!
//!     Omitted keys take their defaults: every shipped fixer, every shipped transformer, and a
//!     bound of ten passes.

use crate::engine::{Engine, DEFAULT_MAX_PASSES};
use crate::fixer::{
    ElseifFixer, Fixer, FixerSet, FunctionDeclarationFixer, PhpdocNoEmptyReturnFixer,
    PhpdocToCommentFixer, PhpdocTrimFixer,
};
use crate::tokenizer::transformer::{Transformer, TransformerPipeline};
use crate::tokenizer::transformers::{NamespaceOperatorTransformer, UseTransformer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(String),
    #[error("unknown fixer `{0}`")]
    UnknownFixer(String),
    #[error("unknown transformer `{0}`")]
    UnknownTransformer(String),
    #[error("max_passes must be at least 1")]
    NoPasses,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub max_passes: usize,
    /// Fixer names, in registration order. Execution order is by priority.
    pub fixers: Vec<String>,
    /// Transformer names, in pipeline order.
    pub transformers: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            fixers: FixerRegistry::with_defaults()
                .names()
                .into_iter()
                .map(String::from)
                .collect(),
            transformers: TransformerRegistry::with_defaults()
                .names()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl EngineConfig {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if config.max_passes == 0 {
            return Err(ConfigError::NoPasses);
        }
        Ok(config)
    }

    /// Builds an engine from the shipped registries.
    pub fn build(&self) -> Result<Engine, ConfigError> {
        self.build_with(
            &FixerRegistry::with_defaults(),
            &TransformerRegistry::with_defaults(),
        )
    }

    pub fn build_with(
        &self,
        fixers: &FixerRegistry,
        transformers: &TransformerRegistry,
    ) -> Result<Engine, ConfigError> {
        if self.max_passes == 0 {
            return Err(ConfigError::NoPasses);
        }
        let fixer_set = self
            .fixers
            .iter()
            .map(|name| fixers.create(name))
            .collect::<Result<Vec<_>, _>>()?;
        let pipeline = self
            .transformers
            .iter()
            .map(|name| transformers.create(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Engine::new(
            TransformerPipeline::new(pipeline),
            FixerSet::new(fixer_set),
        )
        .with_max_passes(self.max_passes))
    }
}

pub type FixerFactory = fn() -> Box<dyn Fixer>;

pub type TransformerFactory = fn() -> Box<dyn Transformer>;

/// Fixer names mapped to constructors. Names keep registration order.
pub struct FixerRegistry {
    factories: HashMap<String, FixerFactory>,
    order: Vec<String>,
}

impl FixerRegistry {
    pub fn new() -> Self {
        FixerRegistry {
            factories: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registers `factory` under the name of the fixer it builds.
    pub fn register(&mut self, factory: FixerFactory) {
        let name = factory().name().to_string();
        if self.factories.insert(name.clone(), factory).is_none() {
            self.order.push(name);
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Fixer>, ConfigError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| ConfigError::UnknownFixer(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(|| Box::new(ElseifFixer));
        registry.register(|| Box::new(FunctionDeclarationFixer));
        registry.register(|| Box::new(PhpdocNoEmptyReturnFixer));
        registry.register(|| Box::new(PhpdocToCommentFixer));
        registry.register(|| Box::new(PhpdocTrimFixer));
        registry
    }
}

impl Default for FixerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Transformer names mapped to constructors. Names keep registration order.
pub struct TransformerRegistry {
    factories: HashMap<String, TransformerFactory>,
    order: Vec<String>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        TransformerRegistry {
            factories: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn register(&mut self, factory: TransformerFactory) {
        let name = factory().name().to_string();
        if self.factories.insert(name.clone(), factory).is_none() {
            self.order.push(name);
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Transformer>, ConfigError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| ConfigError::UnknownTransformer(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(|| Box::new(NamespaceOperatorTransformer::new()));
        registry.register(|| Box::new(UseTransformer::new()));
        registry
    }
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
