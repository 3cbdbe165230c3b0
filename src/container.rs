//! Application-facing container: a [`BeanFactory`] configured from the
//! environment and fed from definition files.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use beanwright_core::{BeanFactory, DefinitionSet, ResolverConfig, TypeCatalog};
use beanwright_types::{BeanDefinition, Instance};
use tracing::{debug, info};

pub struct Container {
    factory: BeanFactory,
}

impl Container {
    /// Container over `catalog`, configured by [`ResolverConfig::from_env`].
    pub fn new(catalog: TypeCatalog) -> Self {
        Self::with_config(catalog, ResolverConfig::from_env())
    }

    pub fn with_config(catalog: TypeCatalog, config: ResolverConfig) -> Self {
        Self {
            factory: BeanFactory::new(catalog).with_config(config),
        }
    }

    /// Register every definition in a JSON definition file. Returns the count.
    pub fn load_definitions(&self, path: &Path) -> Result<usize> {
        let set = DefinitionSet::from_path(path)?;
        let count = set.len();
        self.factory.register_definitions(set);
        info!(path = %path.display(), count, "loaded bean definitions");
        Ok(count)
    }

    /// Register every definition in a JSON string. Returns the count.
    pub fn load_json(&self, json: &str) -> Result<usize> {
        let set = DefinitionSet::from_json_str(json)?;
        let count = set.len();
        self.factory.register_definitions(set);
        info!(count, "loaded bean definitions from json");
        Ok(count)
    }

    pub fn register(&self, definition: BeanDefinition) {
        self.factory.register_definition(definition);
    }

    pub fn get_bean(&self, id: &str) -> Result<Instance> {
        self.factory.get_bean(id)
    }

    pub fn get<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
        self.factory.get_typed::<T>(id)
    }

    /// Eagerly construct every singleton, in id order, so configuration
    /// mistakes surface at startup rather than on first use.
    pub fn preinstantiate_singletons(&self) -> Result<usize> {
        let mut count = 0;
        for id in self.factory.definition_ids() {
            let Some(definition) = self.factory.definition(&id) else {
                continue;
            };
            if !definition.is_singleton() {
                continue;
            }
            self.factory
                .get_bean(&id)
                .with_context(|| format!("preinstantiate singleton '{}'", id))?;
            debug!(bean = %id, "singleton ready");
            count += 1;
        }
        Ok(count)
    }

    pub fn factory(&self) -> &BeanFactory {
        &self.factory
    }
}
