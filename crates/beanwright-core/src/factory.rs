//! # Bean Factory
//!
//! Registry of [`BeanDefinition`]s plus the lifecycle around them: singleton
//! caching, prototype construction on every request, and reference
//! resolution for constructor arguments.
//!
//! ## Architecture
//!
//! ```text
//! get_bean("widget")
//!        │
//!        ▼
//! ┌─────────────────────┐   singleton hit   ┌──────────────┐
//! │    BeanFactory      │ ────────────────► │ cached value │
//! │  - definitions      │                   └──────────────┘
//! │  - singletons       │
//! └──────────┬──────────┘
//!            │ miss / prototype
//!            ▼
//! ┌─────────────────────┐  ref args  ┌─────────────────────────┐
//! │ ConstructorResolver │ ─────────► │ DefinitionValueResolver │ ──► get_bean(ref)
//! └─────────────────────┘            └─────────────────────────┘
//! ```
//!
//! Reference chains carry their creation path, so `a -> b -> a` fails with a
//! circular reference error instead of recursing forever. The path travels
//! with each call rather than living in the factory, which keeps concurrent
//! `get_bean` calls independent.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use beanwright_types::{ArgumentDescriptor, BeanDefinition, Instance, Value};
use parking_lot::RwLock;
use tracing::{trace, warn};

use crate::catalog::TypeLoader;
use crate::config::ResolverConfig;
use crate::constructor_resolver::ConstructorResolver;
use crate::converter::{SimpleTypeConverter, TypeConverter};
use crate::definitions::DefinitionSet;
use crate::errors::ConstructionError;
use crate::value_resolver::ValueResolver;

pub struct BeanFactory {
    loader: Arc<dyn TypeLoader + Send + Sync>,
    converter: Arc<dyn TypeConverter + Send + Sync>,
    config: ResolverConfig,
    definitions: RwLock<HashMap<String, Arc<BeanDefinition>>>,
    singletons: RwLock<HashMap<String, Instance>>,
}

impl BeanFactory {
    /// Create a factory over `loader` with the [`SimpleTypeConverter`] and
    /// default configuration.
    pub fn new(loader: impl TypeLoader + Send + Sync + 'static) -> Self {
        Self {
            loader: Arc::new(loader),
            converter: Arc::new(SimpleTypeConverter),
            config: ResolverConfig::default(),
            definitions: RwLock::new(HashMap::new()),
            singletons: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_converter(mut self, converter: impl TypeConverter + Send + Sync + 'static) -> Self {
        self.converter = Arc::new(converter);
        self
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    /// Register a definition, replacing (and evicting the cached singleton
    /// of) any previous definition with the same id.
    pub fn register_definition(&self, definition: BeanDefinition) -> Option<Arc<BeanDefinition>> {
        let id = definition.id.clone();
        let previous = self
            .definitions
            .write()
            .insert(id.clone(), Arc::new(definition));
        if previous.is_some() {
            warn!(bean = %id, "bean definition overridden");
            self.singletons.write().remove(&id);
        }
        previous
    }

    pub fn register_definitions(&self, definitions: DefinitionSet) {
        for definition in definitions {
            self.register_definition(definition);
        }
    }

    pub fn definition(&self, id: &str) -> Option<Arc<BeanDefinition>> {
        self.definitions.read().get(id).cloned()
    }

    pub fn contains_definition(&self, id: &str) -> bool {
        self.definitions.read().contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn definition_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.definitions.read().keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Get (constructing if needed) the bean registered under `id`.
    pub fn get_bean(&self, id: &str) -> Result<Instance> {
        self.get_bean_in_path(id, &[])
    }

    /// [`get_bean`](Self::get_bean) downcast to the concrete type.
    pub fn get_typed<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
        let instance = self.get_bean(id)?;
        instance.downcast::<T>().ok_or_else(|| {
            anyhow!(
                "bean '{}' is a {}, not a {}",
                id,
                instance.type_name(),
                std::any::type_name::<T>()
            )
        })
    }

    /// Construct an unregistered definition. References in its arguments
    /// still resolve against this factory; nothing is cached.
    pub fn construct(&self, definition: &BeanDefinition) -> Result<Instance, ConstructionError> {
        self.create(definition, vec![definition.id.clone()])
    }

    fn get_bean_in_path(&self, id: &str, path: &[String]) -> Result<Instance> {
        if path.iter().any(|p| p == id) {
            let mut cycle = path.to_vec();
            cycle.push(id.to_string());
            bail!("circular reference: {}", cycle.join(" -> "));
        }

        let definition = self
            .definition(id)
            .ok_or_else(|| anyhow!("no bean definition registered for '{}'", id))?;

        if definition.is_singleton() {
            if let Some(instance) = self.singletons.read().get(id) {
                trace!(bean = %id, "singleton cache hit");
                return Ok(instance.clone());
            }
        }

        let mut chain = path.to_vec();
        chain.push(id.to_string());
        let instance = self.create(&definition, chain)?;

        if !definition.is_singleton() {
            return Ok(instance);
        }
        // Concurrent first requests may both construct; the first insert wins.
        let mut singletons = self.singletons.write();
        Ok(singletons.entry(id.to_string()).or_insert(instance).clone())
    }

    fn create(&self, definition: &BeanDefinition, path: Vec<String>) -> Result<Instance, ConstructionError> {
        let values = DefinitionValueResolver {
            factory: self,
            path,
        };
        ConstructorResolver::new(self.loader.as_ref(), &values, self.converter.as_ref())
            .with_config(self.config)
            .construct(definition)
    }
}

/// Resolves literals to their text and references to beans of a [`BeanFactory`].
pub struct DefinitionValueResolver<'a> {
    factory: &'a BeanFactory,
    /// Ids under construction in this call chain, outermost first
    path: Vec<String>,
}

impl<'a> DefinitionValueResolver<'a> {
    pub fn new(factory: &'a BeanFactory) -> Self {
        Self {
            factory,
            path: Vec::new(),
        }
    }
}

impl ValueResolver for DefinitionValueResolver<'_> {
    fn resolve(&self, descriptor: &ArgumentDescriptor) -> Result<Value> {
        match descriptor {
            ArgumentDescriptor::Literal(text) => Ok(Value::Str(text.clone())),
            ArgumentDescriptor::Reference(id) => self
                .factory
                .get_bean_in_path(id, &self.path)
                .map(Value::Object)
                .with_context(|| format!("failed to resolve reference '{}'", id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TypeCatalog, TypeDescriptor};
    use crate::errors::ConstructionErrorKind;
    use beanwright_types::{ParamType, Scope};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Node {
        label: String,
        next: Option<Arc<Node>>,
    }

    fn factory_with_counter(counter: Arc<AtomicUsize>) -> BeanFactory {
        let catalog = TypeCatalog::new().with(
            TypeDescriptor::builder("Node")
                .constructor([ParamType::String], move |args| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(Node {
                        label: args.str(0)?.to_string(),
                        next: None,
                    })
                })
                .constructor([ParamType::String, ParamType::object("Node")], |args| {
                    Ok(Node {
                        label: args.str(0)?.to_string(),
                        next: Some(args.object::<Node>(1)?),
                    })
                })
                .build(),
        );
        BeanFactory::new(catalog)
    }

    fn factory() -> BeanFactory {
        factory_with_counter(Arc::new(AtomicUsize::new(0)))
    }

    #[test]
    fn test_singleton_is_cached() {
        let counter = Arc::new(AtomicUsize::new(0));
        let factory = factory_with_counter(Arc::clone(&counter));
        factory.register_definition(BeanDefinition::new("tail", "Node").literal("t"));

        let first = factory.get_bean("tail").unwrap();
        let second = factory.get_bean("tail").unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_prototype_is_rebuilt() {
        let counter = Arc::new(AtomicUsize::new(0));
        let factory = factory_with_counter(Arc::clone(&counter));
        factory.register_definition(
            BeanDefinition::new("tail", "Node")
                .literal("t")
                .with_scope(Scope::Prototype),
        );

        let first = factory.get_bean("tail").unwrap();
        let second = factory.get_bean("tail").unwrap();
        assert!(!first.ptr_eq(&second));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reference_resolves_transitively() {
        let factory = factory();
        factory.register_definition(BeanDefinition::new("tail", "Node").literal("t"));
        factory.register_definition(BeanDefinition::new("mid", "Node").literal("m").reference("tail"));
        factory.register_definition(BeanDefinition::new("head", "Node").literal("h").reference("mid"));

        let head = factory.get_typed::<Node>("head").unwrap();
        let mid = head.next.as_ref().unwrap();
        assert_eq!(head.label, "h");
        assert_eq!(mid.label, "m");
        assert_eq!(mid.next.as_ref().unwrap().label, "t");

        // The referenced singleton is the same object the factory hands out.
        let tail = factory.get_typed::<Node>("tail").unwrap();
        assert!(Arc::ptr_eq(&tail, mid.next.as_ref().unwrap()));
    }

    #[test]
    fn test_cycle_detected() {
        let factory = factory();
        factory.register_definition(BeanDefinition::new("a", "Node").literal("a").reference("b"));
        factory.register_definition(BeanDefinition::new("b", "Node").literal("b").reference("a"));

        let err = factory.get_bean("a").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("circular reference: a -> b -> a"), "{}", message);

        let construction = err.downcast_ref::<ConstructionError>().unwrap();
        assert_eq!(construction.kind, ConstructionErrorKind::NoMatchingConstructor);
    }

    #[test]
    fn test_missing_definition() {
        let err = factory().get_bean("ghost").unwrap_err();
        assert_eq!(err.to_string(), "no bean definition registered for 'ghost'");
    }

    #[test]
    fn test_override_evicts_singleton() {
        let factory = factory();
        factory.register_definition(BeanDefinition::new("n", "Node").literal("old"));
        assert_eq!(factory.get_typed::<Node>("n").unwrap().label, "old");

        assert!(factory
            .register_definition(BeanDefinition::new("n", "Node").literal("new"))
            .is_some());
        assert_eq!(factory.get_typed::<Node>("n").unwrap().label, "new");
        assert_eq!(factory.definition_ids(), vec!["n".to_string()]);
    }

    #[test]
    fn test_get_typed_wrong_type() {
        let factory = factory();
        factory.register_definition(BeanDefinition::new("n", "Node").literal("x"));
        let err = factory.get_typed::<String>("n").unwrap_err();
        assert!(err.to_string().starts_with("bean 'n' is a Node"));
    }

    #[test]
    fn test_construct_unregistered_definition() {
        let factory = factory();
        factory.register_definition(BeanDefinition::new("tail", "Node").literal("t"));

        let adhoc = BeanDefinition::new("adhoc", "Node").literal("x").reference("tail");
        let instance = factory.construct(&adhoc).unwrap();
        assert_eq!(instance.downcast_ref::<Node>().unwrap().label, "x");
        assert!(!factory.contains_definition("adhoc"));
    }
}
