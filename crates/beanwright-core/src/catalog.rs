//! Type Catalog: the registered-factory table that replaces runtime reflection.
//!
//! Every constructible type is registered once at startup as a
//! [`TypeDescriptor`]: a name plus an ordered list of constructors. The
//! registration order of constructors is the enumeration order the
//! [`ConstructorResolver`](crate::ConstructorResolver) walks, so it is also
//! the tie-break when several constructors could accept the same arguments.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use beanwright_types::{format_signature, parse_signature, Instance, ParamType};
use tracing::warn;

use crate::args::Args;

type Factory = Arc<dyn Fn(&Args) -> Result<Instance> + Send + Sync>;

/// One constructor of a registered type
#[derive(Clone)]
pub struct ConstructorInfo {
    declaring_type: Arc<str>,
    params: Vec<ParamType>,
    factory: Factory,
}

impl ConstructorInfo {
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Printable signature, e.g. `Point(int, int)`.
    pub fn signature(&self) -> String {
        format_signature(&self.declaring_type, &self.params)
    }

    /// Run the factory. Callers are expected to have matched `args` against
    /// [`params`](Self::params) first.
    pub fn invoke(&self, args: &Args) -> Result<Instance> {
        (self.factory)(args)
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("signature", &self.signature())
            .finish()
    }
}

/// A constructible type and its constructors, in declaration order.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: Arc<str>,
    constructors: Vec<ConstructorInfo>,
}

impl TypeDescriptor {
    pub fn builder(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            name: Arc::from(name.into()),
            constructors: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }
}

pub struct TypeDescriptorBuilder {
    name: Arc<str>,
    constructors: Vec<ConstructorInfo>,
}

impl TypeDescriptorBuilder {
    /// Declare a constructor. The factory receives arguments already
    /// converted to `params`; whatever it returns is wrapped as an
    /// [`Instance`] of this type.
    pub fn constructor<T, F>(mut self, params: impl IntoIterator<Item = ParamType>, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Args) -> Result<T> + Send + Sync + 'static,
    {
        let type_name = Arc::clone(&self.name);
        let factory: Factory =
            Arc::new(move |args: &Args| factory(args).map(|value| Instance::new(Arc::clone(&type_name), value)));

        self.constructors.push(ConstructorInfo {
            declaring_type: Arc::clone(&self.name),
            params: params.into_iter().collect(),
            factory,
        });
        self
    }

    /// Declare a constructor from a textual parameter list like `"int, string"`.
    pub fn constructor_sig<T, F>(self, signature: &str, factory: F) -> Result<Self>
    where
        T: Any + Send + Sync,
        F: Fn(&Args) -> Result<T> + Send + Sync + 'static,
    {
        let params = parse_signature(signature).ok_or_else(|| {
            anyhow!(
                "invalid constructor signature for {}: ({})",
                self.name,
                signature
            )
        })?;
        Ok(self.constructor(params, factory))
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            name: self.name,
            constructors: self.constructors,
        }
    }
}

/// Translates a type name into a descriptor able to enumerate and invoke constructors.
pub trait TypeLoader {
    fn load(&self, type_name: &str) -> Result<Arc<TypeDescriptor>>;
}

impl<L: TypeLoader + ?Sized> TypeLoader for Arc<L> {
    fn load(&self, type_name: &str) -> Result<Arc<TypeDescriptor>> {
        (**self).load(type_name)
    }
}

impl<L: TypeLoader + ?Sized> TypeLoader for &L {
    fn load(&self, type_name: &str) -> Result<Arc<TypeDescriptor>> {
        (**self).load(type_name)
    }
}

/// Map from type name to its descriptor
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<String, Arc<TypeDescriptor>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any previous descriptor with the same name.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Option<Arc<TypeDescriptor>> {
        let name = descriptor.name().to_string();
        let previous = self.types.insert(name.clone(), Arc::new(descriptor));
        if previous.is_some() {
            warn!(type_name = %name, "type re-registered, previous constructors discarded");
        }
        previous
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TypeLoader for TypeCatalog {
    fn load(&self, type_name: &str) -> Result<Arc<TypeDescriptor>> {
        self.types
            .get(type_name)
            .cloned()
            .ok_or_else(|| anyhow!("type not registered: {}", type_name))
    }
}
