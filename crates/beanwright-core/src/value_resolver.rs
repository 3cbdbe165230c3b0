//! # Value Resolution
//!
//! Turns an [`ArgumentDescriptor`] into the runtime [`Value`] it stands for.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ValueResolver`] | Trait consumed by the signature matcher |
//! | [`LiteralValueResolver`] | Literal-only resolver, for registry-free use |
//! | [`DefinitionValueResolver`](crate::DefinitionValueResolver) | Resolves references through a [`BeanFactory`](crate::BeanFactory) |
//!
//! Resolvers must be deterministic within one `construct` call: the matcher
//! may ask for the same descriptor once per candidate constructor.

use anyhow::{bail, Result};
use beanwright_types::{ArgumentDescriptor, Value};

/// Resolves a literal or reference descriptor to its value.
///
/// Literals resolve to [`Value::Str`] holding the raw text; conversion to the
/// parameter type happens afterwards.
pub trait ValueResolver {
    fn resolve(&self, descriptor: &ArgumentDescriptor) -> Result<Value>;
}

impl<R: ValueResolver + ?Sized> ValueResolver for &R {
    fn resolve(&self, descriptor: &ArgumentDescriptor) -> Result<Value> {
        (**self).resolve(descriptor)
    }
}

/// Resolves literals only; every reference fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralValueResolver;

impl ValueResolver for LiteralValueResolver {
    fn resolve(&self, descriptor: &ArgumentDescriptor) -> Result<Value> {
        match descriptor {
            ArgumentDescriptor::Literal(text) => Ok(Value::Str(text.clone())),
            ArgumentDescriptor::Reference(id) => {
                bail!("reference '{}' cannot be resolved without a bean registry", id)
            }
        }
    }
}
