//! Beanwright
//!
//! Declarative object construction: describe an object as a type name plus
//! ordered literal/reference arguments, and let the resolver pick the first
//! registered constructor those arguments fit.
//!
//! - **Types**: values, parameter types and definitions ([`beanwright_types`])
//! - **Core**: catalog, matcher, resolver and bean factory ([`beanwright_core`])
//!
//! See [`Container`] for the usual entry point.

pub mod container;

pub use container::Container;

pub use beanwright_core::{
    Args, BeanFactory, CandidateAttempt, ConstructionError, ConstructionErrorKind,
    ConstructorInfo, ConstructorResolver, DefinitionSet, DefinitionValueResolver,
    LiteralValueResolver, MatchOutcome, Mismatch, MismatchStage, ResolverConfig,
    SignatureMatcher, SimpleTypeConverter, TypeCatalog, TypeConverter, TypeDescriptor,
    TypeDescriptorBuilder, TypeLoader, ValueResolver,
};
pub use beanwright_types::{
    format_signature, parse_param_type, parse_signature, ArgumentDescriptor, BeanDefinition,
    Instance, ParamType, Scope, Value,
};
