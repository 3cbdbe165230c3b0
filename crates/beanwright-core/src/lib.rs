//! Beanwright Core
//!
//! Constructor selection and invocation for declarative object construction.
//!
//! Given a [`BeanDefinition`](beanwright_types::BeanDefinition) (a type name
//! plus ordered literal/reference arguments), the [`ConstructorResolver`]
//! walks the type's constructors in declaration order, asks the
//! [`SignatureMatcher`] to resolve and convert every argument, and invokes the
//! first candidate that accepts them all.
//!
//! # Core Modules
//!
//! - [`catalog`]: registered-factory table standing in for runtime reflection
//! - [`matcher`]: per-candidate argument resolution and conversion
//! - [`constructor_resolver`]: candidate enumeration and instantiation
//! - [`converter`]: value coercion between literal text and parameter types
//! - [`value_resolver`]: literal/reference resolution seam
//! - [`factory`]: bean registry with singleton caching and cycle detection
//! - [`definitions`]: JSON definition files
//! - [`errors`]: the construction error taxonomy
//!
//! # Example
//!
//! ```
//! use beanwright_core::{BeanFactory, TypeCatalog, TypeDescriptor};
//! use beanwright_types::{BeanDefinition, ParamType};
//!
//! struct Point { x: i32, y: i32 }
//!
//! let mut catalog = TypeCatalog::new();
//! catalog.register(
//!     TypeDescriptor::builder("Point")
//!         .constructor([], |_| Ok(Point { x: 0, y: 0 }))
//!         .constructor([ParamType::Int, ParamType::Int], |args| {
//!             Ok(Point { x: args.int(0)?, y: args.int(1)? })
//!         })
//!         .build(),
//! );
//!
//! let factory = BeanFactory::new(catalog);
//! factory.register_definition(BeanDefinition::new("p", "Point").literal("3").literal("4"));
//! let point = factory.get_typed::<Point>("p")?;
//! assert_eq!((point.x, point.y), (3, 4));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod args;
pub mod catalog;
pub mod config;
pub mod constructor_resolver;
pub mod converter;
pub mod definitions;
pub mod errors;
pub mod factory;
pub mod matcher;
pub mod value_resolver;

pub use args::Args;
pub use catalog::{ConstructorInfo, TypeCatalog, TypeDescriptor, TypeDescriptorBuilder, TypeLoader};
pub use config::ResolverConfig;
pub use constructor_resolver::ConstructorResolver;
pub use converter::{SimpleTypeConverter, TypeConverter};
pub use definitions::DefinitionSet;
pub use errors::{CandidateAttempt, ConstructionError, ConstructionErrorKind};
pub use factory::{BeanFactory, DefinitionValueResolver};
pub use matcher::{MatchOutcome, Mismatch, MismatchStage, SignatureMatcher};
pub use value_resolver::{LiteralValueResolver, ValueResolver};
