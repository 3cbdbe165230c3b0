//! Shared types for the beanwright workspace.
//!
//! This crate holds the vocabulary every other crate speaks, so the core
//! resolver and the facade crate never depend on each other for plain data:
//!
//! - [`value`]: runtime [`Value`]s and constructed [`Instance`]s
//! - [`param_type`]: constructor parameter types and signature parsing
//! - [`definition`]: declarative [`BeanDefinition`]s and their argument descriptors
//! - [`env_utils`]: environment variable helpers used by configuration

pub mod definition;
pub mod env_utils;
pub mod param_type;
pub mod value;

// Re-export commonly used types at crate root
pub use definition::{ArgumentDescriptor, BeanDefinition, Scope};
pub use param_type::{format_signature, parse_param_type, parse_signature, ParamType};
pub use value::{Instance, Value};
