//! Declarative bean definitions.
//!
//! A [`BeanDefinition`] names the type to construct and lists one
//! [`ArgumentDescriptor`] per constructor parameter, in parameter order.
//! The JSON form is:
//!
//! ```json
//! {"id": "widget", "type": "Widget", "scope": "prototype",
//!  "args": [{"literal": "gear"}, {"ref": "owner"}]}
//! ```

use serde::{Deserialize, Serialize};

/// Source of one positional constructor argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgumentDescriptor {
    /// Textual value, converted to the parameter type on use
    #[serde(rename = "literal")]
    Literal(String),
    /// Identifier of another managed bean
    #[serde(rename = "ref")]
    Reference(String),
}

impl ArgumentDescriptor {
    pub fn literal(text: impl Into<String>) -> Self {
        ArgumentDescriptor::Literal(text.into())
    }

    pub fn reference(id: impl Into<String>) -> Self {
        ArgumentDescriptor::Reference(id.into())
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, ArgumentDescriptor::Reference(_))
    }
}

/// Lifecycle of a registered bean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Constructed once, then shared
    #[default]
    Singleton,
    /// Constructed on every request
    Prototype,
}

/// What to construct: a type plus its ordered constructor arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default, rename = "args")]
    pub constructor_args: Vec<ArgumentDescriptor>,
}

impl BeanDefinition {
    pub fn new(id: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            scope: Scope::default(),
            constructor_args: Vec::new(),
        }
    }

    /// Append a literal argument.
    pub fn literal(mut self, text: impl Into<String>) -> Self {
        self.constructor_args.push(ArgumentDescriptor::literal(text));
        self
    }

    /// Append a reference argument.
    pub fn reference(mut self, id: impl Into<String>) -> Self {
        self.constructor_args.push(ArgumentDescriptor::reference(id));
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn argument_count(&self) -> usize {
        self.constructor_args.len()
    }

    pub fn is_singleton(&self) -> bool {
        self.scope == Scope::Singleton
    }
}
