//! Converted constructor arguments handed to a factory.

use std::any::Any;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use beanwright_types::{Instance, Value};

/// Positional arguments that already match a constructor's parameter types.
///
/// Accessors fail instead of panicking so a factory can report a mismatch
/// through its own `Result`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Value>);

impl Args {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.0
    }

    pub fn bool(&self, index: usize) -> Result<bool> {
        match self.value(index)? {
            Value::Bool(b) => Ok(*b),
            other => Err(unexpected(index, other, "bool")),
        }
    }

    pub fn int(&self, index: usize) -> Result<i32> {
        match self.value(index)? {
            Value::Int(n) => Ok(*n),
            other => Err(unexpected(index, other, "int")),
        }
    }

    pub fn long(&self, index: usize) -> Result<i64> {
        match self.value(index)? {
            Value::Long(n) => Ok(*n),
            other => Err(unexpected(index, other, "long")),
        }
    }

    pub fn double(&self, index: usize) -> Result<f64> {
        match self.value(index)? {
            Value::Double(d) => Ok(*d),
            other => Err(unexpected(index, other, "double")),
        }
    }

    pub fn str(&self, index: usize) -> Result<&str> {
        match self.value(index)? {
            Value::Str(s) => Ok(s),
            other => Err(unexpected(index, other, "string")),
        }
    }

    pub fn instance(&self, index: usize) -> Result<&Instance> {
        match self.value(index)? {
            Value::Object(instance) => Ok(instance),
            other => Err(unexpected(index, other, "object")),
        }
    }

    /// Shared handle to the concrete object at `index`.
    pub fn object<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
        let instance = self.instance(index)?;
        instance.downcast::<T>().ok_or_else(|| {
            anyhow!(
                "argument {} is a {} which is not a {}",
                index,
                instance.type_name(),
                std::any::type_name::<T>()
            )
        })
    }

    fn value(&self, index: usize) -> Result<&Value> {
        self.0
            .get(index)
            .ok_or_else(|| anyhow!("argument {} out of range ({} supplied)", index, self.0.len()))
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

fn unexpected(index: usize, value: &Value, expected: &str) -> anyhow::Error {
    anyhow!("argument {} is {}, expected {}", index, value.describe(), expected)
}
