//! Bean definition files.
//!
//! Definitions are stored as JSON:
//!
//! ```json
//! {
//!   "beans": [
//!     {"id": "owner", "type": "User", "args": [{"literal": "ada"}]},
//!     {"id": "widget", "type": "Widget", "args": [{"literal": "gear"}, {"ref": "owner"}]}
//!   ]
//! }
//! ```
//!
//! Loading validates the set as a whole (unique, non-empty ids and type
//! names); whether references point anywhere is only known at construction
//! time, so it is not checked here.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use beanwright_types::BeanDefinition;
use serde::{Deserialize, Serialize};

/// An ordered collection of bean definitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSet {
    #[serde(default)]
    pub beans: Vec<BeanDefinition>,
}

impl DefinitionSet {
    pub fn new(beans: Vec<BeanDefinition>) -> Result<Self> {
        let set = Self { beans };
        set.validate()?;
        Ok(set)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let set: Self = serde_json::from_str(json).context("parse bean definitions")?;
        set.validate()?;
        Ok(set)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("load {}", path.display()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize bean definitions")
    }

    pub fn len(&self) -> usize {
        self.beans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BeanDefinition> {
        self.beans.iter()
    }

    pub fn get(&self, id: &str) -> Option<&BeanDefinition> {
        self.beans.iter().find(|b| b.id == id)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (index, bean) in self.beans.iter().enumerate() {
            if bean.id.trim().is_empty() {
                bail!("bean #{} has an empty id", index);
            }
            if bean.type_name.trim().is_empty() {
                bail!("bean '{}' has an empty type", bean.id);
            }
            if !seen.insert(bean.id.as_str()) {
                bail!("duplicate bean id '{}'", bean.id);
            }
        }
        Ok(())
    }
}

impl IntoIterator for DefinitionSet {
    type Item = BeanDefinition;
    type IntoIter = std::vec::IntoIter<BeanDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.beans.into_iter()
    }
}

impl<'a> IntoIterator for &'a DefinitionSet {
    type Item = &'a BeanDefinition;
    type IntoIter = std::slice::Iter<'a, BeanDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.beans.iter()
    }
}
