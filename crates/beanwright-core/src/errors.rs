//! Error codes and diagnostics for bean construction.
//!
//! # Error Taxonomy
//!
//! | Code | Kind | Meaning |
//! |------|------|---------|
//! | E101 | [`TypeUnresolvable`](ConstructionErrorKind::TypeUnresolvable) | type name cannot be loaded |
//! | E301 | [`NoMatchingConstructor`](ConstructionErrorKind::NoMatchingConstructor) | every candidate rejected |
//! | E401 | [`InstantiationFailed`](ConstructionErrorKind::InstantiationFailed) | chosen constructor failed |
//!
//! Candidate rejections are not errors on their own; they are collected as
//! [`CandidateAttempt`]s and only reported when no candidate matched.

use std::any::Any;
use std::fmt;

use beanwright_types::BeanDefinition;
use serde::{Deserialize, Serialize};

use crate::matcher::Mismatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstructionErrorKind {
    /// E101: Type name not found by the type loader
    #[serde(rename = "E101")]
    TypeUnresolvable,

    /// E301: No constructor accepted the supplied arguments
    #[serde(rename = "E301")]
    NoMatchingConstructor,

    /// E401: The selected constructor failed or panicked
    #[serde(rename = "E401")]
    InstantiationFailed,
}

impl ConstructionErrorKind {
    pub fn numeric_code(&self) -> u16 {
        match self {
            ConstructionErrorKind::TypeUnresolvable => 101,
            ConstructionErrorKind::NoMatchingConstructor => 301,
            ConstructionErrorKind::InstantiationFailed => 401,
        }
    }

    /// Get the string code (e.g., "E101")
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric_code())
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConstructionErrorKind::TypeUnresolvable => "type cannot be resolved",
            ConstructionErrorKind::NoMatchingConstructor => "no matching constructor",
            ConstructionErrorKind::InstantiationFailed => "instantiation failed",
        }
    }
}

impl fmt::Display for ConstructionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_string(), self.description())
    }
}

/// One rejected candidate constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAttempt {
    pub signature: String,
    pub mismatch: Mismatch,
}

impl fmt::Display for CandidateAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.signature, self.mismatch)
    }
}

/// Terminal failure of a single `construct` call.
#[derive(Debug)]
pub struct ConstructionError {
    pub kind: ConstructionErrorKind,
    /// Identifier of the definition being constructed
    pub bean_id: String,
    pub type_name: String,
    /// Signature of the selected constructor (instantiation failures only)
    pub candidate: Option<String>,
    /// Rejected candidates, in enumeration order (no-match failures only)
    pub attempts: Vec<CandidateAttempt>,
    source: Option<anyhow::Error>,
}

impl ConstructionError {
    pub fn type_unresolvable(definition: &BeanDefinition, cause: anyhow::Error) -> Self {
        Self::new(ConstructionErrorKind::TypeUnresolvable, definition, Some(cause))
    }

    pub fn no_matching_constructor(
        definition: &BeanDefinition,
        attempts: Vec<CandidateAttempt>,
    ) -> Self {
        Self {
            attempts,
            ..Self::new(ConstructionErrorKind::NoMatchingConstructor, definition, None)
        }
    }

    pub fn instantiation_failed(
        definition: &BeanDefinition,
        candidate: String,
        cause: anyhow::Error,
    ) -> Self {
        Self {
            candidate: Some(candidate),
            ..Self::new(ConstructionErrorKind::InstantiationFailed, definition, Some(cause))
        }
    }

    fn new(
        kind: ConstructionErrorKind,
        definition: &BeanDefinition,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            kind,
            bean_id: definition.id.clone(),
            type_name: definition.type_name.clone(),
            candidate: None,
            attempts: Vec::new(),
            source,
        }
    }

    pub fn kind(&self) -> ConstructionErrorKind {
        self.kind
    }

    /// The underlying collaborator or constructor failure, if any.
    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.source.as_ref()
    }
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] bean '{}' ({}): ",
            self.kind.code_string(),
            self.bean_id,
            self.type_name
        )?;
        match self.kind {
            ConstructionErrorKind::TypeUnresolvable => write!(f, "cannot resolve type")?,
            ConstructionErrorKind::NoMatchingConstructor => {
                write!(f, "no matching constructor")?;
                if !self.attempts.is_empty() {
                    let tried: Vec<String> = self.attempts.iter().map(|a| a.to_string()).collect();
                    write!(f, "; tried {}", tried.join("; "))?;
                }
            }
            ConstructionErrorKind::InstantiationFailed => {
                write!(f, "instantiation failed")?;
                if let Some(candidate) = &self.candidate {
                    write!(f, " using {}", candidate)?;
                }
            }
        }
        if let Some(source) = &self.source {
            write!(f, ": {:#}", source)?;
        }
        Ok(())
    }
}

/// The cause is rendered by `Display` and reachable through
/// [`ConstructionError::cause`]; it is not chained as `source()`, so `{:#}`
/// renders it once.
impl std::error::Error for ConstructionError {}

/// Text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MismatchStage;
    use anyhow::anyhow;

    fn point() -> BeanDefinition {
        BeanDefinition::new("p", "Point").literal("3")
    }

    #[test]
    fn test_codes() {
        assert_eq!(ConstructionErrorKind::TypeUnresolvable.code_string(), "E101");
        assert_eq!(
            ConstructionErrorKind::NoMatchingConstructor.to_string(),
            "E301: no matching constructor"
        );
        let json = serde_json::to_string(&ConstructionErrorKind::InstantiationFailed).unwrap();
        assert_eq!(json, "\"E401\"");
    }

    #[test]
    fn test_type_unresolvable_display() {
        let err = ConstructionError::type_unresolvable(&point(), anyhow!("type not registered: Point"));
        assert_eq!(
            err.to_string(),
            "[E101] bean 'p' (Point): cannot resolve type: type not registered: Point"
        );
        assert!(err.cause().is_some());
    }

    #[test]
    fn test_alternate_render_shows_cause_once() {
        let err = ConstructionError::instantiation_failed(
            &point(),
            "Point(int)".to_string(),
            anyhow!("negative value -1"),
        );
        let any = anyhow::Error::from(err).context("create bean 'p'");
        let rendered = format!("{:#}", any);
        assert_eq!(rendered.matches("negative value -1").count(), 1, "{}", rendered);
        assert!(rendered.starts_with("create bean 'p': [E401] bean 'p' (Point)"));
    }

    #[test]
    fn test_panic_message() {
        let payload = std::panic::catch_unwind(|| panic!("boom {}", 1)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom 1");
        let payload = std::panic::catch_unwind(|| std::panic::panic_any(7u8)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }

    #[test]
    fn test_no_match_lists_attempts() {
        let err = ConstructionError::no_matching_constructor(
            &point(),
            vec![CandidateAttempt {
                signature: "Point()".to_string(),
                mismatch: Mismatch::arity(0, 1),
            }],
        );
        assert_eq!(err.kind(), ConstructionErrorKind::NoMatchingConstructor);
        assert_eq!(err.attempts[0].mismatch.stage, MismatchStage::Arity);
        assert_eq!(
            err.to_string(),
            "[E301] bean 'p' (Point): no matching constructor; tried Point() [takes 0 argument(s), 1 supplied]"
        );
        assert!(err.cause().is_none());
    }

    #[test]
    fn test_instantiation_failed_keeps_cause() {
        let err = ConstructionError::instantiation_failed(
            &point(),
            "Point(int)".to_string(),
            anyhow!("x must be even"),
        );
        assert_eq!(err.candidate.as_deref(), Some("Point(int)"));
        assert!(err.to_string().ends_with("instantiation failed using Point(int): x must be even"));

        // Converts into anyhow and keeps the typed error reachable.
        let any: anyhow::Error = err.into();
        let back = any.downcast_ref::<ConstructionError>().unwrap();
        assert_eq!(back.kind, ConstructionErrorKind::InstantiationFailed);
    }
}
