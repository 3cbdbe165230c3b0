//! Signature matching: can this candidate constructor take these arguments?
//!
//! For each position, in order, the matcher resolves the descriptor and then
//! converts the result to the parameter type. The first failure rejects the
//! whole candidate and everything converted so far is dropped. Rejection is
//! an ordinary [`MatchOutcome`], never an error, because failing to match one
//! overload is the normal way the resolver moves on to the next. A panic in
//! the value resolver or type converter is caught and rejects the candidate
//! like any other failure.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};

use anyhow::anyhow;
use beanwright_types::{ArgumentDescriptor, ParamType, Value};
use serde::{Deserialize, Serialize};

use crate::args::Args;
use crate::converter::TypeConverter;
use crate::errors::panic_message;
use crate::value_resolver::ValueResolver;

/// Where a candidate stopped matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchStage {
    /// Parameter count differs from argument count
    Arity,
    /// The argument's value could not be resolved
    Resolution,
    /// The resolved value could not be converted to the parameter type
    Conversion,
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub stage: MismatchStage,
    /// Argument position, when the failure is tied to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub message: String,
}

impl Mismatch {
    pub fn arity(expected: usize, supplied: usize) -> Self {
        Self {
            stage: MismatchStage::Arity,
            position: None,
            message: format!("takes {} argument(s), {} supplied", expected, supplied),
        }
    }

    fn at(stage: MismatchStage, position: usize, message: String) -> Self {
        Self {
            stage,
            position: Some(position),
            message,
        }
    }
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.stage, self.position) {
            (MismatchStage::Arity, _) | (_, None) => write!(f, "{}", self.message),
            (MismatchStage::Resolution, Some(i)) => {
                write!(f, "argument {} unresolvable: {}", i, self.message)
            }
            (MismatchStage::Conversion, Some(i)) => {
                write!(f, "argument {} not convertible: {}", i, self.message)
            }
        }
    }
}

#[derive(Debug)]
pub enum MatchOutcome {
    Matched(Args),
    Rejected(Mismatch),
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

/// A resolution result remembered for one argument position.
struct CachedResolution {
    descriptor: ArgumentDescriptor,
    result: Result<Value, String>,
}

/// Matches argument descriptors against candidate parameter lists.
///
/// A matcher lives for a single `construct` call. With memoization enabled it
/// resolves each argument position at most once across all candidates, so a
/// reference is not re-resolved (and its referent not re-requested) per
/// candidate. Cached entries are keyed by position and checked against the
/// descriptor, so a different argument list never reads a stale value.
pub struct SignatureMatcher<'a> {
    resolver: &'a dyn ValueResolver,
    converter: &'a dyn TypeConverter,
    cache: Option<RefCell<Vec<Option<CachedResolution>>>>,
}

impl<'a> SignatureMatcher<'a> {
    pub fn new(resolver: &'a dyn ValueResolver, converter: &'a dyn TypeConverter) -> Self {
        Self {
            resolver,
            converter,
            cache: None,
        }
    }

    /// Remember resolved values per argument position for this matcher's lifetime.
    pub fn memoized(mut self) -> Self {
        self.cache = Some(RefCell::new(Vec::new()));
        self
    }

    pub fn match_signature(
        &self,
        params: &[ParamType],
        descriptors: &[ArgumentDescriptor],
    ) -> MatchOutcome {
        if params.len() != descriptors.len() {
            return MatchOutcome::Rejected(Mismatch::arity(params.len(), descriptors.len()));
        }

        let mut converted = Vec::with_capacity(params.len());
        for (position, (param, descriptor)) in params.iter().zip(descriptors).enumerate() {
            let resolved = panic::catch_unwind(AssertUnwindSafe(|| self.resolve(position, descriptor)))
                .unwrap_or_else(|payload| {
                    Err(format!("value resolver panicked: {}", panic_message(payload.as_ref())))
                });
            let resolved = match resolved {
                Ok(value) => value,
                Err(message) => {
                    return MatchOutcome::Rejected(Mismatch::at(
                        MismatchStage::Resolution,
                        position,
                        message,
                    ))
                }
            };

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.converter.convert(resolved, param)))
                .unwrap_or_else(|payload| {
                    Err(anyhow!("type converter panicked: {}", panic_message(payload.as_ref())))
                });
            match outcome {
                Ok(value) => converted.push(value),
                Err(e) => {
                    return MatchOutcome::Rejected(Mismatch::at(
                        MismatchStage::Conversion,
                        position,
                        format!("{:#}", e),
                    ))
                }
            }
        }

        MatchOutcome::Matched(Args::new(converted))
    }

    fn resolve(&self, position: usize, descriptor: &ArgumentDescriptor) -> Result<Value, String> {
        let Some(cache) = &self.cache else {
            return self.resolver.resolve(descriptor).map_err(|e| format!("{:#}", e));
        };

        if let Some(Some(hit)) = cache.borrow().get(position) {
            if hit.descriptor == *descriptor {
                return hit.result.clone();
            }
        }

        // Resolve outside the borrow: references may re-enter resolution.
        let result = self.resolver.resolve(descriptor).map_err(|e| format!("{:#}", e));
        let mut slots = cache.borrow_mut();
        if slots.len() <= position {
            slots.resize_with(position + 1, || None);
        }
        slots[position] = Some(CachedResolution {
            descriptor: descriptor.clone(),
            result: result.clone(),
        });
        result
    }
}
