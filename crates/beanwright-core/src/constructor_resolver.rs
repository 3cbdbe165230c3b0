//! Constructor selection and invocation.
//!
//! The resolver walks a type's constructors in declaration order and takes
//! the first one whose arity matches and whose every argument resolves and
//! converts. There is no scoring: if both `Foo(int)` and `Foo(string)` accept
//! `"5"`, whichever was declared first wins, and nothing reports the
//! ambiguity beyond a trace event.

use std::panic::{self, AssertUnwindSafe};

use anyhow::anyhow;
use beanwright_types::{BeanDefinition, Instance};
use tracing::{debug, trace};

use crate::args::Args;
use crate::catalog::{ConstructorInfo, TypeLoader};
use crate::config::ResolverConfig;
use crate::converter::TypeConverter;
use crate::errors::{panic_message, CandidateAttempt, ConstructionError};
use crate::matcher::{MatchOutcome, Mismatch, SignatureMatcher};
use crate::value_resolver::ValueResolver;

/// Builds one object from its definition using the supplied collaborators.
///
/// Holds only shared references, so any number of resolvers may run at once
/// over the same loader, value resolver and converter.
pub struct ConstructorResolver<'a> {
    loader: &'a dyn TypeLoader,
    values: &'a dyn ValueResolver,
    converter: &'a dyn TypeConverter,
    config: ResolverConfig,
}

impl<'a> ConstructorResolver<'a> {
    pub fn new(
        loader: &'a dyn TypeLoader,
        values: &'a dyn ValueResolver,
        converter: &'a dyn TypeConverter,
    ) -> Self {
        Self {
            loader,
            values,
            converter,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Construct the object described by `definition`.
    pub fn construct(&self, definition: &BeanDefinition) -> Result<Instance, ConstructionError> {
        let descriptor = self
            .loader
            .load(&definition.type_name)
            .map_err(|e| ConstructionError::type_unresolvable(definition, e))?;

        let arguments = &definition.constructor_args;
        let mut matcher = SignatureMatcher::new(self.values, self.converter);
        if self.config.memoize_resolved_values {
            matcher = matcher.memoized();
        }

        let candidates = descriptor.constructors();
        let mut attempts = Vec::new();
        let mut selected: Option<(&ConstructorInfo, Args)> = None;

        for (index, candidate) in candidates.iter().enumerate() {
            if candidate.arity() != arguments.len() {
                attempts.push(CandidateAttempt {
                    signature: candidate.signature(),
                    mismatch: Mismatch::arity(candidate.arity(), arguments.len()),
                });
                continue;
            }

            match matcher.match_signature(candidate.params(), arguments) {
                MatchOutcome::Matched(args) => {
                    let unexamined = candidates[index + 1..]
                        .iter()
                        .filter(|c| c.arity() == arguments.len())
                        .count();
                    if unexamined > 0 {
                        trace!(
                            bean = %definition.id,
                            candidate = %candidate.signature(),
                            unexamined,
                            "first match wins; later candidates with the same arity not examined"
                        );
                    }
                    selected = Some((candidate, args));
                    break;
                }
                MatchOutcome::Rejected(mismatch) => {
                    debug!(
                        bean = %definition.id,
                        candidate = %candidate.signature(),
                        reason = %mismatch,
                        "constructor candidate rejected"
                    );
                    attempts.push(CandidateAttempt {
                        signature: candidate.signature(),
                        mismatch,
                    });
                }
            }
        }

        let Some((constructor, args)) = selected else {
            return Err(ConstructionError::no_matching_constructor(definition, attempts));
        };

        debug!(
            bean = %definition.id,
            constructor = %constructor.signature(),
            "constructor selected"
        );
        invoke(constructor, &args).map_err(|e| {
            ConstructionError::instantiation_failed(definition, constructor.signature(), e)
        })
    }
}

/// Run the factory, turning a panic in the constructor body into an error.
fn invoke(constructor: &ConstructorInfo, args: &Args) -> anyhow::Result<Instance> {
    match panic::catch_unwind(AssertUnwindSafe(|| constructor.invoke(args))) {
        Ok(result) => result,
        Err(payload) => Err(anyhow!(
            "constructor panicked: {}",
            panic_message(payload.as_ref())
        )),
    }
}
