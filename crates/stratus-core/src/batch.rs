//! Sequential batch executor shared by every action.
//!
//! An action supplies an [`ActionPolicy`] describing how to validate and
//! provision one resource spec; [`BatchExecutor`] applies it to a whole batch.
//!
//! Execution is fail-fast: the first item whose provisioning fails aborts the
//! batch and only the error is returned. Items provisioned before the failure
//! are not rolled back and are not reported; reconciling them is left to the
//! caller.

use crate::error::{BoxError, PluginError, ValidationError};

/// Per-action behaviour plugged into the batch loop.
pub trait ActionPolicy: Send + Sync {
    /// One requested resource.
    type Spec;
    /// Outcome of provisioning one resource.
    type Outcome;

    /// Action name used in messages and logs.
    fn action(&self) -> &str;

    /// Correlation identifier echoed in results.
    fn guid<'a>(&self, spec: &'a Self::Spec) -> &'a str;

    /// Identifier of the resource being acted on, for diagnostics.
    fn resource_id(&self, spec: &Self::Spec) -> String;

    /// Check the business rules for one spec.
    fn validate(&self, spec: &Self::Spec) -> Result<(), ValidationError>;

    /// Provision one spec against the backend.
    fn provision(&self, spec: &Self::Spec) -> Result<Self::Outcome, BoxError>;
}

/// Runs an [`ActionPolicy`] over an ordered batch.
#[derive(Debug, Clone)]
pub struct BatchExecutor<P> {
    policy: P,
}

impl<P: ActionPolicy> BatchExecutor<P> {
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Validate every spec in order, stopping at the first violation.
    pub fn check(&self, specs: &[P::Spec]) -> Result<(), PluginError> {
        for (index, spec) in specs.iter().enumerate() {
            self.policy
                .validate(spec)
                .map_err(|e| e.at(index, self.policy.guid(spec)))?;
        }
        Ok(())
    }

    /// Provision every spec in order.
    ///
    /// The whole batch is validated before the first provisioning call, so a
    /// rule violation is always reported as [`PluginError::Validation`].
    /// Returns one outcome per spec, index-aligned with `specs`, or the error
    /// of the first failing spec.
    pub fn run(&self, specs: &[P::Spec]) -> Result<Vec<P::Outcome>, PluginError> {
        self.check(specs)?;

        let action = self.policy.action();
        let mut outcomes = Vec::with_capacity(specs.len());

        for (index, spec) in specs.iter().enumerate() {
            let guid = self.policy.guid(spec);
            tracing::debug!(action = %action, index, guid = %guid, "provisioning resource");

            match self.policy.provision(spec) {
                Ok(outcome) => outcomes.push(outcome),
                Err(source) => {
                    let resource = self.policy.resource_id(spec);
                    tracing::error!(
                        action = %action,
                        index,
                        guid = %guid,
                        resource = %resource,
                        completed = outcomes.len(),
                        error = %source,
                        "provisioning failed, aborting batch"
                    );
                    return Err(PluginError::provisioning(resource, guid, source));
                }
            }
        }

        tracing::info!(action = %action, count = outcomes.len(), "batch completed");
        Ok(outcomes)
    }
}
