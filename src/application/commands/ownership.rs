// src/application/commands/ownership.rs
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::article::specifications::OwnershipSpecification,
};

pub(crate) fn ensure_owner(
    spec: &impl OwnershipSpecification,
    message: &'static str,
) -> ApplicationResult<()> {
    if spec.is_satisfied() {
        Ok(())
    } else {
        Err(ApplicationError::permission_denied(message))
    }
}
