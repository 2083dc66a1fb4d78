//! Built-in single-tile rules.

mod cable_node;
mod pipe_vent;

pub use cable_node::DuplicateCenterCable;
pub use pipe_vent::PipeVentCollision;

use crate::error::Result;

use super::category::{Categories, CABLE, CABLE_EXEMPT, PIPE, VENT_OR_SCRUBBER};
use super::RuleRegistry;

/// Register the built-in rules, in their canonical order.
pub fn register_builtin(registry: &mut RuleRegistry, categories: &Categories) -> Result<()> {
    registry.register(PipeVentCollision::new(
        categories.require(PIPE)?.clone(),
        categories.require(VENT_OR_SCRUBBER)?.clone(),
    ))?;
    registry.register(DuplicateCenterCable::new(
        categories.require(CABLE)?.clone(),
        categories.require(CABLE_EXEMPT)?.clone(),
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let mut registry = RuleRegistry::new();
        register_builtin(&mut registry, &Categories::default()).unwrap();
        assert_eq!(
            registry.ids().collect::<Vec<_>>(),
            vec![PipeVentCollision::ID, DuplicateCenterCable::ID]
        );
    }

    #[test]
    fn test_missing_category() {
        let mut registry = RuleRegistry::new();
        let err = register_builtin(&mut registry, &Categories::empty()).unwrap_err();
        assert!(err.to_string().contains("category 'pipe'"));
    }
}
