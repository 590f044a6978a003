//! Uniqueness registry for error codes within one processing round.
//!
//! An explicit object owned by the engine, not ambient static state. The
//! registry lives for exactly one round: it is cleared when the round
//! starts and consulted while the same round's declarations are processed.
//! A host running concurrent rounds must treat clear-then-populate as one
//! atomic reset boundary.

use std::collections::HashMap;

use crate::decl::ConstId;

/// Outcome of registering one code string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryOutcome {
    /// First registration, or re-registration by the identical constant
    Unique,
    /// Already registered by a different constant; carries the first definer
    Duplicate { first: ConstId },
}

/// Mapping from canonical code string to the constant that first defined it.
///
/// First writer wins: a colliding registration is reported and the stored
/// entry is never overwritten, so every later collision still references
/// the original definer.
#[derive(Debug, Default)]
pub struct CodeRegistry {
    entries: HashMap<String, ConstId>,
}

impl CodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all entries. Called at the start of each processing round.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Registers a code string for the given constant, or reports the
    /// collision.
    ///
    /// Identity is the constant name plus its enclosing type name: the same
    /// constant seen twice in one round is not a collision.
    pub fn check_and_register(&mut self, code: &str, definer: &ConstId) -> RegistryOutcome {
        match self.entries.get(code) {
            None => {
                self.entries.insert(code.to_string(), definer.clone());
                RegistryOutcome::Unique
            }
            Some(existing) if existing == definer => RegistryOutcome::Unique,
            Some(existing) => RegistryOutcome::Duplicate {
                first: existing.clone(),
            },
        }
    }

    /// The constant that first defined a code, if any.
    pub fn definition(&self, code: &str) -> Option<&ConstId> {
        self.entries.get(code)
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_registration_is_unique() {
        let mut reg = CodeRegistry::new();
        let a = ConstId::new("ErrorCode", "A");
        assert_eq!(reg.check_and_register("11220001", &a), RegistryOutcome::Unique);
        assert_eq!(reg.definition("11220001"), Some(&a));
    }

    #[test]
    fn test_duplicate_references_first_definer() {
        let mut reg = CodeRegistry::new();
        let a = ConstId::new("ErrorCode", "A");
        let b = ConstId::new("ErrorCode", "B");
        let c = ConstId::new("OtherCode", "C");

        assert_eq!(reg.check_and_register("11220001", &a), RegistryOutcome::Unique);
        assert_eq!(
            reg.check_and_register("11220001", &b),
            RegistryOutcome::Duplicate { first: a.clone() }
        );
        // A third registration still references the original definer, not B.
        assert_eq!(
            reg.check_and_register("11220001", &c),
            RegistryOutcome::Duplicate { first: a.clone() }
        );
        assert_eq!(reg.definition("11220001"), Some(&a));
    }

    #[test]
    fn test_same_constant_reregistration_is_unique() {
        let mut reg = CodeRegistry::new();
        let a = ConstId::new("ErrorCode", "A");
        assert_eq!(reg.check_and_register("11220001", &a), RegistryOutcome::Unique);
        assert_eq!(reg.check_and_register("11220001", &a), RegistryOutcome::Unique);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_same_name_different_type_collides() {
        let mut reg = CodeRegistry::new();
        let a = ConstId::new("ErrorCode", "A");
        let other = ConstId::new("OtherCode", "A");
        assert_eq!(reg.check_and_register("11220001", &a), RegistryOutcome::Unique);
        assert_eq!(
            reg.check_and_register("11220001", &other),
            RegistryOutcome::Duplicate { first: a }
        );
    }

    #[test]
    fn test_clear_allows_reregistration() {
        let mut reg = CodeRegistry::new();
        let a = ConstId::new("ErrorCode", "A");
        let b = ConstId::new("ErrorCode", "B");
        reg.check_and_register("11220001", &a);
        reg.clear();
        assert!(reg.is_empty());
        // New round: the code is registrable again, by anyone.
        assert_eq!(reg.check_and_register("11220001", &b), RegistryOutcome::Unique);
    }

    #[test]
    fn test_negative_codes_collide_on_rendering() {
        let mut reg = CodeRegistry::new();
        let a = ConstId::new("ErrorCode", "A");
        let b = ConstId::new("ErrorCode", "B");
        reg.check_and_register("-42", &a);
        assert_eq!(
            reg.check_and_register("-42", &b),
            RegistryOutcome::Duplicate { first: a }
        );
    }
}
