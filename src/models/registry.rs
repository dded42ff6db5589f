use std::collections::BTreeMap;

use super::entity::EntityKind;

/// Maps exact class names to their constructor tags. Consulted by the
/// dispatcher to validate user-supplied class names and by the storage
/// engine to resolve type tags while rebuilding persisted records.
#[derive(Debug, Clone)]
pub struct ClassRegistry {
    classes: BTreeMap<&'static str, EntityKind>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        let mut classes = BTreeMap::new();
        for kind in EntityKind::ALL {
            classes.insert(kind.name(), kind);
        }
        ClassRegistry { classes }
    }

    /// Exact, case-sensitive lookup.
    pub fn kind_of(&self, name: &str) -> Option<EntityKind> {
        self.classes.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.classes.keys().copied()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        ClassRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_knows_every_variant() {
        let registry = ClassRegistry::new();
        for name in ["BaseModel", "User", "State", "City", "Amenity", "Place", "Review"] {
            assert!(registry.contains(name), "missing {}", name);
        }
        assert_eq!(registry.names().count(), 7);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = ClassRegistry::new();
        assert!(registry.kind_of("user").is_none());
        assert!(registry.kind_of("USER").is_none());
        assert_eq!(registry.kind_of("User"), Some(EntityKind::User));
    }
}
