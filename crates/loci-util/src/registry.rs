//! Global string-ID registry.
//!
//! A process-wide bidirectional mapping between canonical identifier
//! strings and small integer IDs. The table is populated once during
//! startup - [`register_well_known_strings`] installs the canonical
//! spellings, and embedding applications may register their own before any
//! parser runs - and is read without blocking thereafter.
//!
//! Double registration of either a string or an ID is a configuration
//! error; the write API rejects it rather than silently overwriting.

use std::sync::{LazyLock, Once};

use ahash::RandomState;
use dashmap::DashMap;

use crate::{strings, Result, ScriptError};

/// Small integer handle for a registered string. 0 is reserved as the
/// "none" sentinel ([`strings::ID_NONE`]).
pub type GlobalStringId = u32;

/// The registry's two lookup directions.
///
/// Backed by [`DashMap`] so post-startup reads are lock-free; writes only
/// happen during startup registration.
pub struct StringRegistry {
    str_to_id: DashMap<String, GlobalStringId, RandomState>,
    id_to_str: DashMap<GlobalStringId, String, RandomState>,
}

impl StringRegistry {
    fn new() -> Self {
        Self {
            str_to_id: DashMap::with_capacity_and_hasher(64, RandomState::new()),
            id_to_str: DashMap::with_capacity_and_hasher(64, RandomState::new()),
        }
    }

    /// Register `string` under `id`.
    ///
    /// Fails with [`ScriptError::Config`] if either side is already taken.
    pub fn register(&self, string: &str, id: GlobalStringId) -> Result<()> {
        if self.str_to_id.contains_key(string) {
            return Err(ScriptError::Config {
                message: format!("string \"{string}\" has already been registered"),
            });
        }
        if self.id_to_str.contains_key(&id) {
            return Err(ScriptError::Config {
                message: format!("global string id {id} has already been registered"),
            });
        }

        self.str_to_id.insert(string.to_string(), id);
        self.id_to_str.insert(id, string.to_string());
        Ok(())
    }

    /// The ID registered for `string`, if any.
    #[inline]
    pub fn id_for_string(&self, string: &str) -> Option<GlobalStringId> {
        self.str_to_id.get(string).map(|entry| *entry.value())
    }

    /// The string registered under `id`, if any.
    #[inline]
    pub fn string_for_id(&self, id: GlobalStringId) -> Option<String> {
        self.id_to_str.get(&id).map(|entry| entry.value().clone())
    }
}

/// The process-wide registry instance.
pub static STRING_REGISTRY: LazyLock<StringRegistry> = LazyLock::new(StringRegistry::new);

/// Install the canonical well-known spellings with their stable IDs.
///
/// Idempotent: later calls are no-ops, so every entry point that needs the
/// registry may call this without coordinating.
pub fn register_well_known_strings() {
    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        for &(string, id) in strings::WELL_KNOWN {
            STRING_REGISTRY
                .register(string, id)
                .expect("well-known string table contains no duplicates");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_round_trip() {
        register_well_known_strings();
        register_well_known_strings(); // idempotent

        assert_eq!(
            STRING_REGISTRY.id_for_string(strings::STR_FITNESS),
            Some(strings::ID_FITNESS)
        );
        assert_eq!(
            STRING_REGISTRY.string_for_id(strings::ID_SIM).as_deref(),
            Some(strings::STR_SIM)
        );
    }

    #[test]
    fn test_unregistered_lookups() {
        assert_eq!(STRING_REGISTRY.id_for_string("noSuchString"), None);
        assert_eq!(STRING_REGISTRY.string_for_id(u32::MAX), None);
    }

    #[test]
    fn test_double_registration_is_config_error() {
        STRING_REGISTRY
            .register("testOnlyString", 40_001)
            .expect("first registration succeeds");

        let err = STRING_REGISTRY.register("testOnlyString", 40_002);
        assert!(matches!(err, Err(ScriptError::Config { .. })));

        let err = STRING_REGISTRY.register("testOnlyOtherString", 40_001);
        assert!(matches!(err, Err(ScriptError::Config { .. })));
    }
}
