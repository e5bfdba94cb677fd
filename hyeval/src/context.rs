//! Variable bindings.
//!
//! A [`Context`] maps identifiers to boolean values. Identifiers must match
//! `^[A-Za-z]+$`; passing anything else is a caller bug and is only checked in debug builds.
//! During an evaluation pass the context is read-only and may be shared by every forked
//! task without synchronization.
use std::collections::HashMap;

/// Return `true` if `name` is a valid identifier (non-empty, ASCII letters only).
#[inline]
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Flat store of variable bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    values: HashMap<String, bool>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Return `true` if `name` is bound.
    pub fn has(&self, name: &str) -> bool {
        debug_assert!(is_valid_identifier(name), "invalid identifier '{name}'");
        self.values.contains_key(name)
    }

    /// Look up `name`, returning `None` when it is not bound.
    pub fn get(&self, name: &str) -> Option<bool> {
        debug_assert!(is_valid_identifier(name), "invalid identifier '{name}'");
        self.values.get(name).copied()
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, value: bool) {
        let name = name.into();
        debug_assert!(is_valid_identifier(&name), "invalid identifier '{name}'");
        self.values.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Context {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        let mut ctx = Context::new();
        for (name, value) in iter {
            ctx.set(name, value);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_valid_identifier("a"));
        assert!(is_valid_identifier("FooBar"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("a1"));
        assert!(!is_valid_identifier("a_b"));
        assert!(!is_valid_identifier("ä"));
    }

    #[test]
    fn set_get_has() {
        let mut ctx = Context::new();
        assert!(!ctx.has("a"));
        assert_eq!(ctx.get("a"), None);

        ctx.set("a", false);
        assert!(ctx.has("a"));
        assert_eq!(ctx.get("a"), Some(false));

        ctx.set("a", true);
        assert_eq!(ctx.get("a"), Some(true));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn collect_from_pairs() {
        let ctx: Context = [("a", true), ("b", false)].into_iter().collect();
        assert_eq!(ctx.get("a"), Some(true));
        assert_eq!(ctx.get("b"), Some(false));
        assert_eq!(ctx.iter().count(), 2);
    }
}
