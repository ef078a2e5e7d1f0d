//! Values captured for comparison.

use std::any::{Any, TypeId};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A value captured at comparison time: its rendered form plus enough
/// metadata to explain an inequality whose string forms coincide.
///
/// Two snapshots compare equal when their type names, hashes and rendered
/// forms all match; identity is deliberately excluded so that distinct
/// but equal values compare equal.
#[derive(Clone, Debug)]
pub struct ValueSnapshot {
    rendered: String,
    type_name: &'static str,
    hash: Option<u64>,
    identity: usize,
    is_bool: bool,
}

impl ValueSnapshot {
    /// Captures a value that cannot be hashed.
    pub fn new<T>(value: &T) -> Self
    where
        T: std::fmt::Debug + Any,
    {
        Self {
            rendered: format!("{value:?}"),
            type_name: std::any::type_name::<T>(),
            hash: None,
            identity: value as *const T as usize,
            is_bool: TypeId::of::<T>() == TypeId::of::<bool>(),
        }
    }

    /// Captures a hashable value, enabling the hash-based fallback when
    /// rendered forms coincide.
    pub fn hashed<T>(value: &T) -> Self
    where
        T: std::fmt::Debug + Any + Hash,
    {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        Self {
            hash: Some(hasher.finish()),
            ..Self::new(value)
        }
    }

    /// Captures a string, quoting it without escaping its contents so
    /// multi-line values still diff line by line.
    pub fn string(value: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        Self {
            rendered: format!("\"{value}\""),
            type_name: std::any::type_name::<&str>(),
            hash: Some(hasher.finish()),
            identity: value.as_ptr() as usize,
            is_bool: false,
        }
    }

    /// The value's rendered form.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn hash(&self) -> Option<u64> {
        self.hash
    }

    /// Address-based identity, the last-resort discriminator for values
    /// that agree on everything else.
    pub fn identity(&self) -> usize {
        self.identity
    }

    /// Whether the captured value was a boolean.
    pub fn is_bool(&self) -> bool {
        self.is_bool
    }
}

impl PartialEq for ValueSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.hash == other.hash
            && self.rendered == other.rendered
    }
}

impl Eq for ValueSnapshot {}
