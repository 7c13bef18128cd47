//! The [`Singleton`] contract and the [`Handle`] type through which instances
//! are observed.
//!
//! A registry never hands out owned copies of an instance. Callers receive a
//! [`Handle`], which dereferences to the shared value and intentionally does
//! not implement `Clone` — the only way to obtain another reference to the
//! instance is to go back through `instance()`, which always resolves to the
//! same object.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::BoxError;

/// A type managed by a singleton registry.
///
/// Implementors provide the constructor the registry runs on first access.
/// The constructor is invoked at most once per successful initialization: if
/// it returns `Err`, the registry stays uninitialized for the type and the
/// next `instance()` call retries.
///
/// # Restrictions
///
/// `construct` runs inside the registry's critical section (the storage lock
/// is held). It must NOT call `instance()` on the same registry, as this
/// will cause a deadlock.
///
/// # Examples
///
/// ```rust
/// use singleton_catalog::{BoxError, Singleton};
///
/// struct AppConfig {
///     verbose: bool,
/// }
///
/// impl Singleton for AppConfig {
///     fn construct() -> Result<Self, BoxError> {
///         Ok(AppConfig { verbose: false })
///     }
/// }
/// ```
pub trait Singleton: Send + Sync + Sized + 'static {
    /// Build the one instance of this type. Called under the registry lock,
    /// at most once per successful initialization.
    fn construct() -> Result<Self, BoxError>;
}

/// A reference to a shared singleton instance.
///
/// `Handle<T>` dereferences to `T`. It deliberately implements neither
/// `Clone` nor any owned-copy accessor: duplication of the instance surface
/// is structurally impossible. Identity can be checked with
/// [`Handle::ptr_eq`].
///
/// With the `serde` feature enabled, a handle serializes as a type-name
/// marker and deserializes by resolving the shared instance through the
/// default registry — deserialization never builds a second instance.
///
/// Duplication is rejected at compile time:
///
/// ```compile_fail
/// use singleton_catalog::{instance, BoxError, Handle, Singleton};
///
/// struct Config;
/// impl Singleton for Config {
///     fn construct() -> Result<Self, BoxError> {
///         Ok(Config)
///     }
/// }
///
/// let handle: Handle<Config> = instance().unwrap();
/// let copy: Handle<Config> = handle.clone(); // no `Clone` impl
/// ```
pub struct Handle<T> {
    inner: Arc<T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(inner: Arc<T>) -> Self {
        Handle { inner }
    }

    /// Returns `true` if both handles refer to the same instance.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use singleton_catalog::{instance, BoxError, Handle, Singleton};
    ///
    /// struct Counter;
    ///
    /// impl Singleton for Counter {
    ///     fn construct() -> Result<Self, BoxError> {
    ///         Ok(Counter)
    ///     }
    /// }
    ///
    /// let a: Handle<Counter> = instance().unwrap();
    /// let b: Handle<Counter> = instance().unwrap();
    /// assert!(Handle::ptr_eq(&a, &b));
    /// ```
    pub fn ptr_eq(this: &Handle<T>, other: &Handle<T>) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }
}

impl<T> Deref for Handle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> AsRef<T> for Handle<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.inner).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

// -------------------------------------------------------------------------------------------------
// Serde support (optional)
// -------------------------------------------------------------------------------------------------

/// A handle serializes as a marker only, never as the instance's state.
/// Deserializing the marker resolves the already-shared instance via the
/// default registry; it cannot be used to smuggle in a second instance.
#[cfg(feature = "serde")]
impl<T> serde::Serialize for Handle<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(std::any::type_name::<T>())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Singleton> serde::Deserialize<'de> for Handle<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let marker = String::deserialize(deserializer)?;
        if marker != std::any::type_name::<T>() {
            return Err(D::Error::custom(crate::SingletonError::IllegalDuplication {
                type_name: std::any::type_name::<T>(),
            }));
        }

        // Resolve through the default registry: the existing instance if one
        // is cached, a single fresh construction otherwise.
        crate::registry::instance::<T>().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_deref_and_as_ref() {
        let handle = Handle::new(Arc::new(41i32));
        assert_eq!(*handle + 1, 42);
        assert_eq!(*handle.as_ref(), 41);
    }

    #[test]
    fn test_handle_identity() {
        let arc = Arc::new("shared".to_string());
        let a = Handle::new(arc.clone());
        let b = Handle::new(arc);
        assert!(Handle::ptr_eq(&a, &b));

        let c = Handle::new(Arc::new("shared".to_string()));
        assert!(!Handle::ptr_eq(&a, &c));
    }

    #[test]
    fn test_handle_debug_and_display() {
        let handle = Handle::new(Arc::new(7u8));
        assert_eq!(format!("{:?}", handle), "Handle(7)");
        assert_eq!(handle.to_string(), "7");
    }
}
