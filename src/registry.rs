//! The default process-wide registry.
//!
//! This module provides the crate-level free functions backed by one shared
//! pair of statics. Every call site in the process that resolves a type `T`
//! through [`instance`] observes the same object, constructed lazily on the
//! first call and cached for the lifetime of the process.
//!
//! For isolated registries (own storage, own tracing), use the
//! [`define_registry!`](crate::define_registry) macro instead.
//!
//! # Examples
//!
//! ```
//! use singleton_catalog::{instance, BoxError, Handle, Singleton};
//!
//! struct Clock {
//!     started_at: std::time::Instant,
//! }
//!
//! impl Singleton for Clock {
//!     fn construct() -> Result<Self, BoxError> {
//!         Ok(Clock { started_at: std::time::Instant::now() })
//!     }
//! }
//!
//! let a: Handle<Clock> = instance().unwrap();
//! let b: Handle<Clock> = instance().unwrap();
//! assert!(Handle::ptr_eq(&a, &b));
//! ```

use std::sync::{LazyLock, Mutex};

use crate::registry_trait::{SingletonRegistry, Storage, TraceCallback};
use crate::{Handle, RegistryEvent, Singleton, SingletonError};

/// Backing storage of the default registry.
///
/// This is a `LazyLock` ensuring thread-safe lazy initialization of the
/// underlying `Mutex<HashMap>`. The map holds `TypeId -> Arc<dyn Any>` so a
/// single registry can cache instances of arbitrary types. It is never
/// exposed directly; all access goes through the `instance()` contract.
static GLOBAL_STORAGE: Storage = LazyLock::new(|| Mutex::new(std::collections::HashMap::new()));

/// Holds an optional user-defined tracing callback for the default registry.
static GLOBAL_TRACE: TraceCallback = LazyLock::new(|| Mutex::new(None));

/// Zero-sized type binding the trait's default implementations to the
/// default registry's statics.
struct Global;

impl SingletonRegistry for Global {
    fn storage() -> &'static Storage {
        &GLOBAL_STORAGE
    }

    fn trace() -> &'static TraceCallback {
        &GLOBAL_TRACE
    }
}

const GLOBAL: Global = Global;

/// Resolve the shared instance of `T` from the default registry,
/// constructing it on the first call.
///
/// The returned [`Handle`] always refers to the identical object, from any
/// thread, before or after first construction. Concurrent first callers are
/// serialized by the registry lock: exactly one construction occurs and
/// nobody observes a partially built instance.
///
/// # Errors
///
/// - [`SingletonError::Construction`] if `T::construct()` failed; the type
///   stays uninitialized and the next call retries
/// - [`SingletonError::TypeMismatch`] if the cached value cannot be
///   downcast to `T` (extremely rare)
///
/// # Examples
///
/// ```
/// use singleton_catalog::{instance, BoxError, Singleton};
///
/// struct Greeting(String);
///
/// impl Singleton for Greeting {
///     fn construct() -> Result<Self, BoxError> {
///         Ok(Greeting("hello".to_string()))
///     }
/// }
///
/// let greeting = instance::<Greeting>().unwrap();
/// assert_eq!(greeting.0, "hello");
/// ```
pub fn instance<T: Singleton>() -> Result<Handle<T>, SingletonError> {
    GLOBAL.instance()
}

/// Check whether `T` has been constructed in the default registry.
///
/// Never triggers construction: `Ok(false)` means the type is still
/// uninitialized.
///
/// # Errors
///
/// Returns [`SingletonError::RegistryLock`] if the storage lock is poisoned.
///
/// # Examples
///
/// ```
/// use singleton_catalog::{initialized, instance, BoxError, Singleton};
///
/// struct Sessions(Vec<u64>);
///
/// impl Singleton for Sessions {
///     fn construct() -> Result<Self, BoxError> {
///         Ok(Sessions(Vec::new()))
///     }
/// }
///
/// assert!(!initialized::<Sessions>().unwrap());
/// instance::<Sessions>().unwrap();
/// assert!(initialized::<Sessions>().unwrap());
/// ```
pub fn initialized<T: Singleton>() -> Result<bool, SingletonError> {
    GLOBAL.initialized::<T>()
}

/// Sets a tracing callback that will be invoked on every default-registry
/// interaction.
///
/// Call [`clear_trace_callback`] to disable tracing again. The callback must
/// not call back into the default registry (the trace lock is held while it
/// runs).
///
/// # Example
/// ```rust
/// use singleton_catalog::set_trace_callback;
///
/// set_trace_callback(|event| println!("[registry-trace] {:?}", event));
/// # singleton_catalog::clear_trace_callback();
/// ```
pub fn set_trace_callback(callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
    GLOBAL.set_trace_callback(callback);
}

/// Clears the tracing callback (disables default-registry tracing).
pub fn clear_trace_callback() {
    GLOBAL.clear_trace_callback();
}

/// Drops all cached instances of the default registry. Test-only escape
/// hatch; the documented instance lifecycle ends at process exit.
#[doc(hidden)]
pub fn clear() {
    GLOBAL.clear();
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
