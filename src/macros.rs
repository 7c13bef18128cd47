//! Macros for creating isolated singleton registries.
//!
//! This module provides a simple macro-based approach to create type-safe,
//! thread-safe singleton registries with zero external dependencies.

/// Creates a complete, isolated singleton registry with a single macro
/// invocation.
///
/// The macro generates a module containing:
/// - Storage static (hidden)
/// - Trace callback static (hidden)
/// - An `Api` struct that implements `SingletonRegistry`
///
/// # Examples
///
/// ```rust
/// use singleton_catalog::{define_registry, BoxError, Singleton};
///
/// // Create an isolated registry
/// define_registry!(app);
///
/// struct ThreadPool {
///     workers: usize,
/// }
///
/// impl Singleton for ThreadPool {
///     fn construct() -> Result<Self, BoxError> {
///         Ok(ThreadPool { workers: 4 })
///     }
/// }
///
/// // First access constructs, later accesses share
/// let pool = app::instance::<ThreadPool>().unwrap();
/// assert_eq!(pool.workers, 4);
/// assert!(app::initialized::<ThreadPool>().unwrap());
/// ```
///
/// # Multiple Registries
///
/// You can create multiple isolated registries; each caches its own instance
/// of a type:
///
/// ```rust
/// use singleton_catalog::{define_registry, BoxError, Handle, Singleton};
///
/// define_registry!(primary);
/// define_registry!(standby);
///
/// struct Channel;
/// impl Singleton for Channel {
///     fn construct() -> Result<Self, BoxError> {
///         Ok(Channel)
///     }
/// }
///
/// let a = primary::instance::<Channel>().unwrap();
/// let b = standby::instance::<Channel>().unwrap();
///
/// // Same type, different registries, different instances
/// assert!(!Handle::ptr_eq(&a, &b));
/// ```
///
/// # Trait-Based Usage
///
/// If you need trait-based usage, the `API` constant is available:
///
/// ```rust
/// use singleton_catalog::{define_registry, BoxError, Singleton, SingletonRegistry};
///
/// define_registry!(metrics);
///
/// struct Counters;
/// impl Singleton for Counters {
///     fn construct() -> Result<Self, BoxError> {
///         Ok(Counters)
///     }
/// }
///
/// let counters = metrics::API.instance::<Counters>().unwrap();
/// ```
#[macro_export]
macro_rules! define_registry {
    ($name:ident) => {
        pub mod $name {
            use std::any::{Any, TypeId};
            use std::collections::HashMap;
            use std::sync::{Arc, LazyLock, Mutex};

            // Storage for cached instances (module-private)
            static STORAGE: LazyLock<Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> =
                LazyLock::new(|| Mutex::new(HashMap::new()));

            // Trace callback storage (module-private)
            static TRACE: LazyLock<Mutex<Option<Arc<dyn Fn(&$crate::RegistryEvent) + Send + Sync>>>> =
                LazyLock::new(|| Mutex::new(None));

            /// Zero-sized type that implements the registry API.
            ///
            /// All registry operations are provided by the `SingletonRegistry`
            /// trait's default implementations. This struct only provides
            /// access to the statics.
            pub struct Api;

            impl $crate::SingletonRegistry for Api {
                fn storage() -> &'static LazyLock<Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> {
                    &STORAGE
                }

                fn trace() -> &'static LazyLock<Mutex<Option<Arc<dyn Fn(&$crate::RegistryEvent) + Send + Sync>>>> {
                    &TRACE
                }

                // All other methods (instance, initialized, etc.) are provided
                // by the trait's default implementations!
            }

            /// Convenient constant for accessing the registry API.
            pub const API: Api = Api;

            // Free functions for ergonomic usage - they delegate to API

            /// Resolve the shared instance of `T`, constructing it on first access.
            pub fn instance<T: $crate::Singleton>(
            ) -> Result<$crate::Handle<T>, $crate::SingletonError> {
                use $crate::SingletonRegistry;
                API.instance()
            }

            /// Check whether `T` has been constructed in this registry.
            pub fn initialized<T: $crate::Singleton>() -> Result<bool, $crate::SingletonError> {
                use $crate::SingletonRegistry;
                API.initialized::<T>()
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                use $crate::SingletonRegistry;
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                use $crate::SingletonRegistry;
                API.clear_trace_callback()
            }

            /// Drop all cached instances (test-only escape hatch).
            #[doc(hidden)]
            #[allow(dead_code)]
            pub fn clear() {
                use $crate::SingletonRegistry;
                API.clear()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{BoxError, Handle, Singleton};

    #[test]
    fn test_define_registry_macro() {
        define_registry!(test_reg);

        struct Cache;
        impl Singleton for Cache {
            fn construct() -> Result<Self, BoxError> {
                Ok(Cache)
            }
        }

        struct Untouched;
        impl Singleton for Untouched {
            fn construct() -> Result<Self, BoxError> {
                Ok(Untouched)
            }
        }

        // Resolve twice through the ergonomic free functions
        let a = test_reg::instance::<Cache>().unwrap();
        let b = test_reg::instance::<Cache>().unwrap();
        assert!(Handle::ptr_eq(&a, &b));

        // Lifecycle check
        assert!(test_reg::initialized::<Cache>().unwrap());
        assert!(!test_reg::initialized::<Untouched>().unwrap());
    }

    #[test]
    fn test_multiple_registries() {
        define_registry!(reg_a);
        define_registry!(reg_b);

        struct Token;
        impl Singleton for Token {
            fn construct() -> Result<Self, BoxError> {
                Ok(Token)
            }
        }

        // The same type resolves to a distinct instance per registry
        let a = reg_a::instance::<Token>().unwrap();
        let b = reg_b::instance::<Token>().unwrap();

        assert!(!Handle::ptr_eq(&a, &b));
    }

    #[test]
    fn test_tracing() {
        define_registry!(trace_test);

        use std::sync::{Arc, Mutex};

        struct Traced;
        impl Singleton for Traced {
            fn construct() -> Result<Self, BoxError> {
                Ok(Traced)
            }
        }

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        trace_test::set_trace_callback(move |event| {
            events_clone.lock().unwrap().push(format!("{}", event));
        });

        let _ = trace_test::instance::<Traced>();
        let _ = trace_test::initialized::<Traced>();

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 3);
        assert!(recorded[0].contains("access"));
        assert!(recorded[1].contains("construct"));
        assert!(recorded[2].contains("initialized"));
    }
}
