//! Core trait defining singleton registry behavior.
//!
//! This module provides the `SingletonRegistry` trait with default
//! implementations for lazy, exactly-once construction and tracing of
//! singleton instances.
//!
//! The registry is type-based: each type (`TypeId`) has at most one cached
//! instance, built by the type's own [`Singleton::construct`] on first
//! access. Once a type reaches the initialized state it never leaves it.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use crate::{Handle, RegistryEvent, Singleton, SingletonError};

/// Type alias for the trace callback storage.
///
/// Note: This type is also defined in the `define_registry!` macro.
/// Keep both definitions in sync.
pub type TraceCallback = LazyLock<Mutex<Option<Arc<dyn Fn(&RegistryEvent) + Send + Sync>>>>;

/// Type alias for the instance storage static.
///
/// Maps `TypeId` to the type-erased cached instance. An absent key means the
/// type is still uninitialized.
pub type Storage = LazyLock<Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>>;

/// Core trait defining singleton registry behavior.
///
/// Provides default implementations for all registry operations, requiring
/// only two accessor methods (`storage` and `trace`) to be implemented by
/// the implementor.
///
/// Each type goes through a two-state lifecycle: uninitialized until its
/// first successful `instance()` call, initialized from then on. The
/// check-and-create sequence runs under the storage mutex, so concurrent
/// first callers block until exactly one construction has completed and the
/// instance is published.
pub trait SingletonRegistry {
    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Access the trace callback static.
    ///
    /// This method must be implemented to provide access to the registry's trace callback.
    fn trace() -> &'static TraceCallback;

    /// Set a tracing callback for registry operations.
    ///
    /// The callback will be invoked for every registry operation (access,
    /// construct, initialized check).
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the trace lock is poisoned (due to a panic while holding the lock),
    /// this method automatically recovers by extracting the inner value.
    /// This is safe because trace operations are non-critical and idempotent.
    ///
    /// # Safety Restrictions
    ///
    /// The callback must NOT call any registry methods on the same registry,
    /// as this will cause a deadlock. The callback is invoked while holding
    /// the trace lock.
    fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = Self::trace().lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clear the tracing callback.
    ///
    /// After calling this, no tracing events will be emitted.
    /// Note: This does not affect cached instances, only the tracing callback.
    fn clear_trace_callback(&self) {
        let mut guard = Self::trace().lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    /// Convenience wrapper to emit a registry event using the current callback.
    ///
    /// # Panics
    ///
    /// If the callback itself panics, the panic will propagate to the caller.
    /// The storage lock is not held during callback execution, so this won't
    /// poison the registry storage.
    fn emit_event(&self, event: &RegistryEvent) {
        let guard = Self::trace().lock().unwrap_or_else(|p| p.into_inner());
        if let Some(callback) = guard.as_ref() {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------------------------------

    /// Access the storage static.
    ///
    /// This method must be implemented to provide access to the registry's storage.
    fn storage() -> &'static Storage;

    /// Resolve the shared instance of `T`, constructing it on first access.
    ///
    /// Every call returns a handle to the identical object. On the first
    /// successful call for `T` (across all threads), `T::construct()` runs
    /// exactly once, inside the critical section: the storage mutex is held
    /// across the check-and-create sequence, so concurrent first callers
    /// block until one construction has completed and all of them then
    /// observe the same fully built instance. The mutex release/acquire pair
    /// is the happens-before edge that makes the publication safe.
    ///
    /// # Errors
    ///
    /// - [`SingletonError::Construction`] if `T::construct()` failed. The
    ///   type stays uninitialized and the next call retries.
    /// - [`SingletonError::TypeMismatch`] if the cached value cannot be
    ///   downcast to `T` (extremely rare).
    ///
    /// # Deadlock
    ///
    /// `T::construct()` runs while the storage lock is held and must not
    /// call `instance()` on the same registry.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If `T::construct()` panics the storage lock is poisoned; the next
    /// call recovers the lock. Nothing is inserted until construction has
    /// succeeded, so the recovered map is always consistent.
    fn instance<T: Singleton>(&self) -> Result<Handle<T>, SingletonError> {
        let type_name = std::any::type_name::<T>();

        let mut map = Self::storage().lock().unwrap_or_else(|p| p.into_inner());

        if let Some(existing) = map.get(&TypeId::of::<T>()).cloned() {
            drop(map);

            let arc = existing
                .downcast::<T>()
                .map_err(|_| SingletonError::TypeMismatch { type_name })?;

            self.emit_event(&RegistryEvent::Access {
                type_name,
                hit: true,
            });

            return Ok(Handle::new(arc));
        }

        // Critical section: the lock stays held across construction so that
        // no other caller can race a second construction of the same type.
        match T::construct() {
            Ok(value) => {
                let arc = Arc::new(value);
                map.insert(TypeId::of::<T>(), arc.clone());
                drop(map);

                self.emit_event(&RegistryEvent::Access {
                    type_name,
                    hit: false,
                });
                self.emit_event(&RegistryEvent::Construct { type_name });

                Ok(Handle::new(arc))
            }
            Err(source) => {
                // Leave the map untouched: the type stays uninitialized and
                // a later call retries construction.
                drop(map);

                self.emit_event(&RegistryEvent::ConstructFailed { type_name });

                Err(SingletonError::Construction { type_name, source })
            }
        }
    }

    /// Check whether `T` has been constructed.
    ///
    /// Returns `Ok(false)` while the type is uninitialized, `Ok(true)` once
    /// its one construction has completed. Never triggers construction.
    ///
    /// # Errors
    ///
    /// - [`SingletonError::RegistryLock`] if the storage lock is poisoned
    fn initialized<T: Singleton>(&self) -> Result<bool, SingletonError> {
        let found = Self::storage()
            .lock()
            .map(|m| m.contains_key(&TypeId::of::<T>()))
            .map_err(|_| SingletonError::RegistryLock)?;

        self.emit_event(&RegistryEvent::Initialized {
            type_name: std::any::type_name::<T>(),
            found,
        });

        Ok(found)
    }

    /// Drop all cached instances.
    ///
    /// This method is primarily intended for testing; the documented
    /// lifecycle of an instance ends only at process exit. It does NOT
    /// affect:
    /// - Already-retrieved `Handle<T>` references (they remain valid)
    /// - The tracing callback (use `clear_trace_callback()` to clear that)
    ///
    /// # Lock Poisoning Recovery
    ///
    /// If the storage lock is poisoned, this method silently fails.
    /// This is acceptable for a test-only method.
    #[doc(hidden)]
    fn clear(&self) {
        self.emit_event(&RegistryEvent::Clear {});

        if let Ok(mut registry) = Self::storage().lock() {
            registry.clear();
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{SingletonRegistry, Storage, TraceCallback};
    use crate::{BoxError, Handle, Singleton, SingletonError};

    use serial_test::serial;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, LazyLock, Mutex};

    static STORAGE: Storage = LazyLock::new(|| Mutex::new(HashMap::new()));
    static TRACE: TraceCallback = LazyLock::new(|| Mutex::new(None));

    struct Api;

    impl SingletonRegistry for Api {
        fn storage() -> &'static Storage {
            &STORAGE
        }

        fn trace() -> &'static TraceCallback {
            &TRACE
        }
    }

    const API: Api = Api;

    struct Widget {
        label: String,
    }

    static WIDGET_BUILDS: AtomicUsize = AtomicUsize::new(0);

    impl Singleton for Widget {
        fn construct() -> Result<Self, BoxError> {
            WIDGET_BUILDS.fetch_add(1, Ordering::SeqCst);
            Ok(Widget {
                label: "widget".to_string(),
            })
        }
    }

    #[test]
    #[serial]
    fn test_instance_constructs_once() -> Result<(), SingletonError> {
        API.clear();
        WIDGET_BUILDS.store(0, Ordering::SeqCst);

        let first: Handle<Widget> = API.instance()?;
        assert_eq!(first.label, "widget");
        assert_eq!(WIDGET_BUILDS.load(Ordering::SeqCst), 1);

        let second: Handle<Widget> = API.instance()?;
        assert!(Handle::ptr_eq(&first, &second));
        assert_eq!(WIDGET_BUILDS.load(Ordering::SeqCst), 1);

        Ok(())
    }

    #[test]
    #[serial]
    fn test_initialized_reflects_lifecycle() {
        API.clear();

        struct Gauge;
        impl Singleton for Gauge {
            fn construct() -> Result<Self, BoxError> {
                Ok(Gauge)
            }
        }

        assert!(!API.initialized::<Gauge>().unwrap());
        let _ = API.instance::<Gauge>().unwrap();
        assert!(API.initialized::<Gauge>().unwrap());
    }

    #[test]
    #[serial]
    fn test_initialized_does_not_construct() {
        API.clear();

        struct Probe;
        static PROBE_BUILDS: AtomicUsize = AtomicUsize::new(0);
        impl Singleton for Probe {
            fn construct() -> Result<Self, BoxError> {
                PROBE_BUILDS.fetch_add(1, Ordering::SeqCst);
                Ok(Probe)
            }
        }

        assert!(!API.initialized::<Probe>().unwrap());
        assert_eq!(PROBE_BUILDS.load(Ordering::SeqCst), 0);
    }

    #[test]
    #[serial]
    fn test_construction_failure_leaves_uninitialized() {
        API.clear();

        #[derive(Debug)]
        struct Flaky;
        static FAIL: AtomicBool = AtomicBool::new(true);
        static FLAKY_BUILDS: AtomicUsize = AtomicUsize::new(0);

        impl Singleton for Flaky {
            fn construct() -> Result<Self, BoxError> {
                FLAKY_BUILDS.fetch_add(1, Ordering::SeqCst);
                if FAIL.load(Ordering::SeqCst) {
                    Err("backing store offline".into())
                } else {
                    Ok(Flaky)
                }
            }
        }

        FAIL.store(true, Ordering::SeqCst);
        let err = API.instance::<Flaky>().unwrap_err();
        assert!(matches!(err, SingletonError::Construction { .. }));
        assert!(!API.initialized::<Flaky>().unwrap());

        // Next call retries, and succeeds once the failure condition lifts.
        FAIL.store(false, Ordering::SeqCst);
        let handle = API.instance::<Flaky>().unwrap();
        assert!(API.initialized::<Flaky>().unwrap());
        drop(handle);

        assert_eq!(FLAKY_BUILDS.load(Ordering::SeqCst), 2);
    }

    #[test]
    #[serial]
    fn test_concurrent_first_access_constructs_once() {
        use std::sync::Barrier;
        use std::thread;

        API.clear();

        struct Slow;
        static SLOW_BUILDS: AtomicUsize = AtomicUsize::new(0);
        impl Singleton for Slow {
            fn construct() -> Result<Self, BoxError> {
                // Widen the race window so losers really do contend.
                thread::sleep(std::time::Duration::from_millis(50));
                SLOW_BUILDS.fetch_add(1, Ordering::SeqCst);
                Ok(Slow)
            }
        }

        let threads = 10;
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    API.instance::<Slow>().unwrap()
                })
            })
            .collect();

        let resolved: Vec<Handle<Slow>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(SLOW_BUILDS.load(Ordering::SeqCst), 1);
        for pair in resolved.windows(2) {
            assert!(Handle::ptr_eq(&pair[0], &pair[1]));
        }
    }

    #[test]
    #[serial]
    fn test_trace_callback_sequence() {
        API.clear();

        struct Traced;
        impl Singleton for Traced {
            fn construct() -> Result<Self, BoxError> {
                Ok(Traced)
            }
        }

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        API.set_trace_callback(move |e| {
            events_clone.lock().unwrap().push(format!("{}", e));
        });

        let _ = API.instance::<Traced>();
        let _ = API.instance::<Traced>();

        let captured = events.lock().unwrap();
        let type_name = std::any::type_name::<Traced>();
        assert_eq!(captured.len(), 3);
        assert_eq!(
            captured[0],
            format!("access {{ type_name: {type_name}, hit: false }}")
        );
        assert_eq!(
            captured[1],
            format!("construct {{ type_name: {type_name} }}")
        );
        assert_eq!(
            captured[2],
            format!("access {{ type_name: {type_name}, hit: true }}")
        );
        drop(captured);

        API.clear_trace_callback();
    }

    #[test]
    #[serial]
    fn test_clear_trace_callback_stops_events() {
        API.clear();

        struct Quiet;
        impl Singleton for Quiet {
            fn construct() -> Result<Self, BoxError> {
                Ok(Quiet)
            }
        }

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        API.set_trace_callback(move |e| {
            events_clone.lock().unwrap().push(format!("{}", e));
        });

        let _ = API.initialized::<Quiet>();
        assert_eq!(events.lock().unwrap().len(), 1);

        API.clear_trace_callback();

        let _ = API.instance::<Quiet>();
        let _ = API.initialized::<Quiet>();
        assert_eq!(events.lock().unwrap().len(), 1);
    }
}
