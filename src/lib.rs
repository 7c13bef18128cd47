//! # Singleton Catalog
//!
//! A catalog of classic object-oriented design patterns in Rust. The Builder
//! and Factory Method entries are short illustrative modules; the Singleton
//! entry is the one pattern that touches a real systems concern (shared
//! state under concurrent first access) and gets a full contract: a lazy,
//! thread-safe singleton registry with actual mutual exclusion around the
//! check-and-create sequence.
//!
//! ## Quick Start
//!
//! ```rust
//! use singleton_catalog::{instance, BoxError, Handle, Singleton};
//!
//! struct AppConfig {
//!     verbose: bool,
//! }
//!
//! impl Singleton for AppConfig {
//!     fn construct() -> Result<Self, BoxError> {
//!         Ok(AppConfig { verbose: false })
//!     }
//! }
//!
//! // First access constructs, every later access shares
//! let a: Handle<AppConfig> = instance().unwrap();
//! let b: Handle<AppConfig> = instance().unwrap();
//! assert!(Handle::ptr_eq(&a, &b));
//! assert!(!a.verbose);
//! ```
//!
//! ## Guarantees
//!
//! - **Exactly-once construction**: the registry lock is held across the
//!   check-and-create sequence, so concurrent first callers never race a
//!   second construction and never observe a partially built instance
//! - **Identity**: every resolution of a type yields a [`Handle`] to the
//!   identical object for the lifetime of the process
//! - **No duplication**: `Handle` implements neither `Clone` nor any
//!   owned-copy accessor; with the `serde` feature, deserializing a handle
//!   resolves the existing shared instance instead of building a new one
//! - **Failure is retryable**: a failing constructor surfaces to the caller
//!   that triggered it and leaves the type uninitialized
//!
//! ## Main Items
//!
//! - [`Singleton`] - trait implemented by types managed by a registry
//! - [`instance`] - resolve the shared instance from the default registry
//! - [`initialized`] - observe a type's lifecycle state without constructing
//! - [`define_registry!`] - generate an isolated registry module
//! - [`set_trace_callback`] - set up tracing for registry operations
//! - [`builder`] / [`factory`] - the illustrative catalog entries

mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;
mod singleton;

pub mod builder;
pub mod factory;

mod macros;

// Re-export the main public API
pub use registry::{clear_trace_callback, initialized, instance, set_trace_callback};
pub use registry_error::{BoxError, SingletonError};
pub use registry_event::RegistryEvent;
pub use registry_trait::{SingletonRegistry, Storage, TraceCallback};
pub use singleton::{Handle, Singleton};

#[doc(hidden)]
pub use registry::clear;
