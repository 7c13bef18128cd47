/// Events emitted by a registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use singleton_catalog::RegistryEvent;
///
/// let event = RegistryEvent::Construct { type_name: "Config" };
/// println!("{:?}", event);
/// ```
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    /// A type's constructor ran to completion and the instance was cached.
    /// Emitted at most once per type for the life of the registry.
    Construct {
        /// The type name of the constructed singleton (e.g., "myapp::Config")
        type_name: &'static str,
    },

    /// A type's constructor returned an error. The registry stays
    /// uninitialized for this type.
    ConstructFailed {
        /// The type name whose construction failed
        type_name: &'static str,
    },

    /// `instance()` was called.
    Access {
        /// The type name that was requested
        type_name: &'static str,
        /// Whether the instance already existed (`false` on the call that
        /// triggered construction)
        hit: bool,
    },

    /// An `initialized()` check was performed.
    Initialized {
        /// The type name that was checked
        type_name: &'static str,
        /// Whether the type has been constructed
        found: bool,
    },
    /// The registry was cleared (test-only operation).
    Clear {},
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Construct { type_name } => {
                write!(f, "construct {{ type_name: {} }}", type_name)
            }
            RegistryEvent::ConstructFailed { type_name } => {
                write!(f, "construct_failed {{ type_name: {} }}", type_name)
            }
            RegistryEvent::Access { type_name, hit } => {
                write!(f, "access {{ type_name: {}, hit: {} }}", type_name, hit)
            }
            RegistryEvent::Initialized { type_name, found } => {
                write!(
                    f,
                    "initialized {{ type_name: {}, found: {} }}",
                    type_name, found
                )
            }
            RegistryEvent::Clear {} => write!(f, "Clearing the Registry"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_event_display() {
        let event = RegistryEvent::Construct { type_name: "Config" };
        assert_eq!(event.to_string(), "construct { type_name: Config }");

        let event = RegistryEvent::ConstructFailed { type_name: "Config" };
        assert_eq!(event.to_string(), "construct_failed { type_name: Config }");

        let event = RegistryEvent::Access {
            type_name: "Config",
            hit: true,
        };
        assert_eq!(event.to_string(), "access { type_name: Config, hit: true }");

        let event = RegistryEvent::Initialized {
            type_name: "u8",
            found: false,
        };
        assert_eq!(
            event.to_string(),
            "initialized { type_name: u8, found: false }"
        );
    }

    #[test]
    fn test_registry_event_clone() {
        let event = RegistryEvent::Access {
            type_name: "Config",
            hit: false,
        };
        let cloned = event.clone();
        assert_eq!(format!("{:?}", event), format!("{:?}", cloned));
    }
}
