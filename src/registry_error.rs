use std::error::Error;
use std::fmt;

/// Boxed error returned by a failing [`Singleton::construct`](crate::Singleton::construct).
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Errors surfaced by a singleton registry.
#[derive(Debug)]
pub enum SingletonError {
    /// The type's constructor failed. The registry stays uninitialized for
    /// this type; the next `instance()` call retries construction.
    Construction {
        type_name: &'static str,
        source: BoxError,
    },
    /// An attempt was made to duplicate an instance outside the registry,
    /// e.g. deserializing a handle whose marker names a different type.
    IllegalDuplication { type_name: &'static str },
    /// The stored value could not be downcast to the requested type.
    TypeMismatch { type_name: &'static str },
    /// Failed to acquire the registry lock.
    RegistryLock,
}

impl fmt::Display for SingletonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SingletonError::Construction { type_name, source } => {
                write!(f, "Construction failed for singleton {type_name}: {source}")
            }
            SingletonError::IllegalDuplication { type_name } => {
                write!(f, "Illegal duplication of singleton {type_name}")
            }
            SingletonError::TypeMismatch { type_name } => {
                write!(f, "Type mismatch in registry for {type_name}")
            }
            SingletonError::RegistryLock => write!(f, "Failed to acquire registry lock"),
        }
    }
}

impl Error for SingletonError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SingletonError::Construction { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
