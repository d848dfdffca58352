//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for schema construction and container access
#[derive(Error, Debug)]
pub enum Error {
    /// No collaborator matched a criterion in either resolution phase
    #[error(
        "No matching {requested_type} bean found for qualifier {} of type {qualifier_kind}",
        .qualifier_value.as_deref().unwrap_or("<none>")
    )]
    CollaboratorNotFound {
        /// Capability kind that was requested
        requested_type: String,
        /// Qualifier value, if any
        qualifier_value: Option<String>,
        /// Name of the qualifier annotation kind
        qualifier_kind: String,
    },

    /// A marked registration has no determinable type or shape
    #[error("Malformed component descriptor for '{component}': {reason}")]
    MalformedComponentDescriptor {
        /// Registration name of the component
        component: String,
        /// What made the registration unusable
        reason: String,
    },

    /// Two different methods claim the same operation name
    #[error("Operation '{name}' is exposed by both {first} and {second}")]
    DuplicateOperation {
        /// Operation name
        name: String,
        /// Component and method that registered the name first
        first: String,
        /// Component and method that tried to register it again
        second: String,
    },

    /// No registration satisfied a lookup
    #[error("No bean available: {name}")]
    BeanNotFound {
        /// Bean name or description of the lookup
        name: String,
    },

    /// A single-candidate lookup matched several registrations
    #[error("Expected single matching bean of kind {kind} but found {}: {candidates:?}", .candidates.len())]
    NoUniqueBean {
        /// Requested capability kind
        kind: String,
        /// Names of every matching registration
        candidates: Vec<String>,
    },

    /// A registration factory failed
    #[error("Error creating bean '{name}': {message}")]
    BeanCreation {
        /// Registration name
        name: String,
        /// Failure description
        message: String,
    },

    /// A bean was found but is not of the expected shape
    #[error("Bean '{name}' is not a {expected}")]
    BeanTypeMismatch {
        /// Registration name or requested kind
        name: String,
        /// Expected bean shape
        expected: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Schema build error creation methods
impl Error {
    /// Create a collaborator-not-found error
    pub fn collaborator_not_found<S: Into<String>, K: Into<String>>(
        requested_type: S,
        qualifier_value: Option<&str>,
        qualifier_kind: K,
    ) -> Self {
        Self::CollaboratorNotFound {
            requested_type: requested_type.into(),
            qualifier_value: qualifier_value.map(str::to_owned),
            qualifier_kind: qualifier_kind.into(),
        }
    }

    /// Create a malformed-descriptor error
    pub fn malformed_descriptor<C: Into<String>, R: Into<String>>(component: C, reason: R) -> Self {
        Self::MalformedComponentDescriptor {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate-operation error
    pub fn duplicate_operation<N: Into<String>, F: Into<String>, S: Into<String>>(
        name: N,
        first: F,
        second: S,
    ) -> Self {
        Self::DuplicateOperation {
            name: name.into(),
            first: first.into(),
            second: second.into(),
        }
    }
}

// Container error creation methods
impl Error {
    /// Create a bean-not-found error
    pub fn bean_not_found<S: Into<String>>(name: S) -> Self {
        Self::BeanNotFound { name: name.into() }
    }

    /// Create a no-unique-bean error
    pub fn no_unique_bean<S: Into<String>>(kind: S, candidates: Vec<String>) -> Self {
        Self::NoUniqueBean {
            kind: kind.into(),
            candidates,
        }
    }

    /// Create a bean creation error
    pub fn bean_creation<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        Self::BeanCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a bean type mismatch error
    pub fn bean_type_mismatch<N: Into<String>, E: Into<String>>(name: N, expected: E) -> Self {
        Self::BeanTypeMismatch {
            name: name.into(),
            expected: expected.into(),
        }
    }

    /// Whether this error is a "not found" condition of a container lookup
    ///
    /// Ambiguous single-candidate lookups count as not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BeanNotFound { .. } | Self::NoUniqueBean { .. })
    }
}

// Configuration and infrastructure error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
