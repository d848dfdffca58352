//! Qualifiers and collaborator criteria

use std::fmt;

use crate::constants::{ANNOTATED_RESOLVER_BUILDER_KIND, DEFAULT_QUALIFIER};

/// How a qualifier is expressed on a registration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum QualifierKind {
    /// The container's own qualifier mechanism
    #[default]
    Default,
    /// A custom qualifier annotation, by name
    Custom(String),
}

impl QualifierKind {
    pub fn name(&self) -> &str {
        match self {
            Self::Default => DEFAULT_QUALIFIER,
            Self::Custom(name) => name,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Display for QualifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A qualifier annotation attached to a registration or factory method
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifierAnnotation {
    pub kind: QualifierKind,
    pub value: Option<String>,
}

impl QualifierAnnotation {
    /// Default qualifier with a value
    pub fn named<S: Into<String>>(value: S) -> Self {
        Self {
            kind: QualifierKind::Default,
            value: Some(value.into()),
        }
    }

    /// Custom qualifier annotation without a value
    pub fn custom<S: Into<String>>(kind: S) -> Self {
        Self {
            kind: QualifierKind::Custom(kind.into()),
            value: None,
        }
    }

    #[must_use]
    pub fn with_value<S: Into<String>>(mut self, value: S) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// How to locate one collaborator in the container
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollaboratorCriterion {
    /// Capability kind the collaborator must provide
    pub collaborator_kind: String,
    /// Qualifier value; never `Some("")`
    pub qualifier_value: Option<String>,
    pub qualifier_kind: QualifierKind,
}

impl CollaboratorCriterion {
    /// Lookup by kind alone
    pub fn of_kind<S: Into<String>>(kind: S) -> Self {
        Self {
            collaborator_kind: kind.into(),
            qualifier_value: None,
            qualifier_kind: QualifierKind::Default,
        }
    }

    /// Criterion used for components that request no collaborators
    pub fn default_resolver_builder() -> Self {
        Self::of_kind(ANNOTATED_RESOLVER_BUILDER_KIND)
    }

    /// Set the qualifier value; an empty value means no value
    #[must_use]
    pub fn qualified<S: Into<String>>(mut self, value: S) -> Self {
        let value = value.into();
        self.qualifier_value = (!value.is_empty()).then_some(value);
        self
    }

    /// Express the qualifier through a custom annotation kind
    #[must_use]
    pub fn qualifier_kind<S: Into<String>>(mut self, kind: S) -> Self {
        self.qualifier_kind = QualifierKind::Custom(kind.into());
        self
    }
}

impl fmt::Display for CollaboratorCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}={}]",
            self.collaborator_kind,
            self.qualifier_kind,
            self.qualifier_value.as_deref().unwrap_or("")
        )
    }
}
