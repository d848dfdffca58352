//! Type, method and parameter descriptors
//!
//! Components describe their own shape with these descriptors instead of
//! being introspected at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::criterion::CollaboratorCriterion;

/// Scalar types operations accept and return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    Int,
    Float,
    String,
    Boolean,
    #[serde(rename = "ID")]
    Id,
    /// Arbitrary JSON value, printed as `JSON`
    Json,
}

impl ScalarType {
    /// Name of the scalar in schema listings
    pub fn schema_name(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Id => "ID",
            Self::Json => "JSON",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_name())
    }
}

/// Root type an operation is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// Name of the root type
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Marks a method as an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationAnnotation {
    pub kind: OperationKind,
    /// Explicit operation name; the method name is used when absent
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Annotations a parameter may carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterAnnotation {
    /// Value comes from the named request header
    RequestHeader { name: String },
    /// Any other annotation, by name
    Named(String),
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub scalar: ScalarType,
    pub required: bool,
    pub annotations: Vec<ParameterAnnotation>,
}

impl ParameterDescriptor {
    /// Optional parameter without annotations
    pub fn new<S: Into<String>>(name: S, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            scalar,
            required: false,
            annotations: Vec::new(),
        }
    }

    /// Mark the parameter as non-null
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Bind the parameter to a request header
    #[must_use]
    pub fn from_header<S: Into<String>>(mut self, header: S) -> Self {
        self.annotations
            .push(ParameterAnnotation::RequestHeader { name: header.into() });
        self
    }

    /// Name of the header this parameter is bound to, if any
    pub fn header_name(&self) -> Option<&str> {
        self.annotations.iter().find_map(|a| match a {
            ParameterAnnotation::RequestHeader { name } => Some(name.as_str()),
            ParameterAnnotation::Named(_) => None,
        })
    }
}

/// Method visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A method declared on a component type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub name: String,
    pub operation: Option<OperationAnnotation>,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: ScalarType,
    pub visibility: Visibility,
}

impl MethodDescriptor {
    /// Public method without operation annotation
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            operation: None,
            parameters: Vec::new(),
            return_type: ScalarType::Json,
            visibility: Visibility::Public,
        }
    }

    /// Public method annotated as a query
    pub fn query<S: Into<String>>(name: S) -> Self {
        Self::new(name).annotated(OperationKind::Query)
    }

    /// Public method annotated as a mutation
    pub fn mutation<S: Into<String>>(name: S) -> Self {
        Self::new(name).annotated(OperationKind::Mutation)
    }

    #[must_use]
    pub fn annotated(mut self, kind: OperationKind) -> Self {
        self.operation = Some(OperationAnnotation {
            kind,
            name: None,
            description: None,
        });
        self
    }

    /// Set the explicit operation name of an annotated method
    #[must_use]
    pub fn named<S: Into<String>>(mut self, name: S) -> Self {
        if let Some(op) = self.operation.as_mut() {
            op.name = Some(name.into());
        }
        self
    }

    #[must_use]
    pub fn described<S: Into<String>>(mut self, description: S) -> Self {
        if let Some(op) = self.operation.as_mut() {
            op.description = Some(description.into());
        }
        self
    }

    #[must_use]
    pub fn param(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn returns(mut self, scalar: ScalarType) -> Self {
        self.return_type = scalar;
        self
    }

    #[must_use]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Name under which the method is exposed
    pub fn operation_name(&self) -> &str {
        self.operation
            .as_ref()
            .and_then(|op| op.name.as_deref())
            .unwrap_or(&self.name)
    }

    /// Root type the method is exposed on; unannotated methods are queries
    pub fn operation_kind(&self) -> OperationKind {
        self.operation
            .as_ref()
            .map_or(OperationKind::Query, |op| op.kind)
    }

    pub fn description(&self) -> Option<&str> {
        self.operation
            .as_ref()
            .and_then(|op| op.description.as_deref())
    }

    /// Same name and same parameter types, in order
    pub fn same_signature(&self, other: &Self) -> bool {
        self.name == other.name
            && self.parameters.len() == other.parameters.len()
            && self
                .parameters
                .iter()
                .zip(&other.parameters)
                .all(|(a, b)| a.scalar == b.scalar)
    }

    /// `name(Int, String)` form used in diagnostics
    pub fn signature(&self) -> String {
        let params: Vec<&str> = self
            .parameters
            .iter()
            .map(|p| p.scalar.schema_name())
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// The shape of a component type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub methods: Vec<MethodDescriptor>,
    /// Collaborators requested by the type itself
    pub resolver_builders: Vec<CollaboratorCriterion>,
}

impl TypeDescriptor {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            resolver_builders: Vec::new(),
        }
    }

    #[must_use]
    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn with_resolver_builder(mut self, criterion: CollaboratorCriterion) -> Self {
        self.resolver_builders.push(criterion);
        self
    }

    /// Public method of this type matching the signature of `method`
    pub fn find_invocable(&self, method: &MethodDescriptor) -> Option<&MethodDescriptor> {
        self.methods
            .iter()
            .find(|m| m.is_public() && m.same_signature(method))
    }
}
