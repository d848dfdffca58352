//! The assembled schema

use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use cgql_domain::ports::{ArgumentInjector, Executable};
use cgql_domain::value_objects::{
    MethodDescriptor, OperationArguments, OperationKind, ParameterDescriptor, RequestContext,
    ScalarType,
};
use cgql_domain::{Error, OperationFailure, Result};
use serde_json::Value;

/// A parameter filled in by an argument injector at call time
#[derive(Clone)]
pub struct InjectedParameter {
    pub parameter: ParameterDescriptor,
    pub injector: Arc<dyn ArgumentInjector>,
}

impl fmt::Debug for InjectedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectedParameter")
            .field("parameter", &self.parameter.name)
            .field("injector", &self.injector.injector_name())
            .finish()
    }
}

/// One operation of the schema
#[derive(Clone)]
pub struct OperationDefinition {
    pub name: String,
    pub kind: OperationKind,
    pub description: Option<String>,
    /// Registration name of the enclosing component
    pub component: String,
    pub method: MethodDescriptor,
    /// Arguments clients pass
    pub arguments: Vec<ParameterDescriptor>,
    /// Parameters supplied from the request
    pub injected: Vec<InjectedParameter>,
    pub executable: Arc<dyn Executable>,
    /// Resolver builders that exposed this operation, in order
    pub collaborators: Vec<String>,
}

impl OperationDefinition {
    pub fn argument(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// `component.method(Int)` form used in diagnostics
    pub fn origin(&self) -> String {
        format!("{}.{}", self.component, self.method.signature())
    }

    /// Invoke the operation with client arguments plus injected parameters
    pub fn invoke(
        &self,
        request: &RequestContext,
        provided: &OperationArguments,
    ) -> std::result::Result<Value, OperationFailure> {
        let mut args = OperationArguments::new();
        for argument in &self.arguments {
            if let Some(value) = provided.get(&argument.name) {
                args.insert(argument.name.clone(), value.clone());
            }
        }
        for injected in &self.injected {
            args.insert(
                injected.parameter.name.clone(),
                injected.injector.resolve(request, &injected.parameter),
            );
        }
        self.executable.execute(None, &args)
    }
}

impl fmt::Debug for OperationDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDefinition")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("component", &self.component)
            .field("method", &self.method.signature())
            .field("arguments", &self.arguments.len())
            .field("injected", &self.injected)
            .field("collaborators", &self.collaborators)
            .finish_non_exhaustive()
    }
}

/// Immutable mapping from operation name to its definition, per root type
#[derive(Debug, Clone, Default)]
pub struct Schema {
    operations: Vec<OperationDefinition>,
    index: HashMap<(OperationKind, String), usize>,
}

impl Schema {
    pub fn operation(&self, kind: OperationKind, name: &str) -> Option<&OperationDefinition> {
        self.index
            .get(&(kind, name.to_owned()))
            .map(|&i| &self.operations[i])
    }

    pub fn query(&self, name: &str) -> Option<&OperationDefinition> {
        self.operation(OperationKind::Query, name)
    }

    pub fn mutation(&self, name: &str) -> Option<&OperationDefinition> {
        self.operation(OperationKind::Mutation, name)
    }

    /// Every operation, in registration order
    pub fn operations(&self) -> &[OperationDefinition] {
        &self.operations
    }

    pub fn operations_of(&self, kind: OperationKind) -> impl Iterator<Item = &OperationDefinition> {
        self.operations.iter().filter(move |op| op.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// SDL-style listing of the root types
    pub fn print(&self) -> String {
        let mut out = String::new();
        if self
            .operations
            .iter()
            .any(|op| op.method.return_type == ScalarType::Json || op.arguments.iter().any(|a| a.scalar == ScalarType::Json))
        {
            out.push_str("scalar JSON\n\n");
        }

        for kind in [OperationKind::Query, OperationKind::Mutation] {
            let mut ops = self.operations_of(kind).peekable();
            if ops.peek().is_none() {
                continue;
            }
            let _ = writeln!(out, "type {} {{", kind.type_name());
            for op in ops {
                if let Some(description) = &op.description {
                    let _ = writeln!(out, "  \"{}\"", description.replace('"', "\\\""));
                }
                let args: Vec<String> = op
                    .arguments
                    .iter()
                    .map(|a| {
                        format!(
                            "{}: {}{}",
                            a.name,
                            a.scalar.schema_name(),
                            if a.required { "!" } else { "" }
                        )
                    })
                    .collect();
                if args.is_empty() {
                    let _ = writeln!(out, "  {}: {}", op.name, op.method.return_type);
                } else {
                    let _ = writeln!(
                        out,
                        "  {}({}): {}",
                        op.name,
                        args.join(", "),
                        op.method.return_type
                    );
                }
            }
            out.push_str("}\n\n");
        }
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
        out
    }
}

/// Accumulates operations while the assembler runs
#[derive(Default)]
pub(crate) struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    /// Add an operation
    ///
    /// The same method exposed again by another collaborator of the same
    /// component merges into the existing entry; any other name clash fails.
    pub(crate) fn add(&mut self, operation: OperationDefinition) -> Result<()> {
        let key = (operation.kind, operation.name.clone());
        if let Some(&i) = self.schema.index.get(&key) {
            let existing = &mut self.schema.operations[i];
            if existing.component == operation.component
                && existing.method.same_signature(&operation.method)
            {
                for collaborator in operation.collaborators {
                    if !existing.collaborators.contains(&collaborator) {
                        existing.collaborators.push(collaborator);
                    }
                }
                return Ok(());
            }
            return Err(Error::duplicate_operation(
                operation.name.clone(),
                existing.origin(),
                operation.origin(),
            ));
        }
        self.schema.index.insert(key, self.schema.operations.len());
        self.schema.operations.push(operation);
        Ok(())
    }

    pub(crate) fn build(self) -> Schema {
        self.schema
    }
}
