//! Execution engine
//!
//! Root fields run independently: a failing field is set to `null` and adds
//! one error, the others still produce data. Syntax and validation errors
//! stop the request before any field runs, and the response carries no data.

use cgql_domain::value_objects::{OperationArguments, RequestContext};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::document::{self, Field, InputValue, Operation};
use super::error_mapping::{self, ErrorClassification, FieldContext, GraphQlError};
use super::source::GraphQlSource;
use crate::schema::{OperationDefinition, Schema};

const TYPENAME_FIELD: &str = "__typename";

/// Body of a GraphQL request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphQlRequest {
    pub fn new<S: Into<String>>(query: S) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = Some(variables);
        self
    }

    #[must_use]
    pub fn with_operation_name<S: Into<String>>(mut self, name: S) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

/// Result of a GraphQL request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    fn rejected(errors: Vec<GraphQlError>) -> Self {
        Self { data: None, errors }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub(crate) fn execute(
    source: &GraphQlSource,
    request: &GraphQlRequest,
    context: &RequestContext,
) -> GraphQlResponse {
    let document = match document::parse(&request.query) {
        Ok(d) => d,
        Err(e) => {
            return GraphQlResponse::rejected(vec![GraphQlError::new(
                e.to_string(),
                ErrorClassification::InvalidSyntax,
            )]);
        }
    };
    let operation = match document.select(request.operation_name.as_deref()) {
        Ok(op) => op,
        Err(message) => {
            return GraphQlResponse::rejected(vec![GraphQlError::new(
                message,
                ErrorClassification::ValidationError,
            )]);
        }
    };

    let schema = source.schema();
    let provided = request.variables.clone().unwrap_or_default();
    let variables = match coerce_variables(operation, &provided) {
        Ok(v) => v,
        Err(errors) => return GraphQlResponse::rejected(errors),
    };
    let errors = validate(schema, operation);
    if !errors.is_empty() {
        return GraphQlResponse::rejected(errors);
    }

    let mut data = Map::new();
    let mut errors = Vec::new();
    for field in &operation.selection_set {
        let key = field.response_key().to_owned();
        if field.name == TYPENAME_FIELD {
            data.insert(key, Value::String(operation.kind.type_name().to_owned()));
            continue;
        }
        let Some(definition) = schema.operation(operation.kind, &field.name) else {
            continue;
        };

        let args = arguments(field, &variables);
        match error_mapping::guarded(|| definition.invoke(context, &args)) {
            Ok(value) => {
                data.insert(key, project(&value, &field.selection_set));
            }
            Err(failure) => {
                debug!(
                    operation = %definition.name,
                    kind = failure.kind(),
                    message = failure.message(),
                    "Operation failed"
                );
                let path = [Value::String(key.clone())];
                let field_context = FieldContext {
                    field_name: &field.name,
                    path: &path,
                };
                errors.extend(error_mapping::map_failure(
                    source.exception_resolvers(),
                    &failure,
                    &field_context,
                ));
                data.insert(key, Value::Null);
            }
        }
    }

    GraphQlResponse {
        data: Some(Value::Object(data)),
        errors,
    }
}

/// Values for declared variables: provided, else default, else `null`
fn coerce_variables(
    operation: &Operation,
    provided: &Map<String, Value>,
) -> Result<Map<String, Value>, Vec<GraphQlError>> {
    let mut values = Map::new();
    let mut errors = Vec::new();
    for definition in &operation.variables {
        let value = provided
            .get(&definition.name)
            .cloned()
            .or_else(|| definition.default.as_ref().map(|d| d.resolve(&Map::new())))
            .unwrap_or(Value::Null);
        if value.is_null() && definition.is_non_null() {
            errors.push(GraphQlError::new(
                format!(
                    "Variable '{}' has an invalid value: null for non-null type '{}'",
                    definition.name, definition.type_name
                ),
                ErrorClassification::ValidationError,
            ));
        }
        values.insert(definition.name.clone(), value);
    }
    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

fn validate(schema: &Schema, operation: &Operation) -> Vec<GraphQlError> {
    let mut errors = Vec::new();
    let declared: Vec<&str> = operation.variables.iter().map(|v| v.name.as_str()).collect();

    for field in &operation.selection_set {
        if field.name == TYPENAME_FIELD {
            continue;
        }
        let key = field.response_key();
        let Some(definition) = schema.operation(operation.kind, &field.name) else {
            errors.push(validation_error(
                "FieldUndefined",
                key,
                &format!(
                    "Field '{}' in type '{}' is undefined",
                    field.name,
                    operation.kind.type_name()
                ),
            ));
            continue;
        };
        validate_arguments(definition, field, &declared, &mut errors);
    }
    errors
}

fn validate_arguments(
    definition: &OperationDefinition,
    field: &Field,
    declared: &[&str],
    errors: &mut Vec<GraphQlError>,
) {
    let key = field.response_key();
    for (name, value) in &field.arguments {
        if definition.argument(name).is_none() {
            errors.push(validation_error(
                "UnknownArgument",
                key,
                &format!("Unknown field argument '{name}'"),
            ));
        }
        let mut used = Vec::new();
        value.collect_variables(&mut used);
        for variable in used.into_iter().filter(|v| !declared.contains(v)) {
            errors.push(validation_error(
                "UndefinedVariable",
                key,
                &format!("Undefined variable '{variable}'"),
            ));
        }
    }
    for parameter in definition.arguments.iter().filter(|p| p.required) {
        if matches!(field.argument(&parameter.name), None | Some(InputValue::Null)) {
            errors.push(validation_error(
                "MissingFieldArgument",
                key,
                &format!("Missing field argument '{}'", parameter.name),
            ));
        }
    }
}

fn validation_error(rule: &str, key: &str, detail: &str) -> GraphQlError {
    GraphQlError::new(
        format!("Validation error ({rule}@[{key}]) : {detail}"),
        ErrorClassification::ValidationError,
    )
}

fn arguments(field: &Field, variables: &Map<String, Value>) -> OperationArguments {
    let mut args = OperationArguments::new();
    for (name, value) in &field.arguments {
        args.insert(name.clone(), value.resolve(variables));
    }
    args
}

/// Keep only the selected sub-fields of an object result, recursively
fn project(value: &Value, selection: &[Field]) -> Value {
    if selection.is_empty() {
        return value.clone();
    }
    match value {
        Value::Object(map) => Value::Object(
            selection
                .iter()
                .map(|f| {
                    let inner = map.get(&f.name).unwrap_or(&Value::Null);
                    (f.response_key().to_owned(), project(inner, &f.selection_set))
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|v| project(v, selection)).collect()),
        other => other.clone(),
    }
}
