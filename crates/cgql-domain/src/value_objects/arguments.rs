//! Operation arguments

use serde_json::{Map, Value};

use crate::failure::OperationFailure;

/// Named arguments passed to an operation, in request order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationArguments {
    values: Map<String, Value>,
}

impl OperationArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn with<S: Into<String>, V: Into<Value>>(mut self, name: S, value: V) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Raw value; `None` when absent
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Non-null value or an argument failure
    fn present(&self, name: &str) -> Result<&Value, OperationFailure> {
        match self.values.get(name) {
            None | Some(Value::Null) => Err(OperationFailure::invalid_argument(format!(
                "Argument '{name}' is required but was not provided"
            ))),
            Some(v) => Ok(v),
        }
    }

    fn mismatch(name: &str, expected: &str, found: &Value) -> OperationFailure {
        OperationFailure::invalid_argument(format!(
            "Argument '{name}' expected {expected} but got {found}"
        ))
    }

    pub fn i64(&self, name: &str) -> Result<i64, OperationFailure> {
        let v = self.present(name)?;
        v.as_i64().ok_or_else(|| Self::mismatch(name, "Int", v))
    }

    pub fn f64(&self, name: &str) -> Result<f64, OperationFailure> {
        let v = self.present(name)?;
        v.as_f64().ok_or_else(|| Self::mismatch(name, "Float", v))
    }

    pub fn str(&self, name: &str) -> Result<&str, OperationFailure> {
        let v = self.present(name)?;
        v.as_str().ok_or_else(|| Self::mismatch(name, "String", v))
    }

    pub fn bool(&self, name: &str) -> Result<bool, OperationFailure> {
        let v = self.present(name)?;
        v.as_bool().ok_or_else(|| Self::mismatch(name, "Boolean", v))
    }

    pub fn opt_i64(&self, name: &str) -> Result<Option<i64>, OperationFailure> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.i64(name).map(Some),
        }
    }

    pub fn opt_f64(&self, name: &str) -> Result<Option<f64>, OperationFailure> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.f64(name).map(Some),
        }
    }

    pub fn opt_str(&self, name: &str) -> Result<Option<&str>, OperationFailure> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.str(name).map(Some),
        }
    }

    pub fn opt_bool(&self, name: &str) -> Result<Option<bool>, OperationFailure> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.bool(name).map(Some),
        }
    }
}
