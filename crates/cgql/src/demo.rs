//! Demo application components
//!
//! [`GraphQlDemoServerController`] registers itself in
//! [`API_COMPONENTS`] and is picked up by every container built with
//! registered beans. The container hands it out wrapped in a
//! [`LoggingDecorator`].

use std::sync::Arc;

use cgql_application::registry::{API_COMPONENTS, BeanRegistration};
use cgql_domain::OperationFailure;
use cgql_domain::ports::ApiComponent;
use cgql_domain::value_objects::{
    BeanDefinition, MethodDescriptor, OperationArguments, ParameterDescriptor, ScalarType,
    TypeDescriptor,
};
use cgql_providers::LoggingDecorator;
use serde_json::Value;

pub const DEMO_CONTROLLER_BEAN: &str = "graphQlDemoServerController";

/// Raised when an operation needs a value nobody supplied
#[derive(Debug, thiserror::Error)]
#[error("no value present")]
pub struct MissingValueError;

/// Squares numbers and demonstrates failure mapping
#[derive(Debug, Default)]
pub struct GraphQlDemoServerController;

impl GraphQlDemoServerController {
    pub fn get_square(&self, input: Option<i64>) -> Result<Option<i64>, OperationFailure> {
        input
            .map(|n| {
                n.checked_mul(n).ok_or_else(|| {
                    OperationFailure::invalid_argument(format!("square of {n} overflows"))
                })
            })
            .transpose()
    }

    pub fn throwing_npe(&self, _input: Option<i64>) -> Result<i64, MissingValueError> {
        Err(MissingValueError)
    }

    pub fn type_descriptor() -> Arc<TypeDescriptor> {
        Arc::new(
            TypeDescriptor::new("GraphQlDemoServerController")
                .method(
                    MethodDescriptor::query("getSquare")
                        .param(ParameterDescriptor::new("input", ScalarType::Int))
                        .returns(ScalarType::Int),
                )
                .method(
                    MethodDescriptor::query("throwingNPE")
                        .param(ParameterDescriptor::new("input", ScalarType::Int))
                        .returns(ScalarType::Int),
                ),
        )
    }

    /// Registration handing out the controller behind a logging wrapper
    pub fn definition() -> BeanDefinition {
        BeanDefinition::component(DEMO_CONTROLLER_BEAN, Self::type_descriptor(), |_| {
            Ok(Arc::new(LoggingDecorator::new(Arc::new(Self))) as Arc<dyn ApiComponent>)
        })
    }
}

impl ApiComponent for GraphQlDemoServerController {
    fn target_type(&self) -> Arc<TypeDescriptor> {
        Self::type_descriptor()
    }

    fn invoke(
        &self,
        method: &MethodDescriptor,
        args: &OperationArguments,
    ) -> Result<Value, OperationFailure> {
        let input = args.opt_i64("input")?;
        match method.name.as_str() {
            "getSquare" => Ok(self.get_square(input)?.map_or(Value::Null, Value::from)),
            "throwingNPE" => self
                .throwing_npe(input)
                .map(Value::from)
                .map_err(|e| OperationFailure::from_error(&e)),
            other => Err(OperationFailure::new("NoSuchMethod", other)),
        }
    }
}

#[linkme::distributed_slice(API_COMPONENTS)]
static DEMO_CONTROLLER: BeanRegistration = BeanRegistration {
    name: DEMO_CONTROLLER_BEAN,
    description: "Demo queries: getSquare and an always failing throwingNPE",
    definition: GraphQlDemoServerController::definition,
};
