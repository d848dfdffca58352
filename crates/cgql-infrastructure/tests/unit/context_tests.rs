//! Bean container tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cgql_domain::error::Error;
use cgql_domain::failure::OperationFailure;
use cgql_domain::ports::{ApiComponent, BeanRegistry};
use cgql_domain::value_objects::{
    Bean, BeanDefinition, BeanScope, MethodDescriptor, OperationArguments, QualifierAnnotation,
    QualifierKind, ScalarType, TypeDescriptor,
};
use cgql_infrastructure::di::ContextBuilder;
use serde_json::Value;

struct Echo {
    ty: Arc<TypeDescriptor>,
}

impl ApiComponent for Echo {
    fn target_type(&self) -> Arc<TypeDescriptor> {
        Arc::clone(&self.ty)
    }

    fn invoke(
        &self,
        _method: &MethodDescriptor,
        args: &OperationArguments,
    ) -> Result<Value, OperationFailure> {
        Ok(Value::from(args.i64("input")?))
    }
}

fn echo_type() -> Arc<TypeDescriptor> {
    Arc::new(
        TypeDescriptor::new("Echo")
            .method(MethodDescriptor::query("echo").returns(ScalarType::Int)),
    )
}

fn echo_definition(name: &str, created: &Arc<AtomicUsize>) -> BeanDefinition {
    let created = Arc::clone(created);
    BeanDefinition::component(name, echo_type(), move |_| {
        created.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(Echo { ty: echo_type() }) as Arc<dyn ApiComponent>)
    })
}

fn value(name: &str, v: u32) -> BeanDefinition {
    BeanDefinition::new(name, move |_| Ok(Bean::Value(Arc::new(v))))
}

#[test]
fn test_singleton_is_created_once() {
    let created = Arc::new(AtomicUsize::new(0));
    let ctx = ContextBuilder::new()
        .register(echo_definition("echo", &created))
        .build()
        .expect("build");

    let first = ctx.get_bean("echo").expect("bean");
    let second = ctx.get_bean("echo").expect("bean");
    assert!(first.same_instance(&second));
    assert_eq!(created.load(Ordering::SeqCst), 1);
    assert!(ctx.is_singleton("echo"));
}

#[test]
fn test_prototype_is_created_per_lookup() {
    let created = Arc::new(AtomicUsize::new(0));
    let ctx = ContextBuilder::new()
        .register(echo_definition("echo", &created).scope(BeanScope::Prototype))
        .build()
        .expect("build");

    let first = ctx.get_bean("echo").expect("bean");
    let second = ctx.get_bean("echo").expect("bean");
    assert!(!first.same_instance(&second));
    assert_eq!(created.load(Ordering::SeqCst), 2);
    assert!(ctx.is_prototype("echo"));
    assert!(!ctx.is_singleton("echo"));
}

#[test]
fn test_custom_scope_is_neither_singleton_nor_prototype() {
    let ctx = ContextBuilder::new()
        .register(value("req", 1).scope(BeanScope::Custom("request".into())))
        .build()
        .expect("build");
    assert!(!ctx.is_singleton("req"));
    assert!(!ctx.is_prototype("req"));
    assert_eq!(*ctx.value::<u32>("req").expect("value"), 1);
}

#[test]
fn test_single_bean_of_kind() {
    let ctx = ContextBuilder::new()
        .register(value("a", 1).provides("Number"))
        .register(value("b", 2).provides("Number"))
        .register(value("c", 3).provides("Letter"))
        .build()
        .expect("build");

    let letter = ctx.bean_of_kind("Letter").expect("unique");
    assert_eq!(*letter.into_value::<u32>("c").expect("u32"), 3);

    let err = ctx.bean_of_kind("Number").expect_err("ambiguous");
    assert!(matches!(err, Error::NoUniqueBean { ref candidates, .. } if candidates.len() == 2));
    assert!(err.is_not_found());

    let err = ctx.bean_of_kind("Missing").expect_err("absent");
    assert!(matches!(err, Error::BeanNotFound { .. }));
}

#[test]
fn test_qualified_lookup_matches_qualifier_value_or_name() {
    let ctx = ContextBuilder::new()
        .register(
            value("first", 1)
                .provides("Number")
                .qualifier(QualifierAnnotation::named("one")),
        )
        .register(value("second", 2).provides("Number"))
        .build()
        .expect("build");

    let by_value = ctx.qualified_bean_of_kind("Number", "one").expect("by value");
    assert_eq!(*by_value.into_value::<u32>("first").expect("u32"), 1);

    let by_name = ctx.qualified_bean_of_kind("Number", "second").expect("by name");
    assert_eq!(*by_name.into_value::<u32>("second").expect("u32"), 2);

    assert!(
        ctx.qualified_bean_of_kind("Number", "three")
            .expect_err("none")
            .is_not_found()
    );
}

#[test]
fn test_names_for_marker_and_qualifier_keep_registration_order() {
    let created = Arc::new(AtomicUsize::new(0));
    let ctx = ContextBuilder::new()
        .register(echo_definition("zeta", &created))
        .register(value("plain", 0).qualifier(QualifierAnnotation::custom("Fancy")))
        .register(echo_definition("alpha", &created))
        .build()
        .expect("build");

    assert_eq!(
        ctx.bean_names_for_marker(cgql_domain::constants::GRAPHQL_API_MARKER),
        vec!["zeta", "alpha"]
    );
    assert_eq!(ctx.bean_definition_names(), vec!["zeta", "plain", "alpha"]);
    assert_eq!(
        ctx.bean_names_for_qualifier(&QualifierKind::Custom("Fancy".into())),
        vec!["plain"]
    );
    assert!(ctx.bean_names_for_qualifier(&QualifierKind::Default).is_empty());
    // nothing was instantiated by these reads
    assert_eq!(created.load(Ordering::SeqCst), 0);
}

#[test]
fn test_bean_type_prefers_declared_type() {
    let created = Arc::new(AtomicUsize::new(0));
    let ctx = ContextBuilder::new()
        .register(echo_definition("declared", &created))
        .register(echo_definition("discovered", &created).untyped())
        .build()
        .expect("build");

    assert_eq!(ctx.bean_type("declared").expect("type").name, "Echo");
    assert_eq!(created.load(Ordering::SeqCst), 0);

    assert_eq!(ctx.bean_type("discovered").expect("type").name, "Echo");
    assert_eq!(created.load(Ordering::SeqCst), 1);

    assert!(ctx.bean_type("missing").is_err());
}

#[test]
fn test_factory_failure_is_wrapped() {
    let ctx = ContextBuilder::new()
        .register(BeanDefinition::new("broken", |_| {
            Err(Error::internal("database offline"))
        }))
        .build()
        .expect("build");

    match ctx.get_bean("broken") {
        Err(Error::BeanCreation { name, message }) => {
            assert_eq!(name, "broken");
            assert!(message.contains("database offline"));
        }
        other => panic!("Expected BeanCreation, got {other:?}"),
    }
}

#[test]
fn test_factories_can_look_up_other_beans() {
    let ctx = ContextBuilder::new()
        .register(value("base", 20))
        .register(BeanDefinition::new("derived", |registry| {
            let base = registry.get_bean("base")?.into_value::<u32>("base")?;
            Ok(Bean::Value(Arc::new(*base + 1)))
        }))
        .build()
        .expect("build");

    assert_eq!(*ctx.value::<u32>("derived").expect("derived"), 21);
}

#[test]
fn test_duplicate_names_are_rejected() {
    let result = ContextBuilder::new()
        .register(value("same", 1))
        .register(value("same", 2))
        .build();
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_concurrent_singleton_lookups_share_one_instance() {
    let created = Arc::new(AtomicUsize::new(0));
    let ctx = ContextBuilder::new()
        .register(echo_definition("echo", &created))
        .build()
        .expect("build");

    let beans: Vec<Bean> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| ctx.get_bean("echo").expect("bean")))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("join"))
            .collect()
    });
    assert!(beans.windows(2).all(|w| w[0].same_instance(&w[1])));
}

#[test]
fn test_registered_beans_include_default_resolver_builders() {
    let ctx = ContextBuilder::new()
        .with_registered_beans()
        .build()
        .expect("build");
    let builder = ctx
        .bean_of_kind(cgql_domain::constants::ANNOTATED_RESOLVER_BUILDER_KIND)
        .expect("annotated builder registered");
    assert!(builder.into_resolver_builder("annotated").is_ok());
}
