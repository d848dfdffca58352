//! Collaborator Resolver tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cgql_application::schema::{CollaboratorResolver, ResolutionSnapshot, SchemaFactory};
use cgql_domain::Error;
use cgql_domain::constants::{ANNOTATED_RESOLVER_BUILDER_KIND, PUBLIC_RESOLVER_BUILDER_KIND};
use cgql_domain::value_objects::{
    Bean, BeanDefinition, CollaboratorCriterion, FactoryMethodMetadata, QualifierAnnotation,
};
use cgql_providers::PublicResolverBuilder;

use crate::fixtures::{Calculator, calculator_type, context_with, factory_method_builder, registry};

const CUSTOM_KIND: &str = "CustomResolverBuilder";

fn qualified_factory_builder(name: &str, qualifier: &str) -> BeanDefinition {
    factory_method_builder(name).factory_method(
        FactoryMethodMetadata::returning(name, CUSTOM_KIND)
            .qualifier(QualifierAnnotation::named(qualifier)),
    )
}

/// Builder bean whose factory makes a new instance on every call
fn counting_builder(created: &Arc<AtomicUsize>) -> BeanDefinition {
    let created = Arc::clone(created);
    BeanDefinition::new("countingBuilder", move |_| {
        created.fetch_add(1, Ordering::SeqCst);
        Ok(Bean::ResolverBuilder(Arc::new(PublicResolverBuilder::new())))
    })
    .provides(CUSTOM_KIND)
}

fn resolver(definitions: Vec<BeanDefinition>) -> CollaboratorResolver {
    CollaboratorResolver::new(registry(&context_with(definitions)))
}

#[test]
fn test_direct_hit_leaves_fallback_untouched() {
    let resolver = resolver(vec![]);
    let builder = resolver
        .resolve(&CollaboratorCriterion::default_resolver_builder())
        .expect("annotated builder");

    assert_eq!(builder.builder_name(), ANNOTATED_RESOLVER_BUILDER_KIND);
    assert_eq!(
        resolver.stats(),
        ResolutionSnapshot {
            direct_hits: 1,
            fallback_attempts: 0,
            fallback_hits: 0,
        }
    );
}

#[test]
fn test_direct_qualified_lookup_by_bean_name() {
    let resolver = resolver(vec![PublicResolverBuilder::definition()]);
    let criterion =
        CollaboratorCriterion::of_kind(PUBLIC_RESOLVER_BUILDER_KIND).qualified("publicResolverBuilder");
    let builder = resolver.resolve(&criterion).expect("by name");
    assert_eq!(builder.builder_name(), PUBLIC_RESOLVER_BUILDER_KIND);
    assert_eq!(resolver.stats().fallback_attempts, 0);
}

#[test]
fn test_fallback_prefers_exact_qualifier_value() {
    let resolver = resolver(vec![
        qualified_factory_builder("slowBuilder", "slow"),
        qualified_factory_builder("fastBuilder", "fast"),
    ]);
    let criterion = CollaboratorCriterion::of_kind(CUSTOM_KIND).qualified("fast");

    assert!(resolver.resolve(&criterion).is_ok());
    let stats = resolver.stats();
    assert_eq!(stats.direct_hits, 0);
    assert_eq!(stats.fallback_attempts, 1);
    assert_eq!(stats.fallback_hits, 1);
}

#[test]
fn test_fallback_accepts_sole_candidate() {
    let resolver = resolver(vec![qualified_factory_builder("onlyBuilder", "other")]);
    let criterion = CollaboratorCriterion::of_kind(CUSTOM_KIND).qualified("fast");

    assert!(resolver.resolve(&criterion).is_ok());
    assert_eq!(resolver.stats().fallback_hits, 1);
}

#[test]
fn test_fallback_refuses_ambiguous_candidates() {
    let resolver = resolver(vec![
        qualified_factory_builder("slowBuilder", "slow"),
        qualified_factory_builder("lazyBuilder", "lazy"),
    ]);
    let criterion = CollaboratorCriterion::of_kind(CUSTOM_KIND).qualified("fast");

    let err = resolver.resolve(&criterion).err().expect("ambiguous");
    assert_eq!(
        err.to_string(),
        "No matching CustomResolverBuilder bean found for qualifier fast of type Qualifier"
    );
    assert_eq!(resolver.stats().fallback_hits, 0);
}

#[test]
fn test_nothing_anywhere_is_collaborator_not_found() {
    let resolver = resolver(vec![]);
    let err = resolver
        .resolve(&CollaboratorCriterion::of_kind(CUSTOM_KIND))
        .err()
        .expect("missing");
    assert!(matches!(
        err,
        Error::CollaboratorNotFound { ref requested_type, qualifier_value: None, .. }
            if requested_type == CUSTOM_KIND
    ));
    assert_eq!(resolver.stats().fallback_attempts, 1);
}

#[test]
fn test_custom_qualifier_kind_needs_exactly_one_match() {
    let fast = PublicResolverBuilder::definition().qualifier(QualifierAnnotation::custom("Fast"));
    let criterion = CollaboratorCriterion::of_kind(PUBLIC_RESOLVER_BUILDER_KIND).qualifier_kind("Fast");

    let single = resolver(vec![fast]);
    assert!(single.resolve(&criterion).is_ok());
    assert_eq!(single.stats().direct_hits, 1);

    let twice = resolver(vec![
        PublicResolverBuilder::definition().qualifier(QualifierAnnotation::custom("Fast")),
        BeanDefinition::resolver_builder(
            "otherPublic",
            &[PUBLIC_RESOLVER_BUILDER_KIND],
            Arc::new(PublicResolverBuilder::new()),
        )
        .qualifier(QualifierAnnotation::custom("Fast")),
    ]);
    let err = twice.resolve(&criterion).err().expect("two candidates");
    assert!(matches!(err, Error::CollaboratorNotFound { .. }));
    assert_eq!(twice.stats().fallback_attempts, 1);
}

#[test]
fn test_creation_failure_skips_fallback() {
    let broken = BeanDefinition::new("brokenBuilder", |_| Err(Error::internal("boom")))
        .provides(CUSTOM_KIND);
    let resolver = resolver(vec![broken, qualified_factory_builder("spare", "x")]);

    let err = resolver
        .resolve(&CollaboratorCriterion::of_kind(CUSTOM_KIND))
        .err()
        .expect("creation failure");
    assert!(matches!(err, Error::BeanCreation { .. }));
    assert_eq!(resolver.stats().fallback_attempts, 0);
}

#[test]
fn test_repeated_resolution_returns_the_singleton_builder() {
    let created = Arc::new(AtomicUsize::new(0));
    let resolver = resolver(vec![counting_builder(&created)]);
    let criterion = CollaboratorCriterion::of_kind(CUSTOM_KIND);

    let first = resolver.resolve(&criterion).expect("first");
    let second = resolver.resolve(&criterion).expect("second");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(created.load(Ordering::SeqCst), 1);

    let default = CollaboratorCriterion::default_resolver_builder();
    let annotated = resolver.resolve(&default).expect("annotated");
    assert!(Arc::ptr_eq(&annotated, &resolver.resolve(&default).expect("annotated again")));
}

#[test]
fn test_schema_builds_share_the_singleton_builder() {
    let created = Arc::new(AtomicUsize::new(0));
    let ty = Arc::new(
        (*calculator_type())
            .clone()
            .with_resolver_builder(CollaboratorCriterion::of_kind(CUSTOM_KIND)),
    );
    let calculator = BeanDefinition::component("calculator", ty, |_| Ok(Calculator::shared()));
    let registry = registry(&context_with(vec![counting_builder(&created), calculator]));
    let factory = SchemaFactory::new(Arc::clone(&registry));

    let first = factory.get_object().expect("first build");
    let second = factory.get_object().expect("second build");
    assert!(first.query("getSquare").is_some());
    assert!(second.query("getSquare").is_some());
    assert_eq!(created.load(Ordering::SeqCst), 1);
    assert_eq!(factory.resolution_stats().direct_hits, 2);

    let criterion = CollaboratorCriterion::of_kind(CUSTOM_KIND);
    let before = CollaboratorResolver::new(Arc::clone(&registry))
        .resolve(&criterion)
        .expect("resolve");
    let after = CollaboratorResolver::new(registry).resolve(&criterion).expect("resolve");
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(created.load(Ordering::SeqCst), 1);
}
