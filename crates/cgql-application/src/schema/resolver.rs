//! Collaborator Resolver
//!
//! Locates the resolver builder named by a [`CollaboratorCriterion`] in two
//! phases composed in sequence:
//!
//! 1. **Direct** - a container lookup by kind, by custom qualifier
//!    annotation, or by kind plus qualifier value.
//! 2. **Fallback** - only when the direct phase reports a not-found
//!    condition: a scan of factory-method registrations whose declared return
//!    type names the requested kind. An exact default-qualifier value match
//!    wins; otherwise a candidate is taken only when it is the sole one.
//!
//! Both phases failing is fatal to the schema build.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use cgql_domain::ports::{BeanRegistry, ResolverBuilder};
use cgql_domain::value_objects::{BeanSource, CollaboratorCriterion, QualifierKind};
use cgql_domain::{Error, Result};
use tracing::{debug, warn};

/// Counters of the two resolution phases
#[derive(Debug, Default)]
pub struct ResolutionStats {
    direct_hits: AtomicU64,
    fallback_attempts: AtomicU64,
    fallback_hits: AtomicU64,
}

/// Point-in-time copy of [`ResolutionStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionSnapshot {
    pub direct_hits: u64,
    pub fallback_attempts: u64,
    pub fallback_hits: u64,
}

impl ResolutionStats {
    pub fn snapshot(&self) -> ResolutionSnapshot {
        ResolutionSnapshot {
            direct_hits: self.direct_hits.load(Ordering::Relaxed),
            fallback_attempts: self.fallback_attempts.load(Ordering::Relaxed),
            fallback_hits: self.fallback_hits.load(Ordering::Relaxed),
        }
    }
}

pub struct CollaboratorResolver {
    registry: Arc<dyn BeanRegistry>,
    stats: Arc<ResolutionStats>,
}

impl CollaboratorResolver {
    pub fn new(registry: Arc<dyn BeanRegistry>) -> Self {
        Self::with_stats(registry, Arc::new(ResolutionStats::default()))
    }

    pub fn with_stats(registry: Arc<dyn BeanRegistry>, stats: Arc<ResolutionStats>) -> Self {
        Self { registry, stats }
    }

    pub fn stats(&self) -> ResolutionSnapshot {
        self.stats.snapshot()
    }

    /// Exactly one collaborator for `criterion`, or `CollaboratorNotFound`
    pub fn resolve(&self, criterion: &CollaboratorCriterion) -> Result<Arc<dyn ResolverBuilder>> {
        match self.resolve_direct(criterion) {
            Ok(builder) => {
                self.stats.direct_hits.fetch_add(1, Ordering::Relaxed);
                debug!(criterion = %criterion, builder = builder.builder_name(), "Resolved collaborator");
                Ok(builder)
            }
            Err(e) if e.is_not_found() => {
                debug!(criterion = %criterion, error = %e, "Direct lookup failed, scanning registrations");
                self.resolve_fallback(criterion)
            }
            Err(e) => Err(e),
        }
    }

    fn resolve_direct(&self, criterion: &CollaboratorCriterion) -> Result<Arc<dyn ResolverBuilder>> {
        let kind = criterion.collaborator_kind.as_str();
        let bean = match (&criterion.qualifier_value, &criterion.qualifier_kind) {
            (None, QualifierKind::Default) => self.registry.bean_of_kind(kind)?,
            (None, custom) => {
                let names: Vec<String> = self
                    .registry
                    .bean_names_for_qualifier(custom)
                    .into_iter()
                    .filter(|name| self.registry.is_type_match(name, kind))
                    .collect();
                match names.as_slice() {
                    [only] => self.registry.get_bean(only)?,
                    [] => {
                        return Err(Error::bean_not_found(format!(
                            "{kind} annotated with {custom}"
                        )));
                    }
                    _ => return Err(Error::no_unique_bean(kind, names)),
                }
            }
            (Some(value), _) => self.registry.qualified_bean_of_kind(kind, value)?,
        };
        bean.into_resolver_builder(kind)
    }

    fn resolve_fallback(&self, criterion: &CollaboratorCriterion) -> Result<Arc<dyn ResolverBuilder>> {
        self.stats.fallback_attempts.fetch_add(1, Ordering::Relaxed);
        let kind = criterion.collaborator_kind.as_str();

        let mut candidates: Vec<(String, Option<String>)> = Vec::new();
        for name in self.registry.bean_definition_names() {
            let definition = self.registry.bean_definition(&name)?;
            if let BeanSource::FactoryMethod(metadata) = definition.source()
                && metadata.return_type_name() == kind
                && let Some(qualifier) = metadata
                    .qualifiers_of_kind(&criterion.qualifier_kind)
                    .next()
            {
                candidates.push((name, qualifier.value.clone()));
            }
        }

        let exact = if criterion.qualifier_kind.is_default() && criterion.qualifier_value.is_some() {
            candidates
                .iter()
                .find(|(_, value)| *value == criterion.qualifier_value)
        } else {
            None
        };
        let selected = exact.or(match candidates.as_slice() {
            [only] => Some(only),
            _ => None,
        });

        let Some((name, _)) = selected else {
            if candidates.len() > 1 {
                warn!(
                    criterion = %criterion,
                    candidates = ?candidates.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
                    "Ambiguous collaborator: several registrations match by type and none by qualifier value"
                );
            }
            return Err(Error::collaborator_not_found(
                kind,
                criterion.qualifier_value.as_deref(),
                criterion.qualifier_kind.name(),
            ));
        };

        let builder = self.registry.get_bean(name)?.into_resolver_builder(name)?;
        self.stats.fallback_hits.fetch_add(1, Ordering::Relaxed);
        warn!(
            criterion = %criterion,
            bean = %name,
            "Collaborator resolved from factory-method metadata"
        );
        Ok(builder)
    }
}
