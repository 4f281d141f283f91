use crate::factory::CopierFactory;
use crate::framework::{ReferenceResolver, SchemaRegistry};
use crate::hydrator::{Dehydrator, Hydrator, PayloadSource, RequestStack};
use std::sync::Arc;
use tracing::info;

/// Registration of the hydration services.
///
/// `HydratorBundle` is responsible for:
/// - **Construction**: creating the [`Hydrator`] and [`Dehydrator`] exactly once
/// - **Dependency Wiring**: handing the dehydrator its resolver, request source and schemas
/// - **Retrieval**: exposing both copiers through a [`CopierFactory`]
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryStore::new());
/// let bundle = HydratorBundle::new(domain::registry(), store.clone());
///
/// bundle.requests.push(Payload::from_json_str(body)?);
/// bundle.factory.make("dehydrator")?.hydrate(&input, &mut order, &HydrationContext::default())?;
/// bundle.requests.pop();
/// ```
#[derive(Debug, Clone)]
pub struct HydratorBundle {
    /// Schemas of every type that can be the target of a relationship.
    pub registry: Arc<SchemaRegistry>,

    /// The request stack the dehydrator reads its payload from.
    pub requests: Arc<RequestStack>,

    /// Lookup of the two copier singletons.
    pub factory: CopierFactory,
}

impl HydratorBundle {
    /// Wires a bundle around `resolver` with a fresh [`RequestStack`].
    pub fn new(registry: SchemaRegistry, resolver: Arc<dyn ReferenceResolver>) -> Self {
        Self::with_requests(registry, resolver, Arc::new(RequestStack::new()))
    }

    /// Wires a bundle around an existing request stack.
    pub fn with_requests(
        registry: SchemaRegistry,
        resolver: Arc<dyn ReferenceResolver>,
        requests: Arc<RequestStack>,
    ) -> Self {
        let registry = Arc::new(registry);
        let hydrator = Arc::new(Hydrator::new());
        let dehydrator = Arc::new(Dehydrator::new(
            resolver,
            requests.clone() as Arc<dyn PayloadSource>,
            registry.clone(),
        ));
        info!(schemas = registry.len(), "Hydrator bundle registered");

        Self {
            registry,
            requests,
            factory: CopierFactory::new(hydrator, dehydrator),
        }
    }

    pub fn hydrator(&self) -> Arc<Hydrator> {
        self.factory.hydrator()
    }

    pub fn dehydrator(&self) -> Arc<Dehydrator> {
        self.factory.dehydrator()
    }
}
