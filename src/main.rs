//! # DTO Hydrator Demo
//!
//! Walks one order through both directions:
//! 1. Seeds an in-memory store with a customer, an address and an order line.
//! 2. Dehydrates a submitted JSON order into an [`Order`] entity.
//! 3. Resolves the references the dehydrator left in the relationship slots.
//! 4. Hydrates an [`OrderView`] back from the entity, scoped to the `public` group.
//!
//! Run with `RUST_LOG=debug cargo run` to see every captured reference.

use dto_hydrator::domain::{self, Address, Customer, Order, OrderInput, OrderItem, OrderView};
use dto_hydrator::framework::mock::InMemoryStore;
use dto_hydrator::framework::{EntityRef, Hydratable, ReferenceResolver};
use dto_hydrator::hydrator::{HydrationContext, Payload};
use dto_hydrator::lifecycle::{setup_tracing, HydratorBundle};
use dto_hydrator::{HydrationError, Result};
use std::sync::Arc;
use tracing::{error, info};

const REQUEST_BODY: &str = r#"{
    "reference": "ORD-2024-0042",
    "note": "leave at the door",
    "customer": {
        "id": 3,
        "name": "Alice Martin",
        "address": {"id": 9, "city": "Lyon"}
    },
    "items": [
        {"id": 1, "quantity": 3},
        {"sku": "GIFT-WRAP", "quantity": 1}
    ]
}"#;

fn seed(store: &InMemoryStore) -> Result<()> {
    let mut customer = Customer::new(3, "Alice", "alice@example.com");
    customer.address = Some(EntityRef::unloaded(&domain::ADDRESS_SCHEMA, 9i64));
    store.insert(customer.to_record())?;

    let address = Address {
        id: 9,
        street: "12 rue de la Paix".to_string(),
        city: "Paris".to_string(),
    };
    store.insert(address.to_record())?;

    let item = OrderItem {
        id: 1,
        sku: "BOOK-RUST".to_string(),
        quantity: 1,
    };
    store.insert(item.to_record())
}

fn resolve_all(order: &mut Order, resolver: &dyn ReferenceResolver) -> Result<()> {
    if let Some(customer) = order.customer.take() {
        order.customer = Some(customer.resolve(resolver)?);
    }
    order.items = std::mem::take(&mut order.items)
        .into_iter()
        .map(|item| item.resolve(resolver))
        .collect::<Result<Vec<_>>>()?;
    Ok(())
}

fn run(bundle: &HydratorBundle, store: &InMemoryStore) -> Result<OrderView> {
    let input: OrderInput = serde_json::from_str(REQUEST_BODY)?;
    bundle.requests.push(Payload::from_json_str(REQUEST_BODY)?);

    let mut order = Order {
        id: 42,
        ..Order::default()
    };
    let write = HydrationContext::with_groups(["write"]);
    let result = bundle
        .factory
        .make("dehydrator")?
        .hydrate(&input, &mut order, &write);
    bundle.requests.pop();
    result?;

    info!(
        reference = %order.reference,
        items = order.items.len(),
        loads = store.loads(),
        "Order dehydrated"
    );

    resolve_all(&mut order, store)?;
    for item in &order.items {
        info!(item = %item, "Order line");
    }

    let mut view = OrderView::default();
    bundle.factory.make("hydrator")?.hydrate(
        &order,
        &mut view,
        &HydrationContext::with_groups(["public"]),
    )?;
    info!(view = view.type_name(), "View hydrated");
    Ok(view)
}

fn main() -> std::result::Result<(), String> {
    setup_tracing();

    info!("Starting hydration demo");

    let store = Arc::new(InMemoryStore::new());
    seed(&store).map_err(|e| e.to_string())?;

    let bundle = HydratorBundle::new(domain::registry(), store.clone());

    match run(&bundle, &store) {
        Ok(view) => {
            info!(?view, "Demo completed successfully");
            Ok(())
        }
        Err(e @ HydrationError::NotFound { .. }) => {
            error!(error = %e, "A submitted reference points at a missing record");
            Err(e.to_string())
        }
        Err(e) => {
            error!(error = %e, "Hydration failed");
            Err(e.to_string())
        }
    }
}
