use dto_hydrator::domain::{self, Customer, CustomerInput, CustomerView};
use dto_hydrator::framework::mock::InMemoryStore;
use dto_hydrator::hydrator::{HydrationContext, Payload};
use dto_hydrator::lifecycle::HydratorBundle;
use dto_hydrator::{Copier, CopierKind, HydrationError};
use serde_json::json;
use std::sync::Arc;

fn bundle() -> HydratorBundle {
    HydratorBundle::new(domain::registry(), Arc::new(InMemoryStore::new()))
}

/// Repeated lookups hand out the same instance.
#[test]
fn test_factory_returns_singletons() {
    let bundle = bundle();

    let first = bundle.factory.make("hydrator").expect("Hydrator missing");
    let second = bundle.factory.make("hydrator").expect("Hydrator missing");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.kind(), CopierKind::Hydrator);

    let first = bundle.factory.make("dehydrator").expect("Dehydrator missing");
    let second = bundle.factory.make_kind(CopierKind::Dehydrator);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.kind(), CopierKind::Dehydrator);

    // Cloned bundles share the same copiers.
    let clone = bundle.clone();
    assert!(Arc::ptr_eq(&bundle.hydrator(), &clone.hydrator()));
}

#[test]
fn test_factory_rejects_unknown_kind() {
    let bundle = bundle();

    for tag in ["", "Hydrator", "serializer", "dehydrator "] {
        match bundle.factory.make(tag) {
            Err(HydrationError::UnsupportedKind(kind)) => assert_eq!(kind, tag),
            other => panic!("Expected UnsupportedKind for {:?}, got {:?}", tag, other),
        }
    }
}

#[test]
fn test_kind_tags() {
    assert_eq!(CopierKind::Hydrator.to_string(), "hydrator");
    assert_eq!("dehydrator".parse::<CopierKind>(), Ok(CopierKind::Dehydrator));
}

/// One copier instance serves many concurrent calls.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_singletons_are_shared_across_threads() {
    let bundle = bundle();
    bundle.requests.push(
        Payload::from_json(json!({"name": "Updated", "email": "updated@example.com"}))
            .expect("Invalid payload"),
    );

    let mut handles = Vec::new();
    for i in 0..16i64 {
        let bundle = bundle.clone();
        handles.push(tokio::spawn(async move {
            let input = CustomerInput {
                name: "Updated".to_string(),
                email: "updated@example.com".to_string(),
                ..CustomerInput::default()
            };
            let mut customer = Customer::new(i, format!("Customer {}", i), "old@example.com");
            bundle
                .factory
                .make("dehydrator")?
                .hydrate(&input, &mut customer, &HydrationContext::default())?;

            let mut view = CustomerView::default();
            bundle.factory.make("hydrator")?.hydrate(
                &customer,
                &mut view,
                &HydrationContext::with_groups(["public"]),
            )?;
            Ok::<_, HydrationError>(view)
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let view = handle
            .await
            .expect("Task panicked")
            .expect("Hydration failed");
        assert_eq!(view.id, i as i64);
        assert_eq!(view.name, "Updated");
        assert_eq!(view.email, "");
    }
}
