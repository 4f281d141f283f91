use dto_hydrator::domain::{Customer, CustomerView, Order, OrderView, CUSTOMER_SCHEMA};
use dto_hydrator::framework::{EntityRef, Hydratable, Record, Value};
use dto_hydrator::hydratable;
use dto_hydrator::hydrator::{Copier, HydrationContext, Hydrator};
use dto_hydrator::HydrationError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invoice {
    pub number: String,
    pub total: f64,
}

hydratable!(Invoice { number, total });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadgeView {
    pub label: String,
    pub color: String,
}

hydratable!(BadgeView { label, color });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LooseCustomerView {
    pub id: String,
    pub name: String,
}

hydratable!(LooseCustomerView { id, name });

/// Types without a shared attribute leave the destination untouched.
#[test]
fn test_disjoint_attributes_are_a_no_op() {
    let source = Invoice {
        number: "INV-7".to_string(),
        total: 99.5,
    };
    let mut destination = BadgeView {
        label: "gold".to_string(),
        color: "yellow".to_string(),
    };
    let before = destination.clone();

    Hydrator::new()
        .hydrate(&source, &mut destination, &HydrationContext::default())
        .expect("Hydration failed");

    assert_eq!(destination, before);
}

/// Every shared attribute takes the source's value; the rest keep their own.
#[test]
fn test_shared_attributes_are_copied() {
    let source = Customer::new(3, "Alice", "alice@example.com");
    let mut view = CustomerView::default();

    Hydrator::new()
        .hydrate(&source, &mut view, &HydrationContext::default())
        .expect("Hydration failed");

    assert_eq!(view.id, 3);
    assert_eq!(view.name, "Alice");
    assert_eq!(view.email, "alice@example.com");
}

/// Only attributes in the requested group are copied, even when more would match.
#[test]
fn test_groups_restrict_copied_attributes() {
    let source = Customer::new(3, "Alice", "alice@example.com");

    let mut public = CustomerView::default();
    Hydrator::new()
        .hydrate(&source, &mut public, &HydrationContext::with_groups(["public"]))
        .expect("Hydration failed");
    assert_eq!(public.id, 3);
    assert_eq!(public.name, "Alice");
    assert_eq!(public.email, "");

    let mut detail = CustomerView::default();
    Hydrator::new()
        .hydrate(&source, &mut detail, &HydrationContext::with_groups(["detail"]))
        .expect("Hydration failed");
    assert_eq!(detail.email, "alice@example.com");

    // An empty group list is no filter at all.
    let mut all = CustomerView::default();
    Hydrator::new()
        .hydrate(&source, &mut all, &HydrationContext::with_groups(Vec::<String>::new()))
        .expect("Hydration failed");
    assert_eq!(all.email, "alice@example.com");
}

/// A loaded reference on the entity is handed over and converted into the nested view.
#[test]
fn test_loaded_relationship_becomes_nested_view() {
    let customer = Customer::new(3, "Alice", "alice@example.com");
    let order = Order {
        id: 42,
        reference: "ORD-42".to_string(),
        note: Some("fragile".to_string()),
        customer: Some(EntityRef::loaded(customer.to_record())),
        items: Vec::new(),
    };
    let mut view = OrderView::default();

    Hydrator::new()
        .hydrate(&order, &mut view, &HydrationContext::with_groups(["public"]))
        .expect("Hydration failed");

    assert_eq!(view.reference, "ORD-42");
    assert_eq!(view.note, None);
    let nested = view.customer.expect("customer should be copied");
    assert_eq!(nested.name, "Alice");
}

/// Dynamic records work as sources like any typed struct.
#[test]
fn test_record_source() {
    let record = Record::new(&CUSTOMER_SCHEMA)
        .with("id", 5i64)
        .with("name", "Bob");
    let mut view = CustomerView {
        email: "kept@example.com".to_string(),
        ..CustomerView::default()
    };

    Hydrator::new()
        .hydrate(&record, &mut view, &HydrationContext::with_groups(["public"]))
        .expect("Hydration failed");

    assert_eq!(view.id, 5);
    assert_eq!(view.name, "Bob");
    assert_eq!(view.email, "kept@example.com");
}

/// A value the destination field cannot hold fails with an attribute access error.
#[test]
fn test_incompatible_value_fails() {
    let source = Customer::new(3, "Alice", "alice@example.com");
    let mut view = LooseCustomerView::default();

    let err = Hydrator::new()
        .hydrate(&source, &mut view, &HydrationContext::default())
        .unwrap_err();

    match err {
        HydrationError::AttributeAccess {
            type_name,
            attribute,
            ..
        } => {
            assert_eq!(type_name, "LooseCustomerView");
            assert_eq!(attribute, "id");
        }
        other => panic!("Expected AttributeAccess, got {:?}", other),
    }
}

/// An unloaded reference cannot be read beyond its identity.
#[test]
fn test_unloaded_reference_source_fails_on_data() {
    let mut reference = EntityRef::unloaded(&CUSTOMER_SCHEMA, 3i64);
    let mut view = CustomerView::default();

    let err = Hydrator::new()
        .hydrate(&reference, &mut view, &HydrationContext::with_groups(["public"]))
        .unwrap_err();
    assert!(matches!(err, HydrationError::AttributeAccess { .. }));
    assert_eq!(view.id, 3);

    // Pending assignments are readable.
    reference
        .write("name", Value::from("Alice"))
        .expect("write failed");
    let mut view = CustomerView::default();
    Hydrator::new()
        .hydrate(&reference, &mut view, &HydrationContext::with_groups(["public"]))
        .expect("Hydration failed");
    assert_eq!(view.name, "Alice");
}
