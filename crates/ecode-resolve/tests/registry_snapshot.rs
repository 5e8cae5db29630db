//! Integration tests: a small restaurant-ordering API registered the way a
//! host application would, resolved sequentially and from several threads.

use std::sync::Arc;

use ecode_core::{ErrorCodeDescription, Operation, OperationId, TypeName};
use ecode_resolve::Registry;
use ecode_validate::{RuleSet, Validator};

/// A collaborator the host injects into validators.
struct MenuLimits {
    max_items: i64,
}

struct CreateOrderValidator {
    rules: RuleSet,
}

impl CreateOrderValidator {
    fn new(limits: &MenuLimits) -> Self {
        let rules = RuleSet::builder(TypeName::parse("CreateOrderRequest").unwrap())
            .rule_for("RestaurantId")
            .not_empty()
            .with_error_code("RestaurantRequired")
            .rule_for("Items")
            .not_empty()
            .with_error_code("OrderEmpty")
            .with_message("An order needs at least one item.")
            .inclusive_between(1, limits.max_items)
            .with_error_code("TooManyItems")
            .rule_for("Comment")
            .max_length(250)
            .build();
        Self { rules }
    }
}

impl Validator for CreateOrderValidator {
    fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

struct PagingValidator {
    rules: RuleSet,
}

impl Default for PagingValidator {
    fn default() -> Self {
        let rules = RuleSet::builder(TypeName::parse("PagingRequest").unwrap())
            .rule_for("PageSize")
            .inclusive_between(1, 100)
            .with_error_code("PageSizeOutOfRange")
            .with_message("Page size must be between 1 and 100.")
            .build();
        Self { rules }
    }
}

impl Validator for PagingValidator {
    fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

const NAMES: [&str; 3] = ["Orders.Create", "Orders.List", "Orders.Common"];

fn id(s: &str) -> OperationId {
    OperationId::parse(s).unwrap()
}

fn resolve(registry: &Registry, name: &str) -> Vec<ErrorCodeDescription> {
    registry.resolver().error_codes(&id(name)).unwrap()
}

fn registry() -> Registry {
    let limits = Arc::new(MenuLimits { max_items: 50 });
    let create_order = TypeName::parse("CreateOrderRequest").unwrap();
    Registry::builder()
        .operation(
            Operation::parse("Orders.Common")
                .unwrap()
                .literal(None, "Unauthorized", None)
                .literal(Some("restaurantId"), "RestaurantNotFound", None),
        )
        .operation(
            Operation::parse("Orders.Create")
                .unwrap()
                .delegates_to_operation("Orders.Common")
                .unwrap()
                .delegates_to_validator("CreateOrderRequest")
                .unwrap()
                .literal(None, "RestaurantClosed", Some("Not accepting orders.")),
        )
        .operation(
            Operation::parse("Orders.List")
                .unwrap()
                .delegates_to_operation("Orders.Common")
                .unwrap()
                .delegates_to_validator("PagingRequest")
                .unwrap(),
        )
        .validator_with(create_order, move || CreateOrderValidator::new(&limits))
        .validator_default::<PagingValidator>()
        .build()
        .unwrap()
}

fn expected_create() -> Vec<ErrorCodeDescription> {
    vec![
        ErrorCodeDescription::code("Unauthorized"),
        ErrorCodeDescription::for_property("restaurantId", "RestaurantNotFound"),
        ErrorCodeDescription::for_property("RestaurantId", "RestaurantRequired"),
        ErrorCodeDescription::for_property("Items", "OrderEmpty")
            .with_description("An order needs at least one item."),
        ErrorCodeDescription::code("RestaurantClosed").with_description("Not accepting orders."),
    ]
}

#[test]
fn create_order_resolves_full_code_set() {
    let codes = resolve(&registry(), "Orders.Create");
    assert_eq!(codes, expected_create());
}

#[test]
fn list_orders_includes_paging_codes() {
    let codes = resolve(&registry(), "Orders.List");
    let paging = ErrorCodeDescription::for_property("PageSize", "PageSizeOutOfRange")
        .with_description("Page size must be between 1 and 100.");
    assert_eq!(codes.last(), Some(&paging));
    assert_eq!(codes.len(), 3);
}

#[test]
fn concurrent_resolution_matches_sequential() {
    let registry = registry();
    let sequential: Vec<_> = NAMES.iter().map(|name| resolve(&registry, name)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = &registry;
                let name = NAMES[i % 3];
                scope.spawn(move || (i % 3, resolve(registry, name)))
            })
            .collect();
        for handle in handles {
            let (slot, codes) = handle.join().unwrap();
            assert_eq!(codes, sequential[slot]);
        }
    });
}
