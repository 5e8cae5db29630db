//! Integration test: a `#[derive(OpenApi)]` document documented from the
//! demo manifest, the way a host service publishes its spec.

use std::path::PathBuf;
use std::sync::Arc;

use ecode_api::{document_operations, ErrorCodeAddon};
use ecode_schema::Manifest;
use utoipa::{Modify, OpenApi};

#[utoipa::path(
    post,
    path = "/orders",
    operation_id = "Orders.Create",
    description = "Places an order.",
    responses((status = 201, description = "Order created"))
)]
#[allow(dead_code)]
fn create_order() {}

#[utoipa::path(
    get,
    path = "/health",
    operation_id = "Health.Ping",
    responses((status = 200, description = "Alive"))
)]
#[allow(dead_code)]
fn ping() {}

#[derive(OpenApi)]
#[openapi(paths(create_order, ping))]
struct ApiDoc;

fn manifest() -> Manifest {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop();
    path.pop();
    let path = path.join("demos/restaurant.manifest.yaml");
    Manifest::from_path(path).unwrap()
}

fn create_description(doc: &utoipa::openapi::OpenApi) -> Option<String> {
    let orders = doc.paths.paths.get("/orders")?;
    orders.post.as_ref()?.description.clone()
}

#[test]
fn derived_document_gets_error_codes() {
    let manifest = manifest();
    let opts = &manifest.documentation;
    let registry = manifest.to_registry().unwrap();
    let resolver = registry.resolver();
    let mut doc = ApiDoc::openapi();

    let report = document_operations(&mut doc, &resolver, opts).unwrap();
    assert_eq!(report.documented, 1);
    assert_eq!(report.empty, 1);
    assert!(report.unregistered.is_empty());

    assert_eq!(
        create_description(&doc).as_deref(),
        Some(
            "Places an order.\n\n\
             Error codes:\n\
             - Unauthorized\n\
             - \"restaurantId\": RestaurantNotFound\n\
             - \"RestaurantId\": RestaurantRequired\n\
             - \"Items\": OrderEmpty - An order needs at least one item.\n\
             - RestaurantClosed - The restaurant is not accepting orders."
        )
    );
}

#[test]
fn addon_matches_direct_call() {
    let manifest = manifest();
    let registry = Arc::new(manifest.to_registry().unwrap());

    let opts = &manifest.documentation;

    let mut direct = ApiDoc::openapi();
    let resolver = registry.resolver();
    document_operations(&mut direct, &resolver, opts).unwrap();

    let mut modified = ApiDoc::openapi();
    let addon = ErrorCodeAddon::new(Arc::clone(&registry), opts.clone());
    addon.modify(&mut modified);

    assert_eq!(create_description(&direct), create_description(&modified));
}
