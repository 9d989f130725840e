//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every resource handler and the health probes, plus
//! the schema wrappers from [`crate::inbound::http::schemas`]. The document
//! is served by Swagger UI in debug builds and exported with
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::{
    FieldIssueSchema, NewProductSchema, NewUserSchema, ProductSchema, UserSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "CRUD endpoints for users and products with schema-validated payloads."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        NewUserSchema,
        ProductSchema,
        NewProductSchema,
        FieldIssueSchema,
        ErrorBody
    )),
    tags(
        (name = "users", description = "User records"),
        (name = "products", description = "Product records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("User", "isActive")]
    #[case("Product", "price")]
    #[case("FieldIssue", "type")]
    #[case("ErrorBody", "error")]
    fn schemas_expose_wire_field_names(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("registered schema");
        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    #[case("/api/users")]
    #[case("/api/users/{id}")]
    #[case("/api/products")]
    #[case("/api/products/{id}")]
    #[case("/health/ready")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
