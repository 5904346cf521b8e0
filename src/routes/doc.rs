use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        cart::{CartItemRequest, CartList},
        products::ProductList,
    },
    models::{CartItem, Product},
    response::{ErrorBody, MessageResponse},
    routes::{auth, cart, checkout, health, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        products::list_products,
        cart::view_cart,
        cart::list_cart,
        cart::add_to_cart,
        cart::remove_from_cart,
        cart::clear_cart,
        checkout::checkout
    ),
    components(
        schemas(
            Product,
            CartItem,
            ProductList,
            CartList,
            CartItemRequest,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            ErrorBody,
            health::HealthData
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Login and logout"),
        (name = "Products", description = "Product catalog"),
        (name = "Cart", description = "Cart of the logged-in user"),
        (name = "Checkout", description = "Checkout confirmation"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
