//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::user_handler::{
    AmountRequest, RegisterAccountRequest, RegisterUserRequest, RegisteredAccountResponse,
};
use domain::{AccountProps, EntityId, UserProps};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::register_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::user_handler::register_account,
        crate::handlers::user_handler::deposit,
        crate::handlers::user_handler::withdraw,
    ),
    components(
        schemas(
            EntityId,
            AccountProps,
            UserProps,
            RegisterUserRequest,
            RegisterAccountRequest,
            AmountRequest,
            RegisteredAccountResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "User management endpoints"),
        (name = "Accounts", description = "Account endpoints"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .build(),
                ),
            );
        }
    }
}
