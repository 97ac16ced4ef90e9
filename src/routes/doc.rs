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
        auth::{LoginRequest, LoginResponse, OwnerRegisterRequest, ProviderRegisterRequest},
        cart::{AddToCartRequest, CartList, UpdateScheduledTimeRequest},
        favorites::{AddFavoriteRequest, FavoriteList},
        orders::{OrderList, ProviderOrderList, UpdateOrderStatusRequest},
        profiles::{UpdateOwnerProfileRequest, UpdateProviderProfileRequest},
        services::{
            AddReviewRequest, CreateServiceRequest, MarkDealRequest, MarkSpecialRequest,
            ReviewList, ServiceList, UpdateServiceRequest,
        },
    },
    models::{CartItem, Favorite, Order, OrderStatus, Owner, Provider, ProviderOrder, Service},
    response::{ApiResponse, Meta},
    routes::{cart, favorites, health, orders, owners, provider_orders, providers, services},
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
        owners::register,
        owners::login,
        owners::profile,
        owners::update_profile,
        providers::register,
        providers::login,
        providers::profile,
        providers::update_profile,
        cart::cart_list,
        cart::add_to_cart,
        cart::remove_from_cart,
        cart::update_scheduled_time,
        orders::place_order,
        orders::get_order,
        orders::cancel_order,
        orders::search_orders,
        orders::list_orders,
        favorites::add_favorite,
        favorites::list_favorites,
        favorites::remove_favorite,
        services::create_service,
        services::list_services,
        services::list_services_for_provider,
        services::get_service,
        services::update_service,
        services::delete_service,
        services::mark_special,
        services::mark_deal,
        services::list_deal_of_the_day,
        services::list_todays_special,
        services::add_review,
        provider_orders::list_orders,
        provider_orders::update_order_status
    ),
    components(
        schemas(
            Owner,
            Provider,
            Service,
            CartItem,
            Order,
            OrderStatus,
            ProviderOrder,
            Favorite,
            OwnerRegisterRequest,
            ProviderRegisterRequest,
            LoginRequest,
            LoginResponse,
            UpdateOwnerProfileRequest,
            UpdateProviderProfileRequest,
            AddToCartRequest,
            UpdateScheduledTimeRequest,
            AddFavoriteRequest,
            UpdateOrderStatusRequest,
            CreateServiceRequest,
            UpdateServiceRequest,
            MarkSpecialRequest,
            MarkDealRequest,
            AddReviewRequest,
            CartList,
            FavoriteList,
            OrderList,
            ProviderOrderList,
            ReviewList,
            ServiceList,
            Meta,
            ApiResponse<Owner>,
            ApiResponse<Provider>,
            ApiResponse<Service>,
            ApiResponse<Order>,
            ApiResponse<LoginResponse>,
            ApiResponse<ServiceList>,
            ApiResponse<OrderList>,
            ApiResponse<CartList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Owners", description = "Pet owner accounts and profiles"),
        (name = "Providers", description = "Service provider accounts and profiles"),
        (name = "Cart", description = "Owner cart endpoints"),
        (name = "Orders", description = "Owner order endpoints"),
        (name = "Favorites", description = "Favorite endpoints"),
        (name = "Services", description = "Service catalog endpoints"),
        (name = "Deals", description = "Deal of the day and today's special"),
        (name = "Reviews", description = "Service review endpoints"),
        (name = "Provider Orders", description = "Orders received by providers"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
