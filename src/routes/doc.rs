use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        accounts::{
            ChangePasswordRequest, ChangePasswordResponse, ClientResponse, LoggedAdmin,
            LoggedUser, LoginRequest, ResetPasswordRequest, ResetPasswordResponse, ResetUser,
            UpdateProfileRequest, UserCount, UserForm,
        },
        addresses::{AddressFields, CreateAddressRequest},
        cards::{AddCardRequest, CardCreated},
        cart::{AddToCartRequest, RemoveProductRequest, UpdateCartItemRequest},
        catalog::{
            AddPromotionRequest, CreateProductRequest, ProductsEnvelope, PromotedProduct,
            UpdatePromotionRequest, UpdateProductRequest,
        },
        coupons::{CouponForm, CouponsEnvelope, ValidateCouponRequest},
        favorites::{AddFavoriteRequest, FavoriteCreated},
        orders::{
            CreateOrderRequest, CreateOrderResponse, OrderItemRequest, OrderWithItems,
            UpdateOrderStatusRequest,
        },
    },
    models::{Address, CartLine, Category, Coupon, FavoriteProduct, Order, OrderLine, Product, User},
    response::{ErrorBody, MensagemResponse, MessageResponse, StatusResponse},
    routes::{accounts, addresses, cards, cart, catalog, coupons, favorites, health, orders},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::db_check,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_line_item,
        cart::remove_product,
        cart::clear_cart,
        orders::create_order,
        orders::list_orders,
        orders::list_all_orders,
        orders::update_order_status,
        accounts::register,
        accounts::login,
        accounts::login_admin,
        accounts::get_user,
        accounts::update_profile,
        accounts::change_password,
        accounts::reset_password,
        accounts::list_reset_attempts,
        accounts::clear_reset_attempts,
        accounts::list_users,
        accounts::edit_user,
        accounts::delete_user,
        accounts::add_user,
        accounts::get_client,
        accounts::delete_client,
        accounts::count_users,
        addresses::list_addresses,
        addresses::add_address,
        addresses::update_address,
        addresses::delete_address,
        catalog::create_product,
        catalog::get_products,
        catalog::list_products,
        catalog::update_product,
        catalog::delete_product,
        catalog::list_by_category,
        catalog::list_categories,
        catalog::list_promotions,
        catalog::add_promotion,
        catalog::update_promotion,
        catalog::remove_promotion,
        coupons::list_coupons,
        coupons::create_coupon,
        coupons::update_coupon,
        coupons::delete_coupon,
        coupons::validate_coupon,
        favorites::list_favorites,
        favorites::add_favorite,
        favorites::remove_favorite,
        cards::add_card
    ),
    components(
        schemas(
            User,
            Address,
            Product,
            Category,
            Coupon,
            FavoriteProduct,
            CartLine,
            Order,
            OrderLine,
            OrderWithItems,
            AddToCartRequest,
            UpdateCartItemRequest,
            RemoveProductRequest,
            CreateOrderRequest,
            OrderItemRequest,
            CreateOrderResponse,
            UpdateOrderStatusRequest,
            UserForm,
            LoginRequest,
            LoggedUser,
            LoggedAdmin,
            UpdateProfileRequest,
            ChangePasswordRequest,
            ChangePasswordResponse,
            ResetPasswordRequest,
            ResetPasswordResponse,
            ResetUser,
            UserCount,
            ClientResponse,
            AddressFields,
            CreateAddressRequest,
            CreateProductRequest,
            UpdateProductRequest,
            ProductsEnvelope,
            AddPromotionRequest,
            UpdatePromotionRequest,
            PromotedProduct,
            CouponForm,
            CouponsEnvelope,
            ValidateCouponRequest,
            AddFavoriteRequest,
            FavoriteCreated,
            AddCardRequest,
            CardCreated,
            health::HealthData,
            health::DbCheck,
            ErrorBody,
            StatusResponse,
            MessageResponse,
            MensagemResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database checks"),
        (name = "Cart", description = "Shopping cart endpoints"),
        (name = "Orders", description = "Order placement and reports"),
        (name = "Accounts", description = "Sign-up, login and password endpoints"),
        (name = "Admin", description = "User management for administrators"),
        (name = "Addresses", description = "Delivery address endpoints"),
        (name = "Catalog", description = "Product endpoints"),
        (name = "Promotions", description = "Promotion endpoints"),
        (name = "Coupons", description = "Coupon endpoints"),
        (name = "Favorites", description = "Favorite endpoints"),
        (name = "Cards", description = "Payment card endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
