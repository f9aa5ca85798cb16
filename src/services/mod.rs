pub mod account_service;
pub mod address_service;
pub mod card_service;
pub mod cart_service;
pub mod catalog_service;
pub mod coupon_service;
pub mod favorite_service;
pub mod order_service;
