//! Test Helpers

use storefront::{payments::PaymentMethod, shipping::ShippingAddress};

use crate::{
    auth::{AdminCaller, Caller},
    domain::{
        orders::{
            OrdersService,
            data::{NewOrder, NewOrderItem},
            records::OrderRecord,
        },
        products::{
            ProductsService,
            data::{NewProduct, tests::details},
            records::{ProductRecord, ProductUuid},
        },
        users::{UsersService, data::NewUser, records::UserUuid},
    },
    test::TestContext,
};

pub(crate) async fn create_user(ctx: &TestContext, email: &str, is_admin: bool) -> Caller {
    let user = ctx
        .users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: "Test Shopper".to_string(),
            email: email.to_string(),
            is_admin,
        })
        .await
        .expect("Failed to create test user");

    Caller {
        user: user.uuid,
        is_admin: user.is_admin,
    }
}

pub(crate) async fn create_admin(ctx: &TestContext) -> AdminCaller {
    create_user(ctx, "admin@example.com", true)
        .await
        .require_admin()
        .expect("test admin is an administrator")
}

pub(crate) async fn create_product(ctx: &TestContext, slug: &str) -> ProductRecord {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            details: details(slug),
        })
        .await
        .expect("Failed to create test product")
}

pub(crate) fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Annie Easley".to_string(),
        address: "21000 Brookpark Road".to_string(),
        city: "Cleveland".to_string(),
        postal_code: "44135".to_string(),
        country: "United States".to_string(),
    }
}

pub(crate) fn new_order(products: &[ProductUuid]) -> NewOrder {
    NewOrder {
        shipping_address: shipping_address(),
        payment_method: PaymentMethod::CashOnDelivery,
        items: products
            .iter()
            .map(|product| NewOrderItem {
                product: *product,
                qty: 1,
                color: None,
                size: None,
            })
            .collect(),
    }
}

pub(crate) async fn place_order(ctx: &TestContext, caller: Caller, product: ProductUuid) -> OrderRecord {
    ctx.orders
        .place_order(caller, new_order(&[product]))
        .await
        .expect("Failed to place test order")
}
