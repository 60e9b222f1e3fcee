//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use storefront::{
    orders::OrderLine, payments::PaymentMethod, prices::Price, pricing::OrderSummary,
    shipping::ShippingAddress,
};
use storefront_app::{
    auth::{Caller, MockAuthService},
    context::AppContext,
    domain::{
        fulfillment::MockFulfillmentService,
        orders::{
            MockOrdersService,
            records::{OrderRecord, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserUuid},
        },
    },
    payments::MockPaymentsService,
};

use crate::{extensions::*, state::State};

/// One mock per application service. Each starts strict: any call not set up
/// by the test fails it.
pub(crate) struct Mocks {
    pub(crate) products: MockProductsService,
    pub(crate) users: MockUsersService,
    pub(crate) orders: MockOrdersService,
    pub(crate) fulfillment: MockFulfillmentService,
    pub(crate) payments: MockPaymentsService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn new() -> Self {
        Self {
            products: MockProductsService::new(),
            users: MockUsersService::new(),
            orders: MockOrdersService::new(),
            fulfillment: MockFulfillmentService::new(),
            payments: MockPaymentsService::new(),
            auth: MockAuthService::new(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            users: Arc::new(self.users),
            orders: Arc::new(self.orders),
            fulfillment: Arc::new(self.fulfillment),
            payments: Arc::new(self.payments),
            auth: Arc::new(self.auth),
        })
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::new()
    }
    .into_state()
}

/// Authenticates every request as a fixed caller.
pub(crate) struct InjectCaller(pub(crate) Caller);

#[handler]
impl InjectCaller {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_caller(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

/// Service with the mocks injected and no authentication.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// Service with the mocks injected and every request made by `caller`.
pub(crate) fn service_as(caller: Caller, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectCaller(caller))
            .push(route),
    )
}

pub(crate) fn buyer() -> Caller {
    Caller {
        user: UserUuid::new(),
        is_admin: false,
    }
}

pub(crate) fn admin() -> Caller {
    Caller {
        user: UserUuid::new(),
        is_admin: true,
    }
}

pub(crate) fn address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Katherine Johnson".to_string(),
        address: "1 NASA Drive".to_string(),
        city: "Hampton".to_string(),
        postal_code: "23681".to_string(),
        country: "United States".to_string(),
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Trail Runner".to_string(),
        slug: "trail-runner".to_string(),
        category: "Shoes".to_string(),
        brand: "Storefront".to_string(),
        description: "Light trail shoe.".to_string(),
        images: vec!["/images/trail-runner.jpg".to_string()],
        price: Price::from_major(50),
        count_in_stock: 12,
        is_featured: true,
        colors: vec!["blue".to_string()],
        sizes: vec!["42".to_string(), "43".to_string()],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_user(uuid: UserUuid) -> UserRecord {
    UserRecord {
        uuid,
        name: "Mary Jackson".to_string(),
        email: "mary@example.com".to_string(),
        is_admin: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, user: UserUuid) -> OrderRecord {
    OrderRecord {
        uuid,
        user,
        items: vec![OrderLine {
            product: ProductUuid::new(),
            name: "Trail Runner".to_string(),
            slug: "trail-runner".to_string(),
            qty: 2,
            price: Price::from_major(50),
            images: vec!["/images/trail-runner.jpg".to_string()],
            color: None,
            size: Some("42".to_string()),
        }],
        shipping_address: address(),
        payment_method: PaymentMethod::PayPal,
        payment_intent_id: None,
        payment_result: None,
        summary: OrderSummary {
            items_price: Price::from_major(100),
            shipping_price: Price::from_major(250),
            tax_price: Price::ZERO,
            total_price: Price::from_major(350),
        },
        is_paid: false,
        paid_at: None,
        is_delivered: false,
        delivered_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
