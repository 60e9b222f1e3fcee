//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use storefront::{
    orders::{OrderLine, merge_lines},
    pricing::PricingPolicy,
    products::{Product, ProductUuid},
};
use tracing::info;

use crate::{
    auth::{AdminCaller, Caller},
    database::Db,
    domain::{
        orders::{
            data::{NewOrder, NewOrderRecord},
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repository::{OrdersRepository, PgOrdersRepository},
        },
        products::ProductsService,
        users::records::UserUuid,
    },
};

#[derive(Clone)]
pub struct PgOrdersService {
    repository: Arc<dyn OrdersRepository>,
    catalog: Arc<dyn ProductsService>,
    pricing: PricingPolicy,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, catalog: Arc<dyn ProductsService>, pricing: PricingPolicy) -> Self {
        Self {
            repository: Arc::new(PgOrdersRepository::new(db)),
            catalog,
            pricing,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_repository(
        repository: Arc<dyn OrdersRepository>,
        catalog: Arc<dyn ProductsService>,
        pricing: PricingPolicy,
    ) -> Self {
        Self {
            repository,
            catalog,
            pricing,
        }
    }

    /// Resolve requested lines against the catalog, failing if any product
    /// is unknown.
    async fn price_lines(&self, order: &NewOrder) -> Result<Vec<OrderLine>, OrdersServiceError> {
        let mut requested: Vec<ProductUuid> = order.items.iter().map(|item| item.product).collect();

        requested.sort_unstable();
        requested.dedup();

        let found = self
            .catalog
            .find_products_by_ids(&requested)
            .await
            .map_err(OrdersServiceError::Catalog)?;

        let catalog: FxHashMap<ProductUuid, Product> = found
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        let unknown: Vec<ProductUuid> = requested
            .into_iter()
            .filter(|uuid| !catalog.contains_key(uuid))
            .collect();

        if !unknown.is_empty() {
            return Err(OrdersServiceError::UnknownProducts(unknown));
        }

        let lines = order
            .items
            .iter()
            .filter_map(|item| {
                catalog.get(&item.product).map(|product| OrderLine {
                    product: product.uuid,
                    name: product.name.clone(),
                    slug: product.slug.clone(),
                    qty: item.qty,
                    price: product.price,
                    images: product.images.clone(),
                    color: item.color.clone(),
                    size: item.size.clone(),
                })
            })
            .collect();

        Ok(merge_lines(lines)?)
    }
}

impl std::fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("pricing", &self.pricing)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        caller: Caller,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        order.shipping_address.validate()?;

        if order.items.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        if order.items.iter().any(|item| item.qty == 0) {
            return Err(OrdersServiceError::InvalidQuantity);
        }

        let items = self.price_lines(&order).await?;
        let summary = self.pricing.summarize_lines(&items)?;

        let created = self
            .repository
            .create_order(NewOrderRecord {
                uuid: OrderUuid::new(),
                user: caller.user,
                items,
                shipping_address: order.shipping_address,
                payment_method: order.payment_method,
                summary,
            })
            .await?;

        info!(
            order = %created.uuid,
            user = %created.user,
            total = %created.summary.total_price,
            "placed order"
        );

        Ok(created)
    }

    async fn get_order(
        &self,
        caller: Caller,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let record = self.repository.get_order(order).await?;

        if !caller.is_admin && !record.is_owned_by(caller.user) {
            return Err(OrdersServiceError::NotFound);
        }

        Ok(record)
    }

    async fn list_my_orders(&self, caller: Caller) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        Ok(self.repository.list_orders(Some(caller.user)).await?)
    }

    async fn list_orders(
        &self,
        _admin: AdminCaller,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        Ok(self.repository.list_orders(None).await?)
    }

    async fn list_user_orders(
        &self,
        _admin: AdminCaller,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        Ok(self.repository.list_orders(Some(user)).await?)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Price an order from the catalog and persist it for the caller.
    async fn place_order(
        &self,
        caller: Caller,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve an order visible to the caller: their own, or any for admins.
    async fn get_order(
        &self,
        caller: Caller,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The caller's orders, newest first.
    async fn list_my_orders(&self, caller: Caller) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order, newest first.
    async fn list_orders(&self, admin: AdminCaller)
    -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// One user's orders, newest first.
    async fn list_user_orders(
        &self,
        admin: AdminCaller,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use storefront::{
        payments::PaymentMethod, prices::Price, pricing::OrderSummary, shipping::ShippingAddress,
    };
    use testresult::TestResult;

    use crate::domain::{
        orders::{data::NewOrderItem, repository::MockOrdersRepository},
        products::MockProductsService,
    };

    use super::*;

    pub(crate) fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Grace Hopper".to_string(),
            address: "1 Navy Yard Road".to_string(),
            city: "Arlington".to_string(),
            postal_code: "22202".to_string(),
            country: "United States".to_string(),
        }
    }

    pub(crate) fn order_record(user: UserUuid) -> OrderRecord {
        OrderRecord {
            uuid: OrderUuid::new(),
            user,
            items: Vec::new(),
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

    fn product(slug: &str, major: u64) -> Product {
        Product {
            uuid: ProductUuid::new(),
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            price: Price::from_major(major),
            images: vec![format!("/images/{slug}.jpg")],
        }
    }

    fn item(product: &Product, qty: u32) -> NewOrderItem {
        NewOrderItem {
            product: product.uuid,
            qty,
            color: None,
            size: None,
        }
    }

    fn buyer() -> Caller {
        Caller {
            user: UserUuid::new(),
            is_admin: false,
        }
    }

    fn persisted(order: NewOrderRecord) -> OrderRecord {
        OrderRecord {
            uuid: order.uuid,
            user: order.user,
            items: order.items,
            shipping_address: order.shipping_address,
            payment_method: order.payment_method,
            summary: order.summary,
            ..order_record(order.user)
        }
    }

    fn service(repository: MockOrdersRepository, catalog: MockProductsService) -> PgOrdersService {
        PgOrdersService::with_repository(
            Arc::new(repository),
            Arc::new(catalog),
            PricingPolicy::default(),
        )
    }

    #[tokio::test]
    async fn place_order_prices_from_the_catalog() -> TestResult {
        let boots = product("boots", 50);
        let caller = buyer();

        let mut catalog = MockProductsService::new();
        let found = boots.clone();

        catalog
            .expect_find_products_by_ids()
            .once()
            .withf({
                let uuid = boots.uuid;
                move |ids| ids.len() == 1 && ids.contains(&uuid)
            })
            .return_once(move |_| Ok(vec![found]));

        let mut repository = MockOrdersRepository::new();

        repository
            .expect_create_order()
            .once()
            .withf(move |order| {
                order.user == caller.user
                    && order.items.len() == 1
                    && order.summary.total_price == Price::from_major(350)
            })
            .return_once(|order| Ok(persisted(order)));

        // Client-side duplicates of one variant merge into a single line.
        let order = NewOrder {
            shipping_address: address(),
            payment_method: PaymentMethod::PayPal,
            items: vec![item(&boots, 1), item(&boots, 1)],
        };

        let created = service(repository, catalog)
            .place_order(caller, order)
            .await?;

        assert_eq!(created.items.first().map(|line| line.qty), Some(2));
        assert_eq!(created.items.first().map(|line| line.price), Some(boots.price));
        assert!(!created.is_paid);
        assert!(!created.is_delivered);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_products_fail_the_whole_order() {
        let boots = product("boots", 50);
        let ghost = ProductUuid::new();

        let mut catalog = MockProductsService::new();
        let found = boots.clone();

        catalog
            .expect_find_products_by_ids()
            .once()
            .return_once(move |_| Ok(vec![found]));

        let mut repository = MockOrdersRepository::new();

        repository.expect_create_order().never();

        let order = NewOrder {
            shipping_address: address(),
            payment_method: PaymentMethod::Stripe,
            items: vec![
                item(&boots, 1),
                NewOrderItem {
                    product: ghost,
                    qty: 1,
                    color: None,
                    size: None,
                },
            ],
        };

        let result = service(repository, catalog).place_order(buyer(), order).await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::UnknownProducts(ref unknown)) if unknown == &[ghost]
        ));
    }

    #[tokio::test]
    async fn empty_orders_and_zero_quantities_are_rejected() {
        let boots = product("boots", 50);

        let mut catalog = MockProductsService::new();
        catalog.expect_find_products_by_ids().never();

        let mut repository = MockOrdersRepository::new();
        repository.expect_create_order().never();

        let service = service(repository, catalog);

        let empty = NewOrder {
            shipping_address: address(),
            payment_method: PaymentMethod::PayPal,
            items: Vec::new(),
        };
        let zero = NewOrder {
            items: vec![item(&boots, 0)],
            ..empty.clone()
        };

        assert!(matches!(
            service.place_order(buyer(), empty).await,
            Err(OrdersServiceError::EmptyOrder)
        ));
        assert!(matches!(
            service.place_order(buyer(), zero).await,
            Err(OrdersServiceError::InvalidQuantity)
        ));
    }

    #[tokio::test]
    async fn invalid_addresses_are_rejected_before_the_catalog() {
        let boots = product("boots", 50);

        let mut catalog = MockProductsService::new();
        catalog.expect_find_products_by_ids().never();

        let mut repository = MockOrdersRepository::new();
        repository.expect_create_order().never();

        let order = NewOrder {
            shipping_address: ShippingAddress {
                postal_code: String::new(),
                ..address()
            },
            payment_method: PaymentMethod::PayPal,
            items: vec![item(&boots, 1)],
        };

        let result = service(repository, catalog).place_order(buyer(), order).await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::InvalidShippingAddress(_))
        ));
    }

    #[tokio::test]
    async fn other_users_orders_are_hidden() {
        let owner = buyer();
        let record = order_record(owner.user);
        let uuid = record.uuid;

        let mut repository = MockOrdersRepository::new();

        repository
            .expect_get_order()
            .once()
            .withf(move |order| *order == uuid)
            .return_once(move |_| Ok(record));

        let result = service(repository, MockProductsService::new())
            .get_order(buyer(), uuid)
            .await;

        assert!(matches!(result, Err(OrdersServiceError::NotFound)));
    }

    #[tokio::test]
    async fn admins_see_any_order() -> TestResult {
        let record = order_record(UserUuid::new());
        let uuid = record.uuid;
        let admin = Caller {
            user: UserUuid::new(),
            is_admin: true,
        };

        let mut repository = MockOrdersRepository::new();

        repository
            .expect_get_order()
            .once()
            .return_once(move |_| Ok(record));

        let found = service(repository, MockProductsService::new())
            .get_order(admin, uuid)
            .await?;

        assert_eq!(found.uuid, uuid);

        Ok(())
    }

    #[tokio::test]
    async fn my_orders_are_scoped_to_the_caller() -> TestResult {
        let caller = buyer();

        let mut repository = MockOrdersRepository::new();

        repository
            .expect_list_orders()
            .once()
            .withf(move |user| *user == Some(caller.user))
            .return_once(move |_| Ok(vec![order_record(caller.user)]));

        let orders = service(repository, MockProductsService::new())
            .list_my_orders(caller)
            .await?;

        assert_eq!(orders.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn admin_listing_is_unscoped() -> TestResult {
        let admin = Caller {
            user: UserUuid::new(),
            is_admin: true,
        }
        .require_admin()?;

        let mut repository = MockOrdersRepository::new();

        repository
            .expect_list_orders()
            .once()
            .withf(|user| user.is_none())
            .return_once(|_| Ok(Vec::new()));

        let orders = service(repository, MockProductsService::new())
            .list_orders(admin)
            .await?;

        assert!(orders.is_empty());

        Ok(())
    }
}
