//! Orders Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
#[cfg(test)]
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::{
    orders::OrderLine, payments::PaymentMethod, pricing::OrderSummary, products::ProductUuid,
    shipping::ShippingAddress,
};
use uuid::Uuid;

use crate::{
    database::{Db, price_from_row, price_to_i64, u32_from_row},
    domain::{
        orders::{
            data::NewOrderRecord,
            records::{OrderRecord, OrderUuid, PaymentResult},
        },
        users::records::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const SET_PAYMENT_INTENT_SQL: &str = include_str!("sql/set_payment_intent.sql");
const MARK_PAID_SQL: &str = include_str!("sql/mark_paid.sql");
const MARK_DELIVERED_SQL: &str = include_str!("sql/mark_delivered.sql");

/// Order persistence.
///
/// The `mark_*` and `set_payment_intent` operations are conditional updates:
/// they return `None` when the order does not exist or is already in the
/// target state, and never overwrite an earlier transition.
#[cfg_attr(test, automock)]
#[async_trait]
pub(crate) trait OrdersRepository: Send + Sync {
    /// Insert an order and its lines atomically.
    async fn create_order(&self, order: NewOrderRecord) -> Result<OrderRecord, sqlx::Error>;

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, sqlx::Error>;

    /// Orders newest first, optionally restricted to one user.
    async fn list_orders(&self, user: Option<UserUuid>) -> Result<Vec<OrderRecord>, sqlx::Error>;

    async fn set_payment_intent(
        &self,
        order: OrderUuid,
        intent: String,
    ) -> Result<Option<OrderRecord>, sqlx::Error>;

    async fn mark_paid(
        &self,
        order: OrderUuid,
        result: Option<PaymentResult>,
    ) -> Result<Option<OrderRecord>, sqlx::Error>;

    async fn mark_delivered(&self, order: OrderUuid) -> Result<Option<OrderRecord>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    db: Db,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn attach_items(
        tx: &mut Transaction<'_, Postgres>,
        rows: Vec<OrderRow>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = rows.iter().map(|row| row.uuid.into_uuid()).collect();

        let items = query_as::<Postgres, OrderItemRow>(LIST_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut grouped: FxHashMap<Uuid, Vec<OrderLine>> = FxHashMap::default();

        for item in items {
            grouped.entry(item.order_uuid).or_default().push(item.line);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let items = grouped.remove(&row.uuid.into_uuid()).unwrap_or_default();

                row.into_record(items)
            })
            .collect())
    }

    async fn one(
        &self,
        row: Result<Option<OrderRow>, sqlx::Error>,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let Some(row) = row? else {
            return Ok(None);
        };

        let mut tx = self.db.begin().await?;

        let record = Self::attach_items(&mut tx, vec![row]).await?.pop();

        tx.commit().await?;

        Ok(record)
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn create_order(&self, order: NewOrderRecord) -> Result<OrderRecord, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let summary = order.summary;
        let address = order.shipping_address;

        let row = query_as::<Postgres, OrderRow>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user.into_uuid())
            .bind(address.full_name)
            .bind(address.address)
            .bind(address.city)
            .bind(address.postal_code)
            .bind(address.country)
            .bind(order.payment_method.as_str())
            .bind(price_to_i64(summary.items_price)?)
            .bind(price_to_i64(summary.shipping_price)?)
            .bind(price_to_i64(summary.tax_price)?)
            .bind(price_to_i64(summary.total_price)?)
            .fetch_one(&mut *tx)
            .await?;

        for (position, line) in order.items.iter().enumerate() {
            let position = i32::try_from(position).map_err(|e| sqlx::Error::ColumnDecode {
                index: "position".to_string(),
                source: Box::new(e),
            })?;

            query(CREATE_ORDER_ITEM_SQL)
                .bind(order.uuid.into_uuid())
                .bind(position)
                .bind(line.product.into_uuid())
                .bind(&line.name)
                .bind(&line.slug)
                .bind(i64::from(line.qty))
                .bind(price_to_i64(line.price)?)
                .bind(&line.images)
                .bind(&line.color)
                .bind(&line.size)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(row.into_record(order.items))
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, sqlx::Error> {
        let row = query_as::<Postgres, OrderRow>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(self.db.pool())
            .await;

        self.one(row).await?.ok_or(sqlx::Error::RowNotFound)
    }

    async fn list_orders(&self, user: Option<UserUuid>) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let rows = query_as::<Postgres, OrderRow>(LIST_ORDERS_SQL)
            .bind(user.map(UserUuid::into_uuid))
            .fetch_all(&mut *tx)
            .await?;

        let orders = Self::attach_items(&mut tx, rows).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn set_payment_intent(
        &self,
        order: OrderUuid,
        intent: String,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let row = query_as::<Postgres, OrderRow>(SET_PAYMENT_INTENT_SQL)
            .bind(order.into_uuid())
            .bind(intent)
            .fetch_optional(self.db.pool())
            .await;

        self.one(row).await
    }

    async fn mark_paid(
        &self,
        order: OrderUuid,
        result: Option<PaymentResult>,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let (id, status, email) = match result {
            Some(result) => (Some(result.id), Some(result.status), result.email_address),
            None => (None, None, None),
        };

        let row = query_as::<Postgres, OrderRow>(MARK_PAID_SQL)
            .bind(order.into_uuid())
            .bind(id)
            .bind(status)
            .bind(email)
            .fetch_optional(self.db.pool())
            .await;

        self.one(row).await
    }

    async fn mark_delivered(&self, order: OrderUuid) -> Result<Option<OrderRecord>, sqlx::Error> {
        let row = query_as::<Postgres, OrderRow>(MARK_DELIVERED_SQL)
            .bind(order.into_uuid())
            .fetch_optional(self.db.pool())
            .await;

        self.one(row).await
    }
}

/// An `orders` row before its lines are attached.
struct OrderRow {
    uuid: OrderUuid,
    user: UserUuid,
    shipping_address: ShippingAddress,
    payment_method: PaymentMethod,
    payment_intent_id: Option<String>,
    payment_result: Option<PaymentResult>,
    summary: OrderSummary,
    paid_at: Option<jiff::Timestamp>,
    delivered_at: Option<jiff::Timestamp>,
    created_at: jiff::Timestamp,
    updated_at: jiff::Timestamp,
}

impl OrderRow {
    fn into_record(self, items: Vec<OrderLine>) -> OrderRecord {
        OrderRecord {
            uuid: self.uuid,
            user: self.user,
            items,
            shipping_address: self.shipping_address,
            payment_method: self.payment_method,
            payment_intent_id: self.payment_intent_id,
            payment_result: self.payment_result,
            summary: self.summary,
            is_paid: self.paid_at.is_some(),
            paid_at: self.paid_at,
            is_delivered: self.delivered_at.is_some(),
            delivered_at: self.delivered_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let payment_method: String = row.try_get("payment_method")?;
        let payment_method =
            payment_method
                .parse::<PaymentMethod>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "payment_method".to_string(),
                    source: Box::new(e),
                })?;

        let payment_result_id: Option<String> = row.try_get("payment_result_id")?;
        let payment_result_status: Option<String> = row.try_get("payment_result_status")?;

        let payment_result = payment_result_id
            .zip(payment_result_status)
            .map(|(id, status)| -> sqlx::Result<PaymentResult> {
                Ok(PaymentResult {
                    id,
                    status,
                    email_address: row.try_get("payment_result_email")?,
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            shipping_address: ShippingAddress {
                full_name: row.try_get("shipping_full_name")?,
                address: row.try_get("shipping_address")?,
                city: row.try_get("shipping_city")?,
                postal_code: row.try_get("shipping_postal_code")?,
                country: row.try_get("shipping_country")?,
            },
            payment_method,
            payment_intent_id: row.try_get("payment_intent_id")?,
            payment_result,
            summary: OrderSummary {
                items_price: price_from_row(row, "items_price")?,
                shipping_price: price_from_row(row, "shipping_price")?,
                tax_price: price_from_row(row, "tax_price")?,
                total_price: price_from_row(row, "total_price")?,
            },
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
            delivered_at: row
                .try_get::<Option<SqlxTimestamp>, _>("delivered_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

/// An `order_items` row keyed by its order.
struct OrderItemRow {
    order_uuid: Uuid,
    line: OrderLine,
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: row.try_get("order_uuid")?,
            line: OrderLine {
                product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                name: row.try_get("name")?,
                slug: row.try_get("slug")?,
                qty: u32_from_row(row, "qty")?,
                price: price_from_row(row, "price")?,
                images: row.try_get("images")?,
                color: row.try_get("color")?,
                size: row.try_get("size")?,
            },
        })
    }
}
