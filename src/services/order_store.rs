use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    Client, Collection, IndexModel,
    bson::{Document, doc},
    options::{IndexOptions, ReturnDocument},
};

use crate::{
    entities::order::{self, OrderDocument, to_bson_datetime},
    error::OrderError,
    models::order::{CreateOrderRequest, Order, UpdateOrderRequest},
};

/// Database used when the connection string does not name one.
const DEFAULT_DATABASE: &str = "order_tracker";

/// MongoDB duplicate-key error code (unique index violation).
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Persistence seam for order records.
///
/// Each operation is atomic at single-record granularity only; the store
/// adds no transactions, locking, or retries on top of the backend.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new order after normalization and defaulting. Fails with
    /// a validation error when `orderId` is missing or already taken.
    async fn create(&self, request: CreateOrderRequest) -> Result<Order, OrderError>;

    async fn get_by_order_id(&self, order_id: &str) -> Result<Order, OrderError>;

    /// Returns every order, newest-created first.
    async fn list_all(&self) -> Result<Vec<Order>, OrderError>;

    /// Partial field replacement; absent fields stay untouched. Returns
    /// the post-update record.
    async fn update_by_order_id(
        &self,
        order_id: &str,
        changes: UpdateOrderRequest,
    ) -> Result<Order, OrderError>;

    /// Removes the record and returns it.
    async fn delete_by_order_id(&self, order_id: &str) -> Result<Order, OrderError>;
}

/// MongoDB-backed order store.
pub struct MongoOrderStore {
    collection: Collection<OrderDocument>,
}

impl MongoOrderStore {
    /// Connects to the deployment, verifies it is reachable, and ensures
    /// the unique index on `orderId` exists. Callers treat any failure
    /// here as fatal: the server must not accept traffic without a store.
    pub async fn connect(uri: &str) -> Result<Self, OrderError> {
        let client = Client::with_uri_str(uri).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        database.run_command(doc! { "ping": 1 }).await?;

        let collection = database.collection::<OrderDocument>(order::COLLECTION);
        let index = IndexModel::builder()
            .keys(doc! { "orderId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(index).await?;

        Ok(Self { collection })
    }

    fn filter(order_id: &str) -> Document {
        doc! { "orderId": order_id }
    }
}

#[async_trait]
impl OrderStore for MongoOrderStore {
    async fn create(&self, request: CreateOrderRequest) -> Result<Order, OrderError> {
        let order = request.into_order(Utc::now())?;
        let document = OrderDocument::from(order.clone());

        match self.collection.insert_one(&document).await {
            Ok(_) => Ok(order),
            Err(err) if is_duplicate_key(&err) => Err(OrderError::Validation(format!(
                "an order with orderId \"{}\" already exists",
                order.order_id
            ))),
            Err(err) => Err(err.into()),
        }
    }

    async fn get_by_order_id(&self, order_id: &str) -> Result<Order, OrderError> {
        self.collection
            .find_one(Self::filter(order_id))
            .await?
            .map(Order::from)
            .ok_or(OrderError::NotFound)
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        let documents: Vec<OrderDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;

        Ok(documents.into_iter().map(Order::from).collect())
    }

    async fn update_by_order_id(
        &self,
        order_id: &str,
        changes: UpdateOrderRequest,
    ) -> Result<Order, OrderError> {
        let changes = changes.normalized()?;

        let mut set = doc! { "updatedAt": to_bson_datetime(Utc::now()) };
        if let Some(value) = changes.order_id {
            set.insert("orderId", value);
        }
        if let Some(value) = changes.customer_name {
            set.insert("customerName", value);
        }
        if let Some(value) = changes.from {
            set.insert("from", value);
        }
        if let Some(value) = changes.to {
            set.insert("to", value);
        }
        if let Some(value) = changes.booked_on {
            set.insert("bookedOn", to_bson_datetime(value));
        }
        if let Some(value) = changes.payment {
            set.insert("payment", value);
        }
        if let Some(value) = changes.status {
            set.insert("status", value);
        }
        if let Some(value) = changes.eta {
            set.insert("eta", to_bson_datetime(value));
        }

        self.collection
            .find_one_and_update(Self::filter(order_id), doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .map(Order::from)
            .ok_or(OrderError::NotFound)
    }

    async fn delete_by_order_id(&self, order_id: &str) -> Result<Order, OrderError> {
        self.collection
            .find_one_and_delete(Self::filter(order_id))
            .await?
            .map(Order::from)
            .ok_or(OrderError::NotFound)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}
