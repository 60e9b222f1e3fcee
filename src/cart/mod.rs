//! Cart
//!
//! [`CartStore`] is an explicit, injectable container for the shopper's cart.
//! It loads once when opened and saves through its [`CartStorage`] after every
//! mutation. A mutation whose save fails leaves the in-memory cart unchanged.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    payments::PaymentMethod,
    prices::Price,
    pricing::{self, OrderSummary, PricingError, PricingPolicy},
    shipping::{ShippingAddress, ShippingAddressError},
};

pub mod items;
pub mod storage;

pub use items::CartItem;
pub use storage::{CartStorage, CartStorageError, JsonFileCartStorage, MemoryCartStorage};

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The cart could not be persisted.
    #[error(transparent)]
    Storage(#[from] CartStorageError),

    /// Shipping address failed validation.
    #[error(transparent)]
    InvalidShippingAddress(#[from] ShippingAddressError),

    /// Quantity would exceed `u32::MAX`.
    #[error("quantity of {slug} cannot be increased further")]
    QuantityOverflow {
        /// Slug of the item
        slug: String,
    },
}

/// Items, shipping address and payment method staged for checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Items in display order
    #[serde(default)]
    pub items: SmallVec<[CartItem; 4]>,

    /// Saved shipping address
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,

    /// Chosen payment method
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

impl Cart {
    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the item matching a product variant.
    pub fn find(&self, item: &CartItem) -> Option<&CartItem> {
        self.items.iter().find(|existing| existing.same_variant(item))
    }

    /// Total number of units across all items.
    pub fn total_qty(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    /// Sum of `price x qty` over all items.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the sum overflows.
    pub fn items_price(&self) -> Result<Price, PricingError> {
        pricing::items_price(&self.items)
    }

    /// Full price breakdown under a pricing policy.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any sum overflows.
    pub fn summary(&self, policy: &PricingPolicy) -> Result<OrderSummary, PricingError> {
        policy.summarize(self.items_price()?)
    }
}

/// Persisted cart store.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    storage: S,
    cart: Cart,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the store, loading the saved cart or starting empty.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStorageError`] if the saved cart cannot be read.
    pub fn open(storage: S) -> Result<Self, CartStorageError> {
        let cart = storage.load()?.unwrap_or_default();

        Ok(Self { storage, cart })
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Add one unit of an item. A new variant is appended with quantity 1,
    /// an existing one has its quantity incremented.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity overflows or the cart cannot be saved.
    pub fn add_or_increase(&mut self, item: CartItem) -> Result<(), CartStoreError> {
        let mut cart = self.cart.clone();

        match cart.items.iter_mut().find(|existing| existing.same_variant(&item)) {
            Some(existing) => {
                existing.qty =
                    existing
                        .qty
                        .checked_add(1)
                        .ok_or_else(|| CartStoreError::QuantityOverflow {
                            slug: existing.slug.clone(),
                        })?;
            }
            None => cart.items.push(CartItem { qty: 1, ..item }),
        }

        self.commit(cart)
    }

    /// Remove one unit of an item. An item at quantity 1 is removed; an item
    /// not in the cart is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    pub fn decrease(&mut self, item: &CartItem) -> Result<(), CartStoreError> {
        let Some(position) = self
            .cart
            .items
            .iter()
            .position(|existing| existing.same_variant(item))
        else {
            return Ok(());
        };

        let mut cart = self.cart.clone();

        if let Some(existing) = cart.items.get_mut(position) {
            if existing.qty > 1 {
                existing.qty -= 1;
            } else {
                cart.items.remove(position);
            }
        }

        self.commit(cart)
    }

    /// Remove every item. The shipping address and payment method are kept
    /// for the next checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        let cart = Cart {
            items: SmallVec::new(),
            ..self.cart.clone()
        };

        self.commit(cart)
    }

    /// Validate and save a shipping address, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or the cart cannot be saved.
    pub fn save_shipping_address(&mut self, address: ShippingAddress) -> Result<(), CartStoreError> {
        address.validate()?;

        let cart = Cart {
            shipping_address: Some(address),
            ..self.cart.clone()
        };

        self.commit(cart)
    }

    /// Save the chosen payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be saved.
    pub fn save_payment_method(&mut self, method: PaymentMethod) -> Result<(), CartStoreError> {
        let cart = Cart {
            payment_method: Some(method),
            ..self.cart.clone()
        };

        self.commit(cart)
    }

    /// Sum of `price x qty`, recomputed on every call.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the sum overflows.
    pub fn items_price(&self) -> Result<Price, PricingError> {
        self.cart.items_price()
    }

    /// Price breakdown under a pricing policy.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if any sum overflows.
    pub fn summary(&self, policy: &PricingPolicy) -> Result<OrderSummary, PricingError> {
        self.cart.summary(policy)
    }

    fn commit(&mut self, cart: Cart) -> Result<(), CartStoreError> {
        self.storage.save(&cart)?;
        self.cart = cart;

        Ok(())
    }
}
