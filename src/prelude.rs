//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartItem, CartStorage, CartStorageError, CartStore, CartStoreError,
        JsonFileCartStorage, MemoryCartStorage,
    },
    checkout::{CheckoutStep, Destination, StepGuard, enter, furthest_step},
    orders::{OrderDraft, OrderDraftError, OrderLine, merge_lines},
    payments::{PaymentMethod, UnknownPaymentMethod},
    prices::{Price, PriceError},
    pricing::{OrderSummary, PricedLine, PricingError, PricingPolicy},
    products::{Product, ProductUuid},
    shipping::{AddressField, ShippingAddress, ShippingAddressError},
    uuids::TypedUuid,
};
