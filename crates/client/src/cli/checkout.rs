use std::sync::Arc;

use clap::{Args, Subcommand};
use storefront::{
    checkout::{CheckoutStep, Destination, StepGuard, enter, furthest_step},
    payments::PaymentMethod,
    prices::Price,
    pricing::PricingPolicy,
    shipping::ShippingAddress,
};
use storefront_client::{OrderSubmitter, PlacedOrder};

use super::Session;

#[derive(Debug, Args)]
pub(crate) struct CheckoutCommand {
    #[command(subcommand)]
    command: CheckoutSubcommand,
}

#[derive(Debug, Subcommand)]
enum CheckoutSubcommand {
    /// Show which checkout steps are reachable
    Status,

    /// Save the shipping address
    Shipping(ShippingArgs),

    /// Choose how to pay
    Payment(PaymentArgs),

    /// Place the cart as an order
    PlaceOrder,
}

#[derive(Debug, Args)]
struct ShippingArgs {
    #[arg(long)]
    full_name: String,

    #[arg(long)]
    address: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    postal_code: String,

    #[arg(long)]
    country: String,
}

#[derive(Debug, Args)]
struct PaymentArgs {
    /// PayPal, Stripe or CashOnDelivery
    #[arg(long)]
    method: PaymentMethod,
}

fn guard(step: CheckoutStep, session: &Session) -> Result<(), String> {
    let store = session.cart()?;

    match enter(step, store.cart()) {
        StepGuard::Proceed => Ok(()),
        StepGuard::Redirect(Destination::Storefront) => {
            Err("your cart is empty; add something first".to_string())
        }
        StepGuard::Redirect(Destination::Step(earlier)) => {
            Err(format!("complete the {earlier} step first"))
        }
    }
}

pub(crate) async fn run(session: &Session, command: CheckoutCommand) -> Result<(), String> {
    match command.command {
        CheckoutSubcommand::Status => {
            let store = session.cart()?;

            for step in CheckoutStep::ALL {
                let marker = if enter(step, store.cart()) == StepGuard::Proceed {
                    "open"
                } else {
                    "locked"
                };

                println!("{step}: {marker}");
            }

            println!("next: {}", furthest_step(store.cart()));
        }
        CheckoutSubcommand::Shipping(args) => {
            guard(CheckoutStep::Shipping, session)?;

            session
                .cart()?
                .save_shipping_address(ShippingAddress {
                    full_name: args.full_name,
                    address: args.address,
                    city: args.city,
                    postal_code: args.postal_code,
                    country: args.country,
                })
                .map_err(|error| format!("invalid shipping address: {error}"))?;

            println!("shipping address saved");
        }
        CheckoutSubcommand::Payment(args) => {
            guard(CheckoutStep::Payment, session)?;

            session
                .cart()?
                .save_payment_method(args.method)
                .map_err(|error| format!("failed to save payment method: {error}"))?;

            println!("payment_method: {}", args.method);
        }
        CheckoutSubcommand::PlaceOrder => {
            guard(CheckoutStep::PlaceOrder, session)?;

            let submitter = OrderSubmitter::new(Arc::new(session.gateway()?));
            let mut store = session.cart()?;

            let order = submitter
                .submit(&mut store, &PricingPolicy::default())
                .await
                .map_err(|error| format!("failed to place order: {error}"))?;

            for line in placed_order_lines(&order) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn placed_order_lines(order: &PlacedOrder) -> [String; 3] {
    [
        format!("order_uuid: {}", order.uuid),
        format!("payment_method: {}", order.payment_method),
        format!("total_price: {}", Price::from_minor(order.total_price)),
    ]
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn placed_order_total_is_shown_in_currency() {
        let order = PlacedOrder {
            uuid: Uuid::nil(),
            payment_method: "PayPal".to_string(),
            items_price: 30_000,
            shipping_price: 0,
            tax_price: 5_000,
            total_price: 35_000,
            is_paid: false,
            paid_at: None,
            is_delivered: false,
            delivered_at: None,
            created_at: "2026-10-16T09:00:00Z".to_string(),
        };

        let [_, method, total] = placed_order_lines(&order);

        assert_eq!(method, "payment_method: PayPal");
        assert_eq!(total, "total_price: $350.00");
    }
}
