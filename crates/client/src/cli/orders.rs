use clap::{Args, Subcommand};
use storefront::prices::Price;
use storefront_client::{OrderGateway, PlacedOrder};
use uuid::Uuid;

use super::Session;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List your orders
    Mine,

    /// Open a PayPal order for an unpaid order
    Pay {
        /// Order UUID
        #[arg(long)]
        order: Uuid,
    },

    /// Capture an approved PayPal order
    Capture {
        /// Order UUID
        #[arg(long)]
        order: Uuid,

        /// PayPal order id returned by `pay` after approval
        #[arg(long)]
        approval: String,
    },
}

pub(crate) async fn run(session: &Session, command: OrdersCommand) -> Result<(), String> {
    let gateway = session.gateway()?;

    match command.command {
        OrdersSubcommand::Mine => {
            let orders = gateway
                .my_orders()
                .await
                .map_err(|error| format!("failed to list orders: {error}"))?;

            if orders.is_empty() {
                println!("no orders yet");
            }

            for order in &orders {
                print_order(order);
            }
        }
        OrdersSubcommand::Pay { order } => {
            let id = gateway
                .create_payment(order)
                .await
                .map_err(|error| format!("failed to start payment: {error}"))?;

            println!("paypal_order_id: {id}");
        }
        OrdersSubcommand::Capture { order, approval } => {
            let order = gateway
                .capture_payment(order, &approval)
                .await
                .map_err(|error| format!("failed to capture payment: {error}"))?;

            print_order(&order);
        }
    }

    Ok(())
}

fn print_order(order: &PlacedOrder) {
    let paid = order.paid_at.as_deref().unwrap_or("no");
    let delivered = order.delivered_at.as_deref().unwrap_or("no");

    println!(
        "{} {} total={} paid={paid} delivered={delivered} placed={}",
        order.uuid,
        order.payment_method,
        Price::from_minor(order.total_price),
        order.created_at,
    );
}
