use clap::{Args, Subcommand};
use storefront::{
    cart::{Cart, CartItem},
    pricing::PricingPolicy,
};
use storefront_client::OrderGateway;
use uuid::Uuid;

use super::Session;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add one unit of a product variant
    Add(VariantArgs),

    /// Remove one unit of an item
    Decrease(SlugArgs),

    /// Show the cart and its totals
    Show,

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct VariantArgs {
    /// Product UUID
    #[arg(long)]
    product: Uuid,

    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    size: Option<String>,
}

#[derive(Debug, Args)]
struct SlugArgs {
    /// Product slug as shown in the cart
    #[arg(long)]
    slug: String,

    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    size: Option<String>,
}

pub(crate) async fn run(session: &Session, command: CartCommand) -> Result<(), String> {
    let mut store = session.cart()?;

    match command.command {
        CartSubcommand::Add(args) => {
            let product = session
                .gateway()?
                .fetch_product(args.product.into())
                .await
                .map_err(|error| format!("failed to fetch product: {error}"))?;

            let mut item = CartItem::from_product(&product);
            item.color = args.color;
            item.size = args.size;

            store
                .add_or_increase(item)
                .map_err(|error| format!("failed to add to cart: {error}"))?;
        }
        CartSubcommand::Decrease(args) => {
            let item = find_variant(store.cart(), &args)
                .ok_or_else(|| format!("{} is not in the cart", args.slug))?;

            store
                .decrease(&item)
                .map_err(|error| format!("failed to update cart: {error}"))?;
        }
        CartSubcommand::Show => {}
        CartSubcommand::Clear => {
            store
                .clear()
                .map_err(|error| format!("failed to clear cart: {error}"))?;
        }
    }

    print_cart(store.cart(), session)
}

fn find_variant(cart: &Cart, args: &SlugArgs) -> Option<CartItem> {
    cart.items
        .iter()
        .find(|item| {
            item.slug == args.slug
                && item.color.as_deref() == args.color.as_deref()
                && item.size.as_deref() == args.size.as_deref()
        })
        .cloned()
}

fn print_cart(cart: &Cart, session: &Session) -> Result<(), String> {
    if cart.is_empty() {
        println!("cart is empty");
        return Ok(());
    }

    for item in &cart.items {
        let variant = [item.color.as_deref(), item.size.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ");

        println!("{} x{} @ {} {variant}", item.slug, item.qty, item.price);
    }

    let summary = cart
        .summary(&PricingPolicy::default())
        .map_err(|error| format!("failed to price cart: {error}"))?;

    println!("items: {}", summary.items_price);
    println!("shipping: {}", summary.shipping_price);
    println!("tax: {}", summary.tax_price);
    println!("total: {}", summary.total_price);

    Ok(())
}
