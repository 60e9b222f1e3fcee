use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use storefront::cart::{CartStore, JsonFileCartStorage};
use storefront_client::HttpOrderGateway;

mod cart;
mod checkout;
mod orders;

#[derive(Debug, Parser)]
#[command(name = "shop", about = "Shop from the command line", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    session: Session,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Checkout(checkout::CheckoutCommand),
    Orders(orders::OrdersCommand),
}

/// Where the shopper's cart lives and which API they talk to.
#[derive(Debug, Args)]
pub(crate) struct Session {
    /// Storefront API base URL
    #[arg(
        long,
        global = true,
        env = "STOREFRONT_API_URL",
        default_value = "http://localhost:8698"
    )]
    api_url: String,

    /// API token
    #[arg(long, global = true, env = "STOREFRONT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Cart file
    #[arg(
        long,
        global = true,
        env = "STOREFRONT_CART_FILE",
        default_value = "storefront-cart.json"
    )]
    cart_file: PathBuf,
}

impl Session {
    pub(crate) fn cart(&self) -> Result<CartStore<JsonFileCartStorage>, String> {
        CartStore::open(JsonFileCartStorage::new(&self.cart_file))
            .map_err(|error| format!("failed to open cart: {error}"))
    }

    pub(crate) fn gateway(&self) -> Result<HttpOrderGateway, String> {
        HttpOrderGateway::new(self.api_url.clone(), self.token.clone())
            .map_err(|error| format!("failed to build API client: {error}"))
    }
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Cart(command) => cart::run(&self.session, command).await,
            Commands::Checkout(command) => checkout::run(&self.session, command).await,
            Commands::Orders(command) => orders::run(&self.session, command).await,
        }
    }
}
