//! SoleVerse CLI - Terminal storefront and database tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! sv products
//!
//! # Add a pair in size 9, then review the cart
//! sv cart add 1 --size 9
//! sv cart show
//!
//! # Create an account and log in
//! sv signup -n "Asha Rao" -e asha@example.com -p 9876543210 --password secret1 --confirm-password secret1
//! sv login -e asha@example.com --password secret1
//!
//! # Pay for the cart, then submit delivery details
//! sv pay
//! sv checkout --first-name Asha --last-name Rao -e asha@example.com -p 9876543210 \
//!     --street "12 MG Road" --city Bengaluru --state KA --zip-code 560001
//!
//! # Apply storefront database migrations
//! sv migrate
//! ```
//!
//! # Commands
//!
//! - `products` - List the catalog
//! - `cart` - Show and edit the cart
//! - `signup` / `login` / `logout` / `whoami` - Local accounts
//! - `checkout` - Submit delivery details
//! - `pay` - Create and capture a payment order for the cart
//! - `reset` - Clear all local shopper state
//! - `migrate` - Run storefront database migrations

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "sv")]
#[command(author, version, about = "SoleVerse storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Shop(ShopCommand),
    /// Run storefront database migrations
    Migrate,
}

/// Commands that talk to the storefront API or local shopper storage.
#[derive(Subcommand)]
enum ShopCommand {
    /// List the product catalog
    Products {
        /// Download every product image before listing
        #[arg(long)]
        preload_images: bool,
    },
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Register a local account
    Signup {
        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(short, long, default_value = "")]
        email: String,

        #[arg(short, long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        password: String,

        #[arg(long, default_value = "")]
        confirm_password: String,
    },
    /// Log in to a local account
    Login {
        #[arg(short, long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Submit delivery details for the cart
    Checkout(commands::shop::CheckoutArgs),
    /// Create and capture a payment order for the cart
    Pay,
    /// Clear the cart, accounts and session stored on this machine
    Reset,
}

#[derive(Subcommand)]
enum CartAction {
    /// List line items with count and total
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: i32,

        /// Shoe size
        #[arg(short, long)]
        size: Option<u32>,
    },
    /// Remove a product in every size
    Remove {
        /// Product id
        id: i32,
    },
    /// Set the quantity of a product (0 removes it)
    Update {
        /// Product id
        id: i32,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Something went wrong: {e}");
                eprintln!("Run `sv reset` to clear local shopper data, then try again.");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, commands::CommandError> {
    match cli.command {
        Commands::Migrate => {
            commands::migrate::storefront().await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Shop(command) => {
            let ctx = commands::Context::from_env()?;
            shop(&ctx, command).await
        }
    }
}

async fn shop(
    ctx: &commands::Context,
    command: ShopCommand,
) -> Result<ExitCode, commands::CommandError> {
    match command {
        ShopCommand::Products { preload_images } => {
            commands::shop::products(ctx, preload_images).await
        }
        ShopCommand::Cart { action } => match action {
            CartAction::Show => commands::shop::show_cart(ctx),
            CartAction::Add { id, size } => commands::shop::add_to_cart(ctx, id, size).await,
            CartAction::Remove { id } => commands::shop::remove_from_cart(ctx, id),
            CartAction::Update { id, quantity } => {
                commands::shop::update_quantity(ctx, id, quantity)
            }
            CartAction::Clear => commands::shop::clear_cart(ctx),
        },
        ShopCommand::Signup {
            name,
            email,
            phone,
            password,
            confirm_password,
        } => commands::account::signup(
            ctx,
            &soleverse_client::SignupForm {
                name,
                email,
                phone,
                password,
                confirm_password,
            },
        ),
        ShopCommand::Login { email, password } => commands::account::login(ctx, &email, &password),
        ShopCommand::Logout => commands::account::logout(ctx),
        ShopCommand::Whoami => commands::account::whoami(ctx),
        ShopCommand::Checkout(args) => commands::shop::checkout(ctx, args).await,
        ShopCommand::Pay => commands::shop::pay(ctx).await,
        ShopCommand::Reset => commands::reset(ctx),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_is_not_a_shop_command() {
        let cli = Cli::try_parse_from(["sv", "migrate"]).unwrap();
        assert!(matches!(cli.command, Commands::Migrate));

        let cli = Cli::try_parse_from(["sv", "products"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Shop(ShopCommand::Products {
                preload_images: false
            })
        ));

        let cli = Cli::try_parse_from(["sv", "cart", "add", "3", "--size", "9"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Shop(ShopCommand::Cart {
                action: CartAction::Add { id: 3, size: Some(9) }
            })
        ));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
