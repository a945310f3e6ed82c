//! Catalog, cart, checkout and payment commands.

use std::process::ExitCode;

use clap::Args;
use rust_decimal::Decimal;

use soleverse_client::{
    ApiError, CartError, CartStore, CheckoutError, cart::select_size, pay_for_cart,
    preload_images, submit_checkout,
};
use soleverse_core::{Address, CurrencyCode, NewCustomer, Price, Product, ProductId};

use super::{CommandError, Context, notice};

/// Delivery details for `sv checkout`. Omitted fields are left for the
/// storefront to reject.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(short, long)]
    email: Option<String>,

    #[arg(short, long)]
    phone: Option<String>,

    #[arg(long)]
    street: Option<String>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    zip_code: Option<String>,
}

impl CheckoutArgs {
    fn into_customer(self) -> NewCustomer {
        let has_address = self.street.is_some()
            || self.city.is_some()
            || self.state.is_some()
            || self.zip_code.is_some();

        NewCustomer {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone,
            address: has_address.then(|| Address {
                street: self.street.unwrap_or_default(),
                city: self.city.unwrap_or_default(),
                state: self.state.unwrap_or_default(),
                zip_code: self.zip_code.unwrap_or_default(),
            }),
        }
    }
}

/// Shown with the display currency; the storefront prices in INR by default.
fn money(amount: Decimal) -> String {
    Price::new(amount, CurrencyCode::default()).display()
}

fn size_range(product: &Product) -> String {
    match (product.sizes.first(), product.sizes.last()) {
        (Some(first), Some(last)) if first == last => first.to_string(),
        (Some(first), Some(last)) => format!("{first}-{last}"),
        _ => "-".to_owned(),
    }
}

/// Report an API failure, listing field errors when the server sent any.
fn api_notice(error: &ApiError) -> ExitCode {
    if let ApiError::Rejected { errors, .. } = error {
        for detail in errors {
            eprintln!("  - {detail}");
        }
    }
    notice(error)
}

pub async fn products(ctx: &Context, preload: bool) -> Result<ExitCode, CommandError> {
    let products = match ctx.api().list_products().await {
        Ok(products) => products,
        Err(e) => return Ok(api_notice(&e)),
    };

    if preload {
        let images = products
            .iter()
            .map(|p| (p.name.as_str(), p.image.as_str()));
        match preload_images(ctx.api(), images).await {
            Ok(count) => println!("Loaded {count} product images."),
            Err(e) => return Ok(notice(e)),
        }
    }

    for product in &products {
        println!(
            "#{:<3} {:<24} {:>12}  sizes {}",
            product.id,
            product.name,
            money(product.price),
            size_range(product)
        );
        println!("     {}", product.description);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn show_cart(ctx: &Context) -> Result<ExitCode, CommandError> {
    print_cart(&ctx.cart()?);
    Ok(ExitCode::SUCCESS)
}

fn print_cart(cart: &CartStore) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in cart.items() {
        let size = item
            .selected_size
            .map_or_else(|| "-".to_owned(), |s| s.to_string());
        println!(
            "#{:<3} {:<24} size {:<3} x{:<3} {:>12}",
            item.id,
            item.name,
            size,
            item.quantity,
            money(item.subtotal())
        );
    }
    println!("{} items, total {}", cart.count(), money(cart.total()));
}

pub async fn add_to_cart(
    ctx: &Context,
    id: i32,
    size: Option<u32>,
) -> Result<ExitCode, CommandError> {
    let mut cart = ctx.cart()?;
    let id = ProductId::new(id);

    let products = match ctx.api().list_products().await {
        Ok(products) => products,
        Err(e) => return Ok(api_notice(&e)),
    };
    let Some(product) = products.into_iter().find(|p| p.id == id) else {
        return Ok(notice(CartError::ProductNotFound(id)));
    };
    let size = match select_size(&product, size) {
        Ok(size) => size,
        Err(e) => return Ok(notice(e)),
    };

    cart.add_to_cart(&product, Some(size));
    println!("Added {} (size {size}) to your cart.", product.name);
    println!("{} items, total {}", cart.count(), money(cart.total()));
    Ok(ExitCode::SUCCESS)
}

pub fn remove_from_cart(ctx: &Context, id: i32) -> Result<ExitCode, CommandError> {
    let mut cart = ctx.cart()?;
    cart.remove_from_cart(ProductId::new(id));
    print_cart(&cart);
    Ok(ExitCode::SUCCESS)
}

pub fn update_quantity(ctx: &Context, id: i32, quantity: i64) -> Result<ExitCode, CommandError> {
    if quantity < 0 {
        return Ok(notice("Quantity cannot be negative"));
    }

    let mut cart = ctx.cart()?;
    cart.update_quantity(ProductId::new(id), quantity);
    print_cart(&cart);
    Ok(ExitCode::SUCCESS)
}

pub fn clear_cart(ctx: &Context) -> Result<ExitCode, CommandError> {
    let mut cart = ctx.cart()?;
    cart.clear_cart();
    println!("Your cart is empty.");
    Ok(ExitCode::SUCCESS)
}

pub async fn checkout(ctx: &Context, args: CheckoutArgs) -> Result<ExitCode, CommandError> {
    let mut cart = ctx.cart()?;

    match submit_checkout(ctx.api(), &mut cart, &args.into_customer()).await {
        Ok(record) => {
            println!("Order placed! Thank you, {}.", record.first_name);
            println!(
                "Delivering to {}, {}, {} {}",
                record.address.street,
                record.address.city,
                record.address.state,
                record.address.zip_code
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(CheckoutError::Api(e)) => Ok(api_notice(&e)),
        Err(e) => Ok(notice(e)),
    }
}

pub async fn pay(ctx: &Context) -> Result<ExitCode, CommandError> {
    let cart = ctx.cart()?;

    match pay_for_cart(ctx.api(), &cart).await {
        Ok(captured) => {
            println!(
                "Payment {} {} for {}.",
                captured.id,
                captured.status,
                money(cart.total())
            );
            println!("Receipt sent to {}.", captured.payer.email_address);
            Ok(ExitCode::SUCCESS)
        }
        Err(CheckoutError::Api(e)) => Ok(api_notice(&e)),
        Err(e) => Ok(notice(e)),
    }
}
