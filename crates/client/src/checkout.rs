//! Checkout, payment and image preloading flows.

use futures::future::try_join_all;
use thiserror::Error;
use tracing::instrument;

use soleverse_core::{CapturedOrder, CustomerRecord, NewCustomer, OrderStatus};

use crate::api::{ApiError, StorefrontApi};
use crate::cart::CartStore;

/// Errors from the checkout and payment flows.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The storefront API call failed or was rejected.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The payment provider returned an order in an unexpected state.
    #[error("payment order {order_id} is {status}")]
    UnexpectedStatus { order_id: String, status: OrderStatus },

    /// One of the images could not be loaded.
    #[error("Failed to load image for {name}: {source}")]
    ImageLoad {
        name: String,
        #[source]
        source: ApiError,
    },
}

/// Submit the checkout form.
///
/// On success the cart is cleared and the stored record returned. On failure
/// the cart is left as it was.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for an empty cart and
/// `CheckoutError::Api` carrying the server's message otherwise.
#[instrument(skip_all, fields(lines = cart.items().len()))]
pub async fn submit_checkout(
    api: &StorefrontApi,
    cart: &mut CartStore,
    form: &NewCustomer,
) -> Result<CustomerRecord, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let record = api.create_customer(form).await?;
    cart.clear_cart();

    tracing::info!(customer_id = %record.id, "Checkout submitted");
    Ok(record)
}

/// Pay for the cart: create a payment order for every line item, then
/// capture it.
///
/// The cart is not cleared.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for an empty cart,
/// `CheckoutError::Api` if either call fails, and
/// `CheckoutError::UnexpectedStatus` if the provider skips a state.
#[instrument(skip_all, fields(lines = cart.items().len()))]
pub async fn pay_for_cart(
    api: &StorefrontApi,
    cart: &CartStore,
) -> Result<CapturedOrder, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = api.create_order(&cart.order_items()).await?;
    if !order.status.can_transition_to(OrderStatus::Completed) {
        return Err(CheckoutError::UnexpectedStatus {
            order_id: order.id,
            status: order.status,
        });
    }

    let captured = api.capture_order(&order.id).await?;
    if !captured.status.is_terminal() {
        return Err(CheckoutError::UnexpectedStatus {
            order_id: captured.id,
            status: captured.status,
        });
    }

    tracing::info!(
        order_id = %captured.id,
        total = order.total_value().unwrap_or_default(),
        "Payment captured"
    );
    Ok(captured)
}

/// Fetch every `(name, image url)` concurrently and wait for all of them.
///
/// Returns the number of images loaded.
///
/// # Errors
///
/// Returns `CheckoutError::ImageLoad` naming the first image that failed;
/// the remaining downloads are dropped.
#[instrument(skip_all)]
pub async fn preload_images<'a, I>(api: &StorefrontApi, images: I) -> Result<usize, CheckoutError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let loads = images.into_iter().map(|(name, url)| async move {
        api.fetch_image(url)
            .await
            .map_err(|source| CheckoutError::ImageLoad {
                name: name.to_owned(),
                source,
            })
    });

    let loaded = try_join_all(loads).await?;
    tracing::debug!(count = loaded.len(), "Images preloaded");
    Ok(loaded.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use soleverse_core::{Product, ProductId};
    use url::Url;

    use super::*;
    use crate::storage::MemoryStorage;

    /// Nothing listens on the discard port, so every request fails to connect.
    fn unreachable_api() -> StorefrontApi {
        StorefrontApi::new(Url::parse("http://127.0.0.1:9/api").unwrap())
    }

    fn cart_with_one_item() -> CartStore {
        let mut cart = CartStore::load(Arc::new(MemoryStorage::new())).unwrap();
        let product = Product {
            id: ProductId::new(1),
            name: "Air Max Supreme".to_owned(),
            price: Decimal::from(16499),
            image: "http://127.0.0.1:9/shoe.jpg".to_owned(),
            description: String::new(),
            sizes: BTreeSet::from([9]),
        };
        cart.add_to_cart(&product, Some(9));
        cart
    }

    #[tokio::test]
    async fn test_submit_refuses_empty_cart() {
        let mut cart = CartStore::load(Arc::new(MemoryStorage::new())).unwrap();
        let err = submit_checkout(&unreachable_api(), &mut cart, &NewCustomer::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_pay_refuses_empty_cart() {
        let cart = CartStore::load(Arc::new(MemoryStorage::new())).unwrap();
        let err = pay_for_cart(&unreachable_api(), &cart).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_cart() {
        let mut cart = cart_with_one_item();
        let err = submit_checkout(&unreachable_api(), &mut cart, &NewCustomer::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Api(ApiError::Http(_))));
        assert_eq!(cart.count(), 1);
    }

    #[tokio::test]
    async fn test_preload_names_failed_image() {
        let err = preload_images(
            &unreachable_api(),
            [("Cloud Runner", "http://127.0.0.1:9/cloud.jpg")],
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CheckoutError::ImageLoad { ref name, .. } if name == "Cloud Runner"));
    }

    #[tokio::test]
    async fn test_preload_nothing() {
        let loaded = preload_images(&unreachable_api(), std::iter::empty())
            .await
            .unwrap();
        assert_eq!(loaded, 0);
    }
}
