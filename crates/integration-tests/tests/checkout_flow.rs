//! Checkout submission through the client cart.

use soleverse_client::{ApiError, CheckoutError, submit_checkout};
use soleverse_core::{Address, NewCustomer};
use soleverse_integration_tests::{TestServer, empty_cart, product_named};

fn customer(email: &str) -> NewCustomer {
    NewCustomer {
        first_name: Some("Asha".to_owned()),
        last_name: Some("Rao".to_owned()),
        email: Some(email.to_owned()),
        phone_number: Some("9876543210".to_owned()),
        address: Some(Address {
            street: "12 MG Road".to_owned(),
            city: "Bengaluru".to_owned(),
            state: "KA".to_owned(),
            zip_code: "560001".to_owned(),
        }),
    }
}

#[tokio::test]
async fn test_checkout_clears_cart_then_rejects_duplicate() {
    let server = TestServer::start().await;
    let products = server.api.list_products().await.expect("Failed to list products");

    let mut cart = empty_cart();
    cart.add_to_cart(product_named(&products, "Sprint Elite"), Some(10));

    let record = submit_checkout(&server.api, &mut cart, &customer("asha@example.com"))
        .await
        .expect("Checkout should succeed");
    assert_eq!(record.email.as_str(), "asha@example.com");
    assert_eq!(record.address.city, "Bengaluru");
    assert!(cart.is_empty());

    cart.add_to_cart(product_named(&products, "Flex Trainer"), Some(6));
    let err = submit_checkout(&server.api, &mut cart, &customer("asha@example.com"))
        .await
        .expect_err("Duplicate email should be rejected");

    assert!(matches!(
        err,
        CheckoutError::Api(ApiError::Rejected { status: 400, ref message, .. })
            if message == "Customer with this email already exists"
    ));
    assert_eq!(cart.count(), 1);
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let server = TestServer::start().await;
    let products = server.api.list_products().await.expect("Failed to list products");

    let mut cart = empty_cart();
    cart.add_to_cart(product_named(&products, "Ultra Boost X"), Some(8));

    let form = NewCustomer {
        address: None,
        ..customer("no-address@example.com")
    };
    let err = submit_checkout(&server.api, &mut cart, &form)
        .await
        .expect_err("Missing address should be rejected");

    assert!(matches!(
        err,
        CheckoutError::Api(ApiError::Rejected { status: 400, ref message, .. })
            if message == "Please provide all required fields"
    ));
    assert!(!cart.is_empty());
}

#[tokio::test]
async fn test_validation_errors_listed() {
    let server = TestServer::start().await;
    let products = server.api.list_products().await.expect("Failed to list products");

    let mut cart = empty_cart();
    cart.add_to_cart(product_named(&products, "Ultra Boost X"), Some(8));

    let mut form = customer("not-an-email");
    if let Some(address) = form.address.as_mut() {
        address.city = String::new();
    }

    let err = submit_checkout(&server.api, &mut cart, &form)
        .await
        .expect_err("Invalid form should be rejected");

    let CheckoutError::Api(ApiError::Rejected {
        status,
        message,
        errors,
    }) = err
    else {
        panic!("Expected a rejected request, got {err:?}");
    };
    assert_eq!(status, 400);
    assert_eq!(message, "Validation Error");
    assert!(errors.contains(&"Please enter a valid email address".to_owned()));
    assert!(errors.contains(&"City is required".to_owned()));
}
