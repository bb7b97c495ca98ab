//! Catalog edits and description drafting as an admin.

#![allow(clippy::unwrap_used)]

use nexus_portal_admin::services::{EMPTY_RESULT_FALLBACK, GENERATION_FAILED_FALLBACK};
use nexus_portal_core::ProductId;
use nexus_portal_integration_tests::{ScriptedGenerator, TestPortal, location};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};

async fn admin_portal(generator: ScriptedGenerator) -> TestPortal {
    let portal = TestPortal::spawn(generator).await.unwrap();
    portal.login("admin@nexus.io", "ADMIN").await.unwrap();
    portal
}

async fn describe(portal: &TestPortal, body: Value) -> reqwest::Response {
    portal
        .client
        .post(portal.url("/api/products/describe"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_listing_shows_seed_catalog() {
    let portal = admin_portal(ScriptedGenerator::Empty).await;
    let body = portal
        .client
        .get(portal.url("/products"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Nexus X1 Laptop"));
    assert!(body.contains("Titan Monitor 4K"));
    assert!(body.contains("$1299.99"));
    assert!(body.contains("(low)"));
}

#[tokio::test]
async fn test_search_filters_listing() {
    let portal = admin_portal(ScriptedGenerator::Empty).await;
    let body = portal
        .client
        .get(portal.url("/products?q=periph"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Quantum Mouse"));
    assert!(body.contains("Nebula Keyboard"));
    assert!(!body.contains("Nexus X1 Laptop"));
}

#[tokio::test]
async fn test_add_product_goes_first() {
    let portal = admin_portal(ScriptedGenerator::Empty).await;
    let response = portal
        .client
        .post(portal.url("/products"))
        .form(&[
            ("name", "Widget"),
            ("category", "Accessories"),
            ("price", "19.50"),
            ("stock", "7"),
            ("description", ""),
            ("status", "Active"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/products"));

    let products = portal.catalog.list();
    assert_eq!(products.len(), 5);
    assert_eq!(products[0].name, "Widget");
    assert_eq!(products[0].price.amount(), Decimal::new(1950, 2));
    assert_eq!(products[0].stock, 7);
    assert_eq!(products[1].id.as_str(), "1");
}

#[tokio::test]
async fn test_add_product_requires_name() {
    let portal = admin_portal(ScriptedGenerator::Empty).await;
    let response = portal
        .client
        .post(portal.url("/products"))
        .form(&[("name", "  "), ("price", "1"), ("stock", "1")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(portal.catalog.list().len(), 4);
}

#[tokio::test]
async fn test_update_changes_only_sent_fields() {
    let portal = admin_portal(ScriptedGenerator::Empty).await;
    let before = portal.catalog.get(&ProductId::new("2")).unwrap();

    let response = portal
        .client
        .post(portal.url("/products/2"))
        .form(&[("price", "79.00"), ("name", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), Some("/products"));

    let after = portal.catalog.get(&ProductId::new("2")).unwrap();
    assert_eq!(after.name, "Quantum Mouse");
    assert_eq!(after.price.amount(), Decimal::new(7900, 2));
    assert_eq!(after.stock, before.stock);
    assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn test_update_unknown_product_is_ignored() {
    let portal = admin_portal(ScriptedGenerator::Empty).await;
    let before = portal.catalog.list();

    let response = portal
        .client
        .post(portal.url("/products/missing"))
        .form(&[("stock", "3")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(portal.catalog.list(), before);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let portal = admin_portal(ScriptedGenerator::Empty).await;

    for _ in 0..2 {
        let response = portal
            .client
            .post(portal.url("/products/3/delete"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let ids: Vec<_> = portal
        .catalog
        .list()
        .into_iter()
        .map(|p| p.id.into_inner())
        .collect();
    assert_eq!(ids, vec!["1", "2", "4"]);
}

#[tokio::test]
async fn test_describe_returns_generated_text() {
    let portal = admin_portal(ScriptedGenerator::Text(
        "  A widget for every desk.\n".to_string(),
    ))
    .await;

    let response = describe(&portal, json!({"name": "Widget", "category": "Accessories"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["description"], "A widget for every desk.");
}

#[tokio::test]
async fn test_describe_empty_answer_uses_fallback() {
    let portal = admin_portal(ScriptedGenerator::Empty).await;
    let body: Value = describe(&portal, json!({"name": "Widget", "category": "Accessories"}))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["description"], EMPTY_RESULT_FALLBACK);
}

#[tokio::test]
async fn test_describe_failure_uses_fallback() {
    let portal = admin_portal(ScriptedGenerator::Failing).await;
    let response = describe(&portal, json!({"name": "Widget", "category": "Accessories"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["description"], GENERATION_FAILED_FALLBACK);
}

#[tokio::test]
async fn test_describe_requires_name_and_category() {
    let portal = admin_portal(ScriptedGenerator::Text("unused".to_string())).await;

    let response = describe(&portal, json!({"name": "", "category": "Accessories"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = describe(&portal, json!({"name": "Widget"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dashboard_survives_huge_inventory_value() {
    let portal = admin_portal(ScriptedGenerator::Empty).await;
    let response = portal
        .client
        .post(portal.url("/products"))
        .form(&[
            ("name", "Vault"),
            ("price", "79228162514264337593543950335"),
            ("stock", "2"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = portal.client.get(portal.url("/dashboard")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
