mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn services_listing_is_public() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/services", server.base_url))
        .send()
        .await?;

    // 503 is acceptable when the store is absent
    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("success").is_some(), "envelope missing: {}", body);
    Ok(())
}

#[tokio::test]
async fn contact_form_rejects_invalid_submissions_with_field_errors() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Validation runs before the store is touched, so this holds with or
    // without a database
    let res = client
        .post(format!("{}/api/contacts", server.base_url))
        .json(&json!({ "name": "", "email": "not-an-email", "message": "" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    for field in ["name", "email", "message"] {
        assert!(
            body["field_errors"].get(field).is_some(),
            "missing field error for {}: {}",
            field,
            body
        );
    }
    Ok(())
}

#[tokio::test]
async fn contact_form_accepts_a_valid_submission() -> Result<()> {
    let server = common::ensure_server().await?;
    if !common::database_available(server).await {
        return Ok(());
    }

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/contacts", server.base_url))
        .json(&json!({
            "name": "Visitor",
            "email": "visitor@example.com",
            "message": "Tell me about your services"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "new");
    Ok(())
}

#[tokio::test]
async fn admin_content_mutations_require_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // No Authorization header: rejected before any store access
    let res = client
        .post(format!("{}/api/services", server.base_url))
        .json(&json!({ "icon": "Zap", "title": "Hosting" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .put(format!("{}/api/about", server.base_url))
        .json(&json!({ "description": "x" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
