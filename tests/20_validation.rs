mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn every_violated_field_is_reported() -> Result<()> {
    let server = common::ensure_server().await?;

    let (status, body) = server
        .mutate(
            "createUser",
            &json!({ "username": "ab", "email": "nope", "password": "123", "full_name": "X", "role": "KING" }),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let fields = common::error_fields(&body);
    for field in ["username", "email", "password", "full_name", "role"] {
        assert!(fields.iter().any(|f| f == field), "missing {} in {:?}", field, fields);
    }
    Ok(())
}

#[tokio::test]
async fn title_one_character_short_names_the_field() -> Result<()> {
    let server = common::ensure_server().await?;

    let (status, body) = server
        .mutate(
            "createComplaint",
            &json!({
                "title": "Pipe",
                "description": "Water pipe burst under the road",
                "citizen_name": "Jane Doe",
                "citizen_email": "jane@example.com",
                "citizen_phone": null,
                "address": "123 Main St"
            }),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_fields(&body), vec!["title".to_string()]);
    assert_eq!(body["field_errors"][0]["code"], "too_short");
    Ok(())
}

#[tokio::test]
async fn nullable_fields_must_be_present() -> Result<()> {
    let server = common::ensure_server().await?;

    let (status, body) = server
        .mutate(
            "createComplaint",
            &json!({
                "title": "Broken streetlight",
                "description": "Streetlight has been out for two weeks",
                "citizen_name": "Jane Doe",
                "citizen_email": "jane@example.com",
                "address": "123 Main St"
            }),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"][0]["field"], "citizen_phone");
    assert_eq!(body["field_errors"][0]["code"], "required");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected_before_validation() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .post(server.url("/trpc/createHousingUnit"))
        .header("content-type", "application/json")
        .body("{\"unit_number\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn decimals_and_dates_are_coerced() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::token_for(3);

    let (status, body) = server
        .mutate(
            "createWorkOrder",
            &json!({
                "title": "Resurface car park",
                "description": "Resurface the library car park",
                "complaint_id": null,
                "assigned_to": null,
                "estimated_cost": "12500.50",
                "scheduled_date": "2024-09-01"
            }),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["estimated_cost"], "12500.50");
    assert!(body["data"]["scheduled_date"]
        .as_str()
        .is_some_and(|d| d.starts_with("2024-09-01T00:00:00")));

    let (status, body) = server
        .mutate(
            "createWorkOrder",
            &json!({
                "title": "Resurface car park",
                "description": "Resurface the library car park",
                "complaint_id": null,
                "assigned_to": null,
                "estimated_cost": -5,
                "scheduled_date": "next tuesday"
            }),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = common::error_fields(&body);
    assert!(fields.contains(&"estimated_cost".to_string()));
    assert!(fields.contains(&"scheduled_date".to_string()));
    Ok(())
}
