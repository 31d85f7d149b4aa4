use axum::http::{Method, StatusCode};
use chrono::{Duration, Local};
use serde_json::json;

mod common;
use common::{ADMIN_EMAIL, ADMIN_PASSWORD};

#[tokio::test]
async fn admin_routes_are_for_superusers_only() {
    let app = common::spawn_app().await;
    let body = json!({ "name": "Caritas", "kind": "NGO" });

    let anonymous = app.post("/api/v1/admin/institutions", body.clone(), None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    app.register("jan@example.org", "strong-pass-1").await;
    let user = app.login("jan@example.org", "strong-pass-1").await;
    let forbidden = app
        .post("/api/v1/admin/institutions", body.clone(), Some(&user))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let admin = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let created = app
        .post("/api/v1/admin/institutions", body, Some(&admin))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.json["kind"], "NGO");
}

#[tokio::test]
async fn institution_update_delete_and_restrict() {
    let app = common::spawn_app().await;
    let admin = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let created = app
        .post(
            "/api/v1/admin/institutions",
            json!({ "name": "Zbiórka", "kind": "LOCAL_COLLECTION" }),
            Some(&admin),
        )
        .await;
    let id = created.json["id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/admin/institutions/{id}");

    let updated = app
        .request(
            Method::PUT,
            &uri,
            Some(json!({ "name": "Zbiórka Zimowa", "description": "Coats", "kind": "LOCAL_COLLECTION" })),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json["name"], "Zbiórka Zimowa");

    let category = app
        .post("/api/v1/admin/categories", json!({ "name": "Coats" }), Some(&admin))
        .await;
    let date = Local::now().date_naive() + Duration::days(1);
    let donation = app
        .post(
            "/api/v1/donations",
            json!({
                "quantity": 1,
                "categoryIds": [category.json["id"]],
                "institutionId": id,
                "address": "ul. Krótka 2",
                "phoneNumber": "600100200",
                "city": "Gdańsk",
                "zipCode": "80-001",
                "pickUpDate": date.format("%Y-%m-%d").to_string(),
                "pickUpTime": "08:00"
            }),
            Some(&admin),
        )
        .await;
    assert_eq!(donation.status, StatusCode::CREATED);

    let restricted = app.request(Method::DELETE, &uri, None, Some(&admin)).await;
    assert_eq!(restricted.status, StatusCode::CONFLICT);
    assert_eq!(restricted.json["code"], 409);
    let listed = app.get("/api/v1/institutions", None).await;
    assert!(listed.json.as_array().unwrap().iter().any(|i| i["id"] == id));

    let missing = app
        .request(Method::DELETE, "/api/v1/admin/institutions/missing", None, Some(&admin))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_form_reaches_the_administrators() {
    let app = common::spawn_app().await;

    let anonymous = app
        .post(
            "/api/v1/contact",
            json!({ "name": "Anna", "surname": "Nowak", "message": "Hello" }),
            None,
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::OK);
    assert_eq!(anonymous.json["delivered"], true);
    assert_eq!(anonymous.json["recipientCount"], 1);

    let empty = app
        .post("/api/v1/contact", json!({ "name": "Anna", "message": "  " }), None)
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}
