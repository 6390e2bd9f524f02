//! HTTP adapter for the product catalog.
//!
//! Maps REST requests onto [`catalog_store::ProductStore`] calls: assigns
//! identifiers and timestamps, validates input, and serializes results as
//! JSON. Errors are returned as `{"error": "..."}` with a matching status.

pub mod config;
pub mod error;
pub mod handler;
pub mod products;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::CatalogServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> Router {
        router::build_router(AppState::in_memory(ServerConfig::default()))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn input(name: &str, price: f64, category: &str, stock: u32) -> Value {
        json!({ "name": name, "price": price, "category": category, "stock": stock })
    }

    async fn create(app: &Router, body: Value) -> String {
        let (status, product) = send(app, "POST", "/api/products", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        product["id"].as_str().unwrap().to_string()
    }

    fn names(value: &Value) -> Vec<String> {
        let mut names: Vec<String> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint_counts_products() {
        let app = app();
        create(&app, input("A", 1.0, "x", 1)).await;
        let (status, body) = send(&app, "GET", "/info", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["products"], 1);
    }

    #[tokio::test]
    async fn create_get_delete_cycle() {
        let app = app();
        let id = create(&app, input("Lamp", 25.0, "home", 4)).await;

        let (status, product) = send(&app, "GET", &format!("/api/products/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(product["name"], "Lamp");
        assert_eq!(product["created_at"], product["updated_at"]);

        let (status, _) = send(&app, "DELETE", &format!("/api/products/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &format!("/api/products/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains(&id));
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let app = app();
        let (status, body) =
            send(&app, "POST", "/api/products", Some(input("Lamp", 0.0, "home", 1))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("price"));

        let (status, _) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({ "name": "Lamp", "price": 2.0, "category": "home", "stock": -1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({
                "name": "Lamp",
                "price": 2.0,
                "category": "home",
                "stock": 1,
                "discount": 101.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_records_history() {
        let app = app();
        let id = create(&app, input("Lamp", 25.0, "home", 4)).await;

        let (status, product) = send(
            &app,
            "PUT",
            &format!("/api/products/{id}"),
            Some(input("Lamp XL", 30.0, "home", 4)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(product["name"], "Lamp XL");

        let uri = format!("/api/products/{id}/history");
        let (status, history) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let fields: Vec<&str> = history
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, ["name", "price"]);
        assert_eq!(history[1]["old_value"], 25.0);
        assert_eq!(history[1]["new_value"], 30.0);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (status, _) = send(
            &app(),
            "PUT",
            "/api/products/ghost",
            Some(input("Lamp", 1.0, "home", 1)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn partial_updates() {
        let app = app();
        let id = create(&app, input("Lamp", 25.0, "home", 4)).await;

        let (status, product) = send(
            &app,
            "PUT",
            &format!("/api/products/{id}/stock"),
            Some(json!({ "stock": 4 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(product["history"][0]["field"], "stock");

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/products/{id}/discount"),
            Some(json!({ "discount": 150.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, product) = send(
            &app,
            "PUT",
            &format!("/api/products/{id}/discount"),
            Some(json!({ "discount": 20.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(product["discount"], 20.0);

        let (status, product) = send(
            &app,
            "PUT",
            &format!("/api/products/{id}/feature"),
            Some(json!({ "featured": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(product["history"].as_array().unwrap().len(), 3);

        let (_, discounted) = send(&app, "GET", "/api/products/discount", None).await;
        assert_eq!(names(&discounted), ["Lamp"]);
        let (_, featured) = send(&app, "GET", "/api/products/featured", None).await;
        assert_eq!(names(&featured), ["Lamp"]);
    }

    #[tokio::test]
    async fn partial_update_on_missing_product() {
        let (status, _) = send(
            &app(),
            "PUT",
            "/api/products/ghost/stock",
            Some(json!({ "stock": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn filters_and_aggregates() {
        let app = app();
        create(&app, input("Cheap", 9.99, "tools", 0)).await;
        create(&app, input("Edge", 10.0, "tools", 3)).await;
        create(&app, input("Top", 20.0, "garden", 50)).await;

        let (_, found) = send(&app, "GET", "/api/products/price-range?min=10&max=20", None).await;
        assert_eq!(names(&found), ["Edge", "Top"]);

        let (_, found) = send(&app, "GET", "/api/products/category/tools", None).await;
        assert_eq!(names(&found), ["Cheap", "Edge"]);

        let (_, found) = send(&app, "GET", "/api/products/in-stock", None).await;
        assert_eq!(names(&found), ["Edge", "Top"]);

        let (_, found) = send(&app, "GET", "/api/products/out-of-stock", None).await;
        assert_eq!(names(&found), ["Cheap"]);

        let (_, found) = send(&app, "GET", "/api/products/low-stock", None).await;
        assert_eq!(names(&found), ["Edge"]);

        let (_, found) = send(&app, "GET", "/api/products/low-stock?threshold=100", None).await;
        assert_eq!(names(&found), ["Edge", "Top"]);

        let (_, categories) = send(&app, "GET", "/api/products/categories", None).await;
        assert_eq!(categories.as_array().unwrap().len(), 2);

        let (_, stats) = send(&app, "GET", "/api/products/stats", None).await;
        assert_eq!(stats["total_products"], 3);
        assert_eq!(stats["total_stock"], 53);
        assert_eq!(stats["out_of_stock_count"], 1);
        assert_eq!(stats["low_stock_count"], 2);
    }

    #[tokio::test]
    async fn bad_query_parameters() {
        let app = app();
        let (status, _) = send(&app, "GET", "/api/products/price-range?min=abc&max=2", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, "GET", "/api/products/price-range?min=1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, "GET", "/api/products/popular?limit=ten", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, "GET", "/api/products/search", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn popular_with_negative_limit_is_empty() {
        let app = app();
        create(&app, input("A", 1.0, "x", 1)).await;
        let (status, found) = send(&app, "GET", "/api/products/popular?limit=-3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(found.as_array().unwrap().is_empty());

        let (_, found) = send(&app, "GET", "/api/products/trending", None).await;
        assert_eq!(found.as_array().unwrap().len(), 1);
        let (_, found) = send(&app, "GET", "/api/products/new?limit=1", None).await;
        assert_eq!(names(&found), ["A"]);
    }

    #[tokio::test]
    async fn batch_lifecycle() {
        let app = app();
        let (status, created) = send(
            &app,
            "POST",
            "/api/products/batch",
            Some(json!([input("A", 1.0, "x", 1), input("B", 2.0, "x", 2)])),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let ids: Vec<String> = created
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids.len(), 2);

        let (status, updated) = send(
            &app,
            "PUT",
            "/api/products/batch",
            Some(json!({ "ids": ids, "update": input("Same", 3.0, "y", 3) })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&updated), ["Same", "Same"]);

        let (_, found) = send(&app, "GET", "/api/products/category/y", None).await;
        assert_eq!(found.as_array().unwrap().len(), 2);

        let (status, _) = send(
            &app,
            "DELETE",
            "/api/products/batch",
            Some(json!({ "ids": ids })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, all) = send(&app, "GET", "/api/products", None).await;
        assert!(all.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn batch_delete_stops_at_missing_id() {
        let app = app();
        let a = create(&app, input("A", 1.0, "x", 1)).await;
        let b = create(&app, input("B", 1.0, "x", 1)).await;

        let (status, _) = send(
            &app,
            "DELETE",
            "/api/products/batch",
            Some(json!({ "ids": [a, "ghost", b] })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        // Known behaviour: the deletion of "A" is not rolled back.
        let (_, all) = send(&app, "GET", "/api/products/export", None).await;
        assert_eq!(names(&all), ["B"]);
    }

    #[tokio::test]
    async fn batch_rejects_invalid_member() {
        let app = app();
        let (status, _) = send(
            &app,
            "POST",
            "/api/products/import",
            Some(json!([input("A", 1.0, "x", 1), input("", 1.0, "x", 1)])),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (_, all) = send(&app, "GET", "/api/products", None).await;
        assert!(all.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn views_endpoints() {
        let app = app();
        let chair = create(
            &app,
            json!({ "name": "Red Chair", "price": 40.0, "category": "furniture", "stock": 2,
                    "tags": ["red"], "sku": "CH-1" }),
        )
        .await;
        create(
            &app,
            json!({ "name": "Blue Chair", "price": 45.0, "category": "furniture", "stock": 2 }),
        )
        .await;
        create(
            &app,
            json!({ "name": "Red Chair", "price": 12.0, "category": "kitchen", "stock": 9,
                    "tags": ["red"] }),
        )
        .await;

        let (_, found) = send(&app, "GET", "/api/products/search?q=Red", None).await;
        assert_eq!(names(&found), ["Red Chair", "Red Chair"]);

        let (_, found) = send(&app, "GET", &format!("/api/products/similar/{chair}"), None).await;
        assert_eq!(names(&found), ["Blue Chair"]);

        let (_, found) = send(&app, "GET", &format!("/api/products/related/{chair}"), None).await;
        assert_eq!(names(&found), ["Red Chair"]);

        let (_, dupes) = send(&app, "GET", "/api/products/duplicates", None).await;
        assert_eq!(dupes["Red Chair"].as_array().unwrap().len(), 2);

        let (_, report) = send(&app, "GET", &format!("/api/products/validate/{chair}"), None).await;
        assert_eq!(report["sku"], true);
        assert_eq!(report["barcode"], false);

        let (status, _) = send(&app, "GET", "/api/products/similar/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/products")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
