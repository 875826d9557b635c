use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode as AxumStatus,
    response::IntoResponse,
    routing::{get, put},
};
use reqwest::StatusCode;
use serde_json::{Value, json};

use shelfgate_api::config::GatewayConfig;
use shelfgate_products::DecrementPolicy;

struct Spawned {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl Spawned {
    async fn serve(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for Spawned {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// -------------------------
// Fake catalog
// -------------------------

fn catalog_products() -> Vec<Value> {
    // Catalog ids are strings; the inventory below mixes strings and numbers.
    vec![
        json!({ "id": "42", "code": "42", "product_name": "Widget" }),
        json!({ "id": "7", "code": "7", "product_name": "Gadget" }),
        json!({ "id": "3", "code": "3", "product_name": "Gizmo" }),
        json!({ "id": "0049000028911", "code": "0049000028911", "product_name": "Cola" }),
    ]
}

/// `code` is compared as text, so `"049"` and `"49"` are different barcodes.
async fn catalog_search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let products: Vec<Value> = catalog_products()
        .into_iter()
        .filter(|p| match params.get("code") {
            Some(code) => p["code"] == *code,
            None => true,
        })
        .collect();
    Json(json!({ "count": products.len(), "products": products }))
}

async fn catalog_full_text(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let terms = params
        .get("search_terms")
        .map(|t| t.to_lowercase())
        .unwrap_or_default();
    let products: Vec<Value> = catalog_products()
        .into_iter()
        .filter(|p| {
            p["product_name"]
                .as_str()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&terms)
        })
        .collect();
    Json(json!({ "products": products }))
}

fn catalog_app() -> Router {
    Router::new()
        .route("/api/v2/search", get(catalog_search))
        .route("/cgi/search.pl", get(catalog_full_text))
}

// -------------------------
// Fake inventory
// -------------------------

#[derive(Clone)]
struct Stock {
    records: Arc<Mutex<Vec<Value>>>,
}

fn same_id(record: &Value, id: &str) -> bool {
    match &record["id"] {
        Value::String(s) => s == id,
        Value::Number(n) => n.to_string() == id,
        _ => false,
    }
}

async fn stock_list(State(stock): State<Stock>) -> Json<Value> {
    Json(Value::Array(stock.records.lock().unwrap().clone()))
}

async fn stock_get(State(stock): State<Stock>, Path(id): Path<String>) -> axum::response::Response {
    let records = stock.records.lock().unwrap();
    match records.iter().find(|r| same_id(r, &id)) {
        Some(r) => Json(r.clone()).into_response(),
        None => (AxumStatus::NOT_FOUND, Json(json!({ "message": "Product not found" }))).into_response(),
    }
}

async fn stock_insert(State(stock): State<Stock>, Json(body): Json<Value>) -> Json<Value> {
    stock.records.lock().unwrap().push(body.clone());
    Json(body)
}

async fn stock_set(
    State(stock): State<Stock>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    let mut records = stock.records.lock().unwrap();
    match records.iter_mut().find(|r| same_id(r, &id)) {
        Some(r) => {
            r["stock"] = body["stock"].clone();
            // Echo the id back as a string, like the real service does.
            Json(json!({ "id": id, "stock": r["stock"] })).into_response()
        }
        None => (AxumStatus::NOT_FOUND, Json(json!({ "message": "Product not found" }))).into_response(),
    }
}

async fn stock_delete(State(stock): State<Stock>, Path(id): Path<String>) -> Json<Value> {
    stock.records.lock().unwrap().retain(|r| !same_id(r, &id));
    Json(json!({ "message": format!("Produit {id} supprimé !") }))
}

fn inventory_app(stock: Stock) -> Router {
    Router::new()
        .route("/api/products", get(stock_list).post(stock_insert))
        .route("/api/products/:id", get(stock_get).delete(stock_delete))
        .route("/api/products/stock/:id", put(stock_set))
        .with_state(stock)
}

// -------------------------
// Gateway harness
// -------------------------

struct TestGateway {
    gateway: Spawned,
    _catalog: Spawned,
    _inventory: Spawned,
    stock: Stock,
    client: reqwest::Client,
}

impl TestGateway {
    async fn spawn(policy: DecrementPolicy) -> Self {
        let stock = Stock {
            records: Arc::new(Mutex::new(vec![
                json!({ "id": 7, "stock": 70 }),
                json!({ "id": "3", "stock": 10 }),
                json!({ "id": "0049000028911", "stock": "12" }),
            ])),
        };
        let catalog = Spawned::serve(catalog_app()).await;
        let inventory = Spawned::serve(inventory_app(stock.clone())).await;

        let config = GatewayConfig {
            catalog_url: catalog.base_url.clone(),
            inventory_url: inventory.base_url.clone(),
            decrement_policy: policy,
            ..GatewayConfig::default()
        };
        let app = shelfgate_api::app::build_app_from_config(&config).unwrap();
        let gateway = Spawned::serve(app).await;

        Self {
            gateway,
            _catalog: catalog,
            _inventory: inventory,
            stock,
            client: reqwest::Client::new(),
        }
    }

    async fn graphql(&self, query: &str) -> Value {
        let res = self
            .client
            .post(format!("{}/graphql", self.gateway.base_url))
            .json(&json!({ "query": query }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        res.json().await.unwrap()
    }

    fn stock_record(&self, id: &str) -> Option<Value> {
        let records = self.stock.records.lock().unwrap();
        records.iter().find(|r| same_id(r, id)).cloned()
    }
}

fn error_code(body: &Value) -> &str {
    body["errors"][0]["extensions"]["code"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn health_and_graphiql_are_served() {
    let gw = TestGateway::spawn(DecrementPolicy::default()).await;

    let res = gw
        .client
        .get(format!("{}/health", gw.gateway.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = gw
        .client
        .get(format!("{}/graphql", gw.gateway.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.to_lowercase().contains("graphiql"));
}

#[tokio::test]
async fn products_join_mixed_id_types_in_catalog_order() {
    let gw = TestGateway::spawn(DecrementPolicy::default()).await;

    let body = gw.graphql("{ products { id name code stock } }").await;
    assert_eq!(
        body["data"]["products"],
        json!([
            { "id": "42", "name": "Widget", "code": "42", "stock": 0 },
            { "id": "7", "name": "Gadget", "code": "7", "stock": 70 },
            { "id": "3", "name": "Gizmo", "code": "3", "stock": 10 },
            { "id": "0049000028911", "name": "Cola", "code": "0049000028911", "stock": 12 },
        ])
    );
}

#[tokio::test]
async fn barcodes_keep_their_leading_zeros_upstream() {
    let gw = TestGateway::spawn(DecrementPolicy::default()).await;

    let body = gw
        .graphql(r#"{ product_by_id(id: "0049000028911") { id name code stock } }"#)
        .await;
    assert_eq!(
        body["data"]["product_by_id"],
        json!({ "id": "0049000028911", "name": "Cola", "code": "0049000028911", "stock": 12 })
    );

    let body = gw
        .graphql(r#"mutation { increment_product(id: "0049000028911", quantity: 3) { id stock } }"#)
        .await;
    assert_eq!(
        body["data"]["increment_product"],
        json!({ "id": "0049000028911", "stock": 3 })
    );
    assert_eq!(gw.stock_record("0049000028911").unwrap()["stock"], 3);
}

#[tokio::test]
async fn negative_quantities_are_passed_through() {
    let gw = TestGateway::spawn(DecrementPolicy::default()).await;

    let body = gw
        .graphql(r#"mutation { increment_product(id: "7", quantity: -2) { stock } }"#)
        .await;
    assert_eq!(body["data"]["increment_product"]["stock"], -2);
    assert_eq!(gw.stock_record("7").unwrap()["stock"], -2);
}

#[tokio::test]
async fn product_by_id_defaults_missing_stock_to_zero() {
    let gw = TestGateway::spawn(DecrementPolicy::default()).await;

    let body = gw.graphql(r#"{ product_by_id(id: "42") { id name stock } }"#).await;
    assert_eq!(
        body["data"]["product_by_id"],
        json!({ "id": "42", "name": "Widget", "stock": 0 })
    );

    let body = gw.graphql(r#"{ product_by_id(id: "7") { stock } }"#).await;
    assert_eq!(body["data"]["product_by_id"]["stock"], 70);
}

#[tokio::test]
async fn product_by_id_for_unknown_code_is_not_found() {
    let gw = TestGateway::spawn(DecrementPolicy::default()).await;

    let body = gw.graphql(r#"{ product_by_id(id: "404") { id } }"#).await;
    assert_eq!(body["data"], Value::Null);
    assert_eq!(error_code(&body), "NOT_FOUND");
}

#[tokio::test]
async fn product_by_name_looks_up_stock_of_first_hit() {
    let gw = TestGateway::spawn(DecrementPolicy::default()).await;

    let body = gw.graphql(r#"{ product_by_name(name: "gad") { id name code stock } }"#).await;
    assert_eq!(
        body["data"]["product_by_name"],
        json!({ "id": "7", "name": "Gadget", "code": "7", "stock": 70 })
    );
}

#[tokio::test]
async fn insert_product_combines_catalog_and_inventory() {
    let gw = TestGateway::spawn(DecrementPolicy::default()).await;

    let body = gw
        .graphql(r#"mutation { insert_product(id: "42", stock: 5) { id name code stock message } }"#)
        .await;
    assert_eq!(
        body["data"]["insert_product"],
        json!({ "id": "42", "name": "Widget", "code": "42", "stock": 5, "message": null })
    );
    assert_eq!(gw.stock_record("42").unwrap()["stock"], 5);
}

#[tokio::test]
async fn increment_and_decrement_are_currently_identical() {
    let inc = TestGateway::spawn(DecrementPolicy::default()).await;
    let dec = TestGateway::spawn(DecrementPolicy::default()).await;

    let a = inc
        .graphql(r#"mutation { increment_product(id: "7", quantity: 4) { id name code stock } }"#)
        .await;
    let b = dec
        .graphql(r#"mutation { decrement_product(id: "7", quantity: 4) { id name code stock } }"#)
        .await;

    assert_eq!(a["data"]["increment_product"], b["data"]["decrement_product"]);
    assert_eq!(a["data"]["increment_product"]["stock"], 4);
    assert_eq!(inc.stock_record("7"), dec.stock_record("7"));
}

#[tokio::test]
async fn subtract_policy_makes_decrement_subtract() {
    let gw = TestGateway::spawn(DecrementPolicy::Subtract).await;

    let body = gw
        .graphql(r#"mutation { decrement_product(id: "7", quantity: 4) { stock } }"#)
        .await;
    assert_eq!(body["data"]["decrement_product"]["stock"], 66);

    let body = gw
        .graphql(r#"mutation { decrement_product(id: "3", quantity: 11) { stock } }"#)
        .await;
    assert_eq!(error_code(&body), "INSUFFICIENT_STOCK");
    assert_eq!(gw.stock_record("3").unwrap()["stock"], 10);
}

#[tokio::test]
async fn delete_product_returns_only_the_upstream_message() {
    let gw = TestGateway::spawn(DecrementPolicy::default()).await;

    let body = gw
        .graphql(r#"mutation { delete_product(id: "7") { id name code stock message } }"#)
        .await;
    assert_eq!(
        body["data"]["delete_product"],
        json!({
            "id": null,
            "name": null,
            "code": null,
            "stock": null,
            "message": "Produit 7 supprimé !",
        })
    );
    assert!(gw.stock_record("7").is_none());
}

#[tokio::test]
async fn unreachable_upstream_fails_the_request() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = GatewayConfig {
        catalog_url: dead.clone(),
        inventory_url: dead,
        ..GatewayConfig::default()
    };
    let gateway = Spawned::serve(shelfgate_api::app::build_app_from_config(&config).unwrap()).await;

    let body: Value = reqwest::Client::new()
        .post(format!("{}/graphql", gateway.base_url))
        .json(&json!({ "query": "{ products { id } }" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["data"], Value::Null);
    assert_eq!(error_code(&body), "UPSTREAM_UNAVAILABLE");
}
