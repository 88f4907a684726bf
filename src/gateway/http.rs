//! HTTP gateway built on reqwest.

use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{Endpoints, Gateway, GatewayError, GatewayResult, AUTH_HEADER};
use crate::models::{
    CategoriesResponse, Category, Credentials, ImageAsset, ImagesResponse, Item, ItemId,
    ItemsResponse, LoginResponse, NewItem, SuccessResponse, UploadResponse,
};
use crate::upload::{UploadFile, UPLOAD_FIELD};

/// Gateway talking to the real endpoints
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoints: Endpoints,
}

impl HttpGateway {
    /// Create a gateway with the given per-request timeout
    pub fn new(endpoints: Endpoints, timeout: Duration) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fame-gallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<T> {
        let response = request.send().await?;
        decode(response).await
    }
}

fn authorized(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.header(AUTH_HEADER, token),
        None => request,
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(body);

        tracing::warn!(%url, status = status.as_u16(), "Endpoint returned an error: {}", message);
        return Err(GatewayError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::warn!(%url, "Unexpected response body: {}", e);
        GatewayError::Decode(e.to_string())
    })
}

#[async_trait(?Send)]
impl Gateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<LoginResponse> {
        tracing::debug!(username = %credentials.username, "POST login");
        self.send(self.client.post(&self.endpoints.auth_url).json(credentials))
            .await
    }

    async fn list_items(&self) -> GatewayResult<Vec<Item>> {
        tracing::debug!("GET items");
        let response: ItemsResponse = self.send(self.client.get(&self.endpoints.items_url)).await?;
        Ok(response.items)
    }

    async fn list_categories(&self) -> GatewayResult<Vec<Category>> {
        tracing::debug!("GET categories");
        let response: CategoriesResponse = self
            .send(self.client.get(self.endpoints.categories_url()))
            .await?;
        Ok(response.categories)
    }

    async fn create_item(&self, item: &NewItem, token: Option<&str>) -> GatewayResult<bool> {
        tracing::debug!(name = %item.name, "POST item");
        let request = authorized(self.client.post(&self.endpoints.items_url), token).json(item);
        let response: SuccessResponse = self.send(request).await?;
        Ok(response.success)
    }

    async fn delete_item(&self, id: ItemId, token: Option<&str>) -> GatewayResult<bool> {
        tracing::debug!(id, "DELETE item");
        let request = authorized(self.client.delete(self.endpoints.delete_url(id)), token);
        let response: SuccessResponse = self.send(request).await?;
        Ok(response.success)
    }

    async fn upload_image(
        &self,
        file: &UploadFile,
        token: Option<&str>,
    ) -> GatewayResult<Option<String>> {
        tracing::debug!(name = %file.name, size = file.size(), "POST image");

        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| GatewayError::Transport(format!("Invalid MIME type: {}", e)))?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let request = authorized(self.client.post(&self.endpoints.upload_url), token).multipart(form);
        let response: UploadResponse = self.send(request).await?;
        Ok(response.url.filter(|u| !u.is_empty()))
    }

    async fn list_images(&self) -> GatewayResult<Vec<ImageAsset>> {
        tracing::debug!("GET images");
        let response: ImagesResponse = self.send(self.client.get(&self.endpoints.images_url)).await?;
        Ok(response.images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Bytes,
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn items_get(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        if params.get("type").map(String::as_str) == Some("categories") {
            Json(json!({ "categories": [
                { "id": 1, "name": "Music", "color": "#f43f5e" },
                { "id": 2, "name": "Business", "color": "#0ea5e9" }
            ]}))
        } else {
            Json(json!({ "items": [{
                "id": 10,
                "image_url": "https://cdn.example/10.jpg",
                "name": "Anna",
                "bio": "Singer",
                "category_id": 1,
                "created_at": "2025-10-25T04:00:00"
            }]}))
        }
    }

    async fn items_post(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            == Some("tok");
        let has_name = body.get("name").and_then(Value::as_str) == Some("Anna");
        (StatusCode::CREATED, Json(json!({ "success": authorized && has_name, "id": 11 })))
    }

    async fn items_delete(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
        match params.get("id") {
            Some(id) => (StatusCode::OK, Json(json!({ "success": id == "10" }))),
            None => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing id parameter" })),
            ),
        }
    }

    async fn auth(Json(body): Json<Value>) -> Json<Value> {
        if body["username"] == "admin" && body["password"] == "secret" {
            Json(json!({ "success": true, "token": "tok" }))
        } else {
            Json(json!({ "success": false }))
        }
    }

    async fn upload(headers: HeaderMap, body: Bytes) -> Json<Value> {
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let text = String::from_utf8_lossy(&body);

        if content_type.starts_with("multipart/form-data")
            && text.contains("name=\"image\"")
            && text.contains("filename=\"a.png\"")
        {
            Json(json!({ "url": "https://cdn.example/uploaded/a.png" }))
        } else {
            Json(json!({}))
        }
    }

    async fn images() -> Json<Value> {
        Json(json!({ "images": [
            { "url": "https://cdn.example/1.jpg", "name": "one.jpg", "size": 152000, "uploaded_at": "2025-10-25T04:00:00Z" }
        ]}))
    }

    async fn broken() -> (StatusCode, Json<Value>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "database unavailable" })),
        )
    }

    async fn not_json() -> &'static str {
        "<html>maintenance</html>"
    }

    async fn spawn_endpoints() -> String {
        let router = Router::new()
            .route("/items", get(items_get).post(items_post).delete(items_delete))
            .route("/auth", post(auth))
            .route("/upload", post(upload))
            .route("/images", get(images))
            .route("/broken", get(broken))
            .route("/html", get(not_json));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn gateway(endpoints: Endpoints) -> HttpGateway {
        HttpGateway::new(endpoints, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_items_and_categories() {
        let base = spawn_endpoints().await;
        let gw = gateway(Endpoints::with_base(&base));

        let items = gw.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Anna");
        assert_eq!(items[0].category_id, Some(1));

        let categories = gw.list_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].name, "Business");
    }

    #[tokio::test]
    async fn test_login() {
        let base = spawn_endpoints().await;
        let gw = gateway(Endpoints::with_base(&base));

        let ok = gw.login(&Credentials::new("admin", "secret")).await.unwrap();
        assert_eq!(ok.accepted_token(), Some("tok"));

        let bad = gw.login(&Credentials::new("admin", "nope")).await.unwrap();
        assert!(!bad.success);
        assert_eq!(bad.accepted_token(), None);
    }

    #[tokio::test]
    async fn test_create_sends_token_header() {
        let base = spawn_endpoints().await;
        let gw = gateway(Endpoints::with_base(&base));
        let item = NewItem {
            image_url: "https://cdn.example/a.jpg".into(),
            name: "Anna".into(),
            bio: "Singer".into(),
            category_id: Some(1),
            telegram_username: None,
        };

        assert!(gw.create_item(&item, Some("tok")).await.unwrap());
        assert!(!gw.create_item(&item, None).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let base = spawn_endpoints().await;
        let gw = gateway(Endpoints::with_base(&base));

        assert!(gw.delete_item(10, Some("tok")).await.unwrap());
        assert!(!gw.delete_item(99, Some("tok")).await.unwrap());
    }

    #[tokio::test]
    async fn test_upload_is_multipart_image_field() {
        let base = spawn_endpoints().await;
        let gw = gateway(Endpoints::with_base(&base));
        let file = UploadFile::new("a.png", "image/png", vec![1, 2, 3]);

        let url = gw.upload_image(&file, Some("tok")).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://cdn.example/uploaded/a.png"));
    }

    #[tokio::test]
    async fn test_list_images() {
        let base = spawn_endpoints().await;
        let gw = gateway(Endpoints::with_base(&base));

        let images = gw.list_images().await.unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].size, 152000);
    }

    #[tokio::test]
    async fn test_error_status_is_api_error() {
        let base = spawn_endpoints().await;
        let gw = gateway(Endpoints {
            items_url: format!("{}/broken", base),
            ..Endpoints::with_base(&base)
        });

        match gw.list_items().await {
            Err(GatewayError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "database unavailable");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let base = spawn_endpoints().await;
        let gw = gateway(Endpoints {
            images_url: format!("{}/html", base),
            ..Endpoints::with_base(&base)
        });

        let err = gw.list_images().await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
        assert!(!err.is_connection_failure());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_failure() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gw = gateway(Endpoints::with_base(&format!("http://{}", addr)));
        let err = gw.list_items().await.unwrap_err();
        assert!(err.is_connection_failure(), "got {:?}", err);
    }
}
