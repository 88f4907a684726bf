//! HTTP Gateway Client
//!
//! [`Gateway`] implementation over the browser's `fetch` (gloo-net).

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use fame_gallery::models::{
    CategoriesResponse, ImagesResponse, ItemsResponse, SuccessResponse, UploadResponse,
};
use fame_gallery::upload::UPLOAD_FIELD;
use fame_gallery::{
    Category, Credentials, DateLocale, Endpoints, Gateway, GatewayError, GatewayResult,
    ImageAsset, Item, ItemId, LoginResponse, NewItem, UploadFile, AUTH_HEADER,
};

/// localStorage key overriding the endpoint base (`{base}/items`, `{base}/auth`, ...)
pub const API_BASE_KEY: &str = "fame_api_base";

/// localStorage key overriding the date language (`en`, `ru`)
pub const DATE_LOCALE_KEY: &str = "fame_date_locale";

fn stored(key: &str) -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item(key)
        .ok()?
        .filter(|v| !v.trim().is_empty())
}

/// Endpoints from local storage or the built-in defaults
pub fn endpoints() -> Endpoints {
    match stored(API_BASE_KEY) {
        Some(base) => Endpoints::with_base(&base),
        None => Endpoints::default(),
    }
}

pub fn date_locale() -> DateLocale {
    stored(DATE_LOCALE_KEY)
        .and_then(|locale| locale.parse().ok())
        .unwrap_or_default()
}

/// Gateway talking to the endpoints from the browser
#[derive(Debug, Clone)]
pub struct BrowserGateway {
    endpoints: Endpoints,
}

impl BrowserGateway {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

fn authorized(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.header(AUTH_HEADER, token),
        None => request,
    }
}

fn transport(error: gloo_net::Error) -> GatewayError {
    match error {
        gloo_net::Error::SerdeError(e) => GatewayError::Decode(e.to_string()),
        other => GatewayError::Transport(other.to_string()),
    }
}

fn js_error(value: JsValue) -> GatewayError {
    GatewayError::Transport(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let ok = response.ok();
    let status = response.status();
    let body = response.text().await.map_err(transport)?;

    if !ok {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or(body);
        return Err(GatewayError::Api { status, message });
    }

    serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl Gateway for BrowserGateway {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<LoginResponse> {
        let response = Request::post(&self.endpoints.auth_url)
            .json(credentials)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }

    async fn list_items(&self) -> GatewayResult<Vec<Item>> {
        let response = Request::get(&self.endpoints.items_url)
            .send()
            .await
            .map_err(transport)?;
        let result: ItemsResponse = decode(response).await?;
        Ok(result.items)
    }

    async fn list_categories(&self) -> GatewayResult<Vec<Category>> {
        let response = Request::get(&self.endpoints.categories_url())
            .send()
            .await
            .map_err(transport)?;
        let result: CategoriesResponse = decode(response).await?;
        Ok(result.categories)
    }

    async fn create_item(&self, item: &NewItem, token: Option<&str>) -> GatewayResult<bool> {
        let response = authorized(Request::post(&self.endpoints.items_url), token)
            .json(item)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        let result: SuccessResponse = decode(response).await?;
        Ok(result.success)
    }

    async fn delete_item(&self, id: ItemId, token: Option<&str>) -> GatewayResult<bool> {
        let response = authorized(Request::delete(&self.endpoints.delete_url(id)), token)
            .send()
            .await
            .map_err(transport)?;
        let result: SuccessResponse = decode(response).await?;
        Ok(result.success)
    }

    async fn upload_image(
        &self,
        file: &UploadFile,
        token: Option<&str>,
    ) -> GatewayResult<Option<String>> {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&file.mime_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(js_error)?;

        let form = web_sys::FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &file.name)
            .map_err(js_error)?;

        // No explicit content type: the browser adds the multipart boundary
        let response = authorized(Request::post(&self.endpoints.upload_url), token)
            .body(form)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        let result: UploadResponse = decode(response).await?;
        Ok(result.url.filter(|u| !u.is_empty()))
    }

    async fn list_images(&self) -> GatewayResult<Vec<ImageAsset>> {
        let response = Request::get(&self.endpoints.images_url)
            .send()
            .await
            .map_err(transport)?;
        let result: ImagesResponse = decode(response).await?;
        Ok(result.images)
    }
}

/// Read a picked file into memory
pub async fn read_file(file: &web_sys::File) -> Result<UploadFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Could not read {}: {:?}", file.name(), e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    Ok(UploadFile::new(file.name(), file.type_(), bytes))
}
