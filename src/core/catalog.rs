use crate::domain::ports::Storage;
use crate::utils::error::{BotError, Result};
use crate::utils::html::strip_html;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// The product document, decoded only as far as `data`. Each accessor checks its own
/// field, so a broken `images` list does not take `description` down with it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDocument {
    #[serde(default)]
    data: Value,
}

fn shape_error(field: &str, expected: &str) -> BotError {
    BotError::DocumentError {
        message: format!("data.{} is missing or not {}", field, expected),
    }
}

fn image_id(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ProductDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn data(&self) -> Result<&Map<String, Value>> {
        self.data
            .as_object()
            .ok_or_else(|| BotError::DocumentError {
                message: "data is missing or not an object".to_string(),
            })
    }

    fn field(&self, name: &str) -> Result<&Value> {
        self.data()?
            .get(name)
            .ok_or_else(|| shape_error(name, "present"))
    }

    fn string_field(&self, name: &str) -> Result<&str> {
        self.field(name)?
            .as_str()
            .ok_or_else(|| shape_error(name, "a string"))
    }

    fn array_field(&self, name: &str) -> Result<&Vec<Value>> {
        self.field(name)?
            .as_array()
            .ok_or_else(|| shape_error(name, "an array"))
    }

    pub fn description(&self) -> Result<String> {
        Ok(strip_html(self.string_field("description")?))
    }

    pub fn product_name(&self) -> Result<String> {
        Ok(strip_html(self.string_field("product_name")?))
    }

    /// Display names in order; entries without a string name are skipped.
    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(self
            .array_field("category_list")?
            .iter()
            .filter_map(|c| c.get("local_display_name").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    pub fn image_summaries(&self) -> Result<Vec<String>> {
        self.array_field("images")?
            .iter()
            .map(|image| {
                let id = image
                    .get("id")
                    .ok_or_else(|| shape_error("images[].id", "present"))?;
                let dimension = |key: &str| {
                    image
                        .get(key)
                        .and_then(Value::as_f64)
                        .ok_or_else(|| shape_error(&format!("images[].{}", key), "a number"))
                };
                Ok(format!(
                    "ID: {}, Lebar: {}, Tinggi: {}",
                    image_id(id),
                    dimension("width")? as i64,
                    dimension("height")? as i64
                ))
            })
            .collect()
    }

    /// Thumbnail URLs of all images, first occurrence wins. Non-string entries are skipped.
    pub fn unique_urls(&self) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for image in self.array_field("images")? {
            let list = image
                .get("thumb_url_list")
                .and_then(Value::as_array)
                .ok_or_else(|| shape_error("images[].thumb_url_list", "an array"))?;
            for url in list.iter().filter_map(Value::as_str) {
                if seen.insert(url) {
                    urls.push(url.to_string());
                }
            }
        }

        Ok(urls)
    }

    /// Unix seconds. Integral floats such as `1690000000.0` are accepted.
    pub fn create_time(&self) -> Result<i64> {
        let value = self.field("create_time")?;
        value
            .as_i64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| shape_error("create_time", "an integer"))
    }

    /// Names from the optional `products` list containing `term` (case-sensitive).
    pub fn search_products(&self, term: &str) -> Result<Vec<String>> {
        let products = match self.data()?.get("products") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(_) => self.array_field("products")?,
        };
        Ok(products
            .iter()
            .filter_map(|p| p.get("product_name").and_then(Value::as_str))
            .filter(|name| name.contains(term))
            .map(str::to_string)
            .collect())
    }
}

/// The product document behind a storage backend. Every call reads the file again
/// so edits to it show up on the next message without a restart.
#[derive(Debug, Clone)]
pub struct ProductCatalog<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> ProductCatalog<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub async fn load(&self) -> Result<ProductDocument> {
        tracing::debug!("Reading product document {}", self.path);
        let bytes = self.storage.read_file(&self.path).await?;
        ProductDocument::from_slice(&bytes)
    }

    pub async fn description(&self) -> Result<String> {
        self.load().await?.description()
    }

    pub async fn product_name(&self) -> Result<String> {
        self.load().await?.product_name()
    }

    pub async fn categories(&self) -> Result<Vec<String>> {
        self.load().await?.categories()
    }

    pub async fn image_summaries(&self) -> Result<Vec<String>> {
        self.load().await?.image_summaries()
    }

    pub async fn unique_urls(&self) -> Result<Vec<String>> {
        self.load().await?.unique_urls()
    }

    pub async fn create_time(&self) -> Result<i64> {
        self.load().await?.create_time()
    }

    pub async fn search_products(&self, term: &str) -> Result<Vec<String>> {
        self.load().await?.search_products(term)
    }
}
