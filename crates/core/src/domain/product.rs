use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A product as it appears in the catalog document.
///
/// Only the fields the API reasons about are typed. Everything else the
/// catalog carries (name, price, description, ...) stays opaque and passes
/// through to clients unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Topping category name to the ingredient names it includes. Used for
    /// filter membership tests only.
    #[serde(default)]
    pub toppings: BTreeMap<String, Vec<String>>,
    /// Relative image paths. `None` means the catalog entry carries no image
    /// field at all, which is distinct from an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// True when any topping category of this product includes `name`.
    pub fn contains_topping(&self, name: &str) -> bool {
        self.toppings.values().any(|list| list.iter().any(|entry| entry == name))
    }
}

/// Base URL under which relative image paths are advertised to clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUrlBase {
    scheme: String,
    host: String,
}

impl ImageUrlBase {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self { scheme: scheme.into(), host: host.into() }
    }

    pub fn https(host: impl Into<String>) -> Self {
        Self::new("https", host)
    }

    pub fn absolute(&self, relative: &str) -> String {
        format!("{}://{}/{}", self.scheme, self.host, relative)
    }
}

/// Client-facing product representation: the raw image paths are replaced by
/// absolute `images` URLs, everything else passes through.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub toppings: BTreeMap<String, Vec<String>>,
    pub images: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductView {
    /// Renders by value; the source record is never mutated, so a cached
    /// catalog would stay clean across requests.
    pub fn render(product: &Product, base: &ImageUrlBase) -> Self {
        let images = product
            .img
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|path| base.absolute(path))
            .collect();

        Self {
            id: product.id,
            toppings: product.toppings.clone(),
            images,
            extra: product.extra.clone(),
        }
    }
}
