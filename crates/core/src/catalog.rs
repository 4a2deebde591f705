use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::product::{Product, ProductId};

/// The catalog document: a product list plus an opaque ingredient section.
///
/// The document is a read-only deployment artifact, re-read from storage for
/// every request, so instances are short-lived.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub pizzas: Vec<Product>,
    /// Returned verbatim by the ingredient listing; no shape is assumed.
    #[serde(default)]
    pub toppings: Value,
}

impl Catalog {
    /// First product with a matching id. The catalog is small and unordered
    /// by id, so a linear scan is the lookup.
    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.pizzas.iter().find(|product| product.id == product_id)
    }

    /// Products matching the filter, in catalog order.
    pub fn select<'a>(&'a self, filter: &ToppingFilter) -> Vec<&'a Product> {
        if filter.is_empty() {
            return self.pizzas.iter().collect();
        }

        self.pizzas.iter().filter(|product| filter.matches(product)).collect()
    }
}

/// Requested ingredient names parsed from the `toppings` query parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToppingFilter(Vec<String>);

impl ToppingFilter {
    /// Parses the comma-separated query value. Absent or empty input means
    /// "no filter"; anything else is split verbatim, so stray separators
    /// yield names that match nothing rather than an error.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self(Vec::new()),
            Some(value) => Self(value.split(',').map(str::to_owned).collect()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every requested name must appear in at least one of the product's
    /// topping-category lists.
    pub fn matches(&self, product: &Product) -> bool {
        self.0.iter().all(|name| product.contains_topping(name))
    }
}
