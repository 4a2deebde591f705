//! Deterministic demo catalog used by `forno seed` and tests.

use std::path::Path;

use serde_json::{json, Map, Value};

use forno_core::catalog::Catalog;
use forno_core::domain::product::{Product, ProductId};

use crate::StoreError;

/// The demo menu: three pizzas whose topping lists cover the ingredient
/// catalog, each with at least one image path under the served directory.
pub fn demo_catalog() -> Catalog {
    Catalog {
        pizzas: vec![
            product(
                1,
                "Margherita",
                8.5,
                &[("base", &["tomato", "mozzarella"]), ("herbs", &["basil"])],
                &["margherita.png"],
            ),
            product(
                2,
                "Quattro Formaggi",
                11.0,
                &[("base", &["mozzarella"]), ("cheese", &["gorgonzola", "parmesan", "taleggio"])],
                &["quattro-formaggi.png"],
            ),
            product(
                3,
                "Diavola",
                9.5,
                &[
                    ("base", &["tomato", "mozzarella"]),
                    ("meat", &["spicy salami"]),
                    ("extra", &["chili oil"]),
                ],
                &["diavola.png", "diavola-detail.png"],
            ),
        ],
        toppings: json!([
            { "id": 1, "name": "tomato" },
            { "id": 2, "name": "mozzarella" },
            { "id": 3, "name": "basil" },
            { "id": 4, "name": "gorgonzola" },
            { "id": 5, "name": "parmesan" },
            { "id": 6, "name": "taleggio" },
            { "id": 7, "name": "spicy salami" },
            { "id": 8, "name": "chili oil" }
        ]),
    }
}

pub async fn write_demo_catalog(path: &Path) -> Result<(), StoreError> {
    let body = serde_json::to_vec_pretty(&demo_catalog())
        .map_err(|source| StoreError::Encode { path: path.to_path_buf(), source })?;
    tokio::fs::write(path, body)
        .await
        .map_err(|source| StoreError::Write { path: path.to_path_buf(), source })
}

fn product(
    id: i64,
    name: &str,
    price: f64,
    toppings: &[(&str, &[&str])],
    img: &[&str],
) -> Product {
    let mut extra = Map::new();
    extra.insert("name".to_string(), Value::from(name));
    extra.insert("price".to_string(), Value::from(price));

    Product {
        id: ProductId(id),
        toppings: toppings
            .iter()
            .map(|(category, names)| {
                ((*category).to_string(), names.iter().map(|name| (*name).to_string()).collect())
            })
            .collect(),
        img: Some(img.iter().map(|path| (*path).to_string()).collect()),
        extra,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use forno_core::catalog::ToppingFilter;

    use crate::{CatalogStore, FileCatalogStore};

    use super::{demo_catalog, write_demo_catalog};

    #[test]
    fn every_demo_product_has_images_and_toppings() {
        let catalog = demo_catalog();
        assert_eq!(catalog.pizzas.len(), 3);

        for product in &catalog.pizzas {
            assert!(!product.toppings.is_empty());
            assert!(product.img.as_deref().is_some_and(|paths| !paths.is_empty()));
            assert!(product.extra.contains_key("name"));
            assert!(product.extra.contains_key("price"));
        }
    }

    #[test]
    fn demo_topping_names_are_filterable() {
        let catalog = demo_catalog();
        let names = catalog
            .toppings
            .as_array()
            .expect("demo toppings are a list")
            .iter()
            .map(|entry| entry["name"].as_str().expect("name is a string").to_string());

        for name in names {
            let filter = ToppingFilter::parse(Some(name.as_str()));
            assert!(
                !catalog.select(&filter).is_empty(),
                "topping `{name}` should match at least one product"
            );
        }
    }

    #[tokio::test]
    async fn written_fixture_loads_back_identically() {
        let dir = TempDir::new().expect("temp dir should create");
        let path = dir.path().join("db.json");

        write_demo_catalog(&path).await.expect("fixture should write");
        let loaded = FileCatalogStore::new(&path).load().await.expect("fixture should load");

        assert_eq!(loaded, demo_catalog());
    }
}
