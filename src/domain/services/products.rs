use crate::domain::model::{Product, ProductReport};
use crate::domain::services::{format_decimal, mean, mean_by_key};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductService {
    expensive_threshold: f64,
}

impl Default for ProductService {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl ProductService {
    pub fn new(expensive_threshold: f64) -> Self {
        Self {
            expensive_threshold,
        }
    }

    /// Products priced strictly above the threshold, most expensive first.
    pub fn expensive_sorted(&self, products: &[Product]) -> Vec<Product> {
        let mut expensive: Vec<Product> = products
            .iter()
            .filter(|p| p.price > self.expensive_threshold)
            .cloned()
            .collect();
        expensive.sort_by(|a, b| b.price.total_cmp(&a.price));
        expensive
    }

    pub fn stock_by_category(&self, products: &[Product]) -> BTreeMap<String, u64> {
        let mut totals: BTreeMap<String, u64> = BTreeMap::new();
        for product in products {
            *totals.entry(product.category.clone()).or_default() += u64::from(product.stock);
        }
        totals
    }

    /// `name;price` for every product, joined with `;`.
    pub fn price_report(&self, products: &[Product]) -> String {
        products
            .iter()
            .map(|p| format!("{};{}", p.name, format_decimal(p.price)))
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn average_price(&self, products: &[Product]) -> f64 {
        mean(products.iter().map(|p| p.price))
    }

    pub fn average_price_by_category(&self, products: &[Product]) -> BTreeMap<String, f64> {
        mean_by_key(products, |p| p.category.as_str(), |p| p.price)
    }

    pub fn report(&self, products: &[Product]) -> ProductReport {
        ProductReport {
            expensive: self.expensive_sorted(products),
            stock_by_category: self.stock_by_category(products),
            price_report: self.price_report(products),
            average_price: self.average_price(products),
            average_price_by_category: self.average_price_by_category(products),
        }
    }
}
