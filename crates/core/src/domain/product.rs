use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

/// Product name reported when an order has no resolvable product.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub main_product_code: String,
    pub description: String,
    pub included_tonnage_quantity: f64,
}
