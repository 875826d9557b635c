//! GraphQL output types and their mapping from domain records.

use async_graphql::{ID, SimpleObject};

use shelfgate_core::ProductId;
use shelfgate_products::Product;

use crate::app::errors;

/// A product as seen by API clients.
///
/// Deletion results populate only `message`.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Product")]
pub struct ProductView {
    pub id: Option<ID>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub stock: Option<i64>,
    pub message: Option<String>,
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.map(|id| ID(id.to_string())),
            name: p.name,
            code: p.code,
            stock: p.stock,
            message: p.message,
        }
    }
}

/// Parse a GraphQL `ID` argument into a canonical product id.
pub fn parse_product_id(id: &ID) -> async_graphql::Result<ProductId> {
    id.as_str().parse().map_err(errors::gateway_error_to_graphql)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_render_as_decimal_strings() {
        let view = ProductView::from(Product {
            id: Some(ProductId::new(42)),
            stock: Some(0),
            ..Product::default()
        });
        assert_eq!(view.id, Some(ID("42".to_string())));
        assert_eq!(view.stock, Some(0));
    }

    #[test]
    fn id_arguments_are_coerced() {
        assert_eq!(parse_product_id(&ID("007".to_string())).unwrap(), ProductId::new(7));
        assert!(parse_product_id(&ID("seven".to_string())).is_err());
    }
}
