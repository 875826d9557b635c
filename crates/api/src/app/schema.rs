//! GraphQL schema: snake_case root fields backed by [`ProductService`].

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ID, Object, Schema};

use crate::app::dto::{self, ProductView};
use crate::app::errors::gateway_error_to_graphql;
use crate::app::services::ProductService;

pub type GatewaySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the aggregation service attached as context data.
pub fn build_schema(services: Arc<ProductService>) -> GatewaySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(services)
        .finish()
}

fn services<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<ProductService>> {
    ctx.data::<Arc<ProductService>>()
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every catalog product with its current stock.
    async fn products(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ProductView>> {
        let products = services(ctx)?
            .list_products()
            .await
            .map_err(gateway_error_to_graphql)?;
        Ok(products.into_iter().map(ProductView::from).collect())
    }

    #[graphql(name = "product_by_id")]
    async fn product_by_id(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<ProductView> {
        let id = dto::parse_product_id(&id)?;
        services(ctx)?
            .product_by_id(id)
            .await
            .map(ProductView::from)
            .map_err(gateway_error_to_graphql)
    }

    /// Best catalog match for a free-text name search.
    #[graphql(name = "product_by_name")]
    async fn product_by_name(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> async_graphql::Result<ProductView> {
        services(ctx)?
            .product_by_name(&name)
            .await
            .map(ProductView::from)
            .map_err(gateway_error_to_graphql)
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create the inventory record for a catalog product.
    #[graphql(name = "insert_product")]
    async fn insert_product(
        &self,
        ctx: &Context<'_>,
        id: ID,
        stock: i64,
    ) -> async_graphql::Result<ProductView> {
        let id = dto::parse_product_id(&id)?;
        services(ctx)?
            .insert_product(id, stock)
            .await
            .map(ProductView::from)
            .map_err(gateway_error_to_graphql)
    }

    /// Set the stock of a product to `quantity`.
    #[graphql(name = "increment_product")]
    async fn increment_product(
        &self,
        ctx: &Context<'_>,
        id: ID,
        quantity: i64,
    ) -> async_graphql::Result<ProductView> {
        let id = dto::parse_product_id(&id)?;
        services(ctx)?
            .increment_product(id, quantity)
            .await
            .map(ProductView::from)
            .map_err(gateway_error_to_graphql)
    }

    /// Behaviour depends on the configured decrement policy; by default it
    /// matches `increment_product`.
    #[graphql(name = "decrement_product")]
    async fn decrement_product(
        &self,
        ctx: &Context<'_>,
        id: ID,
        quantity: i64,
    ) -> async_graphql::Result<ProductView> {
        let id = dto::parse_product_id(&id)?;
        services(ctx)?
            .decrement_product(id, quantity)
            .await
            .map(ProductView::from)
            .map_err(gateway_error_to_graphql)
    }

    /// Remove the inventory record; only `message` is populated.
    #[graphql(name = "delete_product")]
    async fn delete_product(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<ProductView> {
        let id = dto::parse_product_id(&id)?;
        services(ctx)?
            .delete_product(id)
            .await
            .map(ProductView::from)
            .map_err(gateway_error_to_graphql)
    }
}
