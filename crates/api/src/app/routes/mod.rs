use axum::{
    Router,
    routing::{get, post},
};

pub mod graphql;
pub mod system;

/// Path the schema is served at.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Router for the GraphQL endpoint; `GET` serves GraphiQL when enabled.
pub fn router(graphiql: bool) -> Router {
    let route = if graphiql {
        get(graphql::graphiql).post(graphql::graphql_handler)
    } else {
        post(graphql::graphql_handler)
    };
    Router::new().route(GRAPHQL_PATH, route)
}
