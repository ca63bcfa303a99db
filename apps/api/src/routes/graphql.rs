//! GraphQL HTTP route handlers
//!
//! - `POST /graphql` executes a query or mutation against the schema
//! - `GET /graphql?query=...` executes the query from the URL
//! - `GET /graphql` without a query serves the GraphiQL IDE when enabled

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{Extension, FromRequest, Query, Request},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::ErrorResponse;
use crate::graphql::BookshelfSchema;

/// Whether `GET /graphql` may answer with the IDE
#[derive(Debug, Clone, Copy)]
struct GraphiQL(bool);

/// The part of a GET query string that decides between IDE and execution
#[derive(Debug, Deserialize)]
struct GetParams {
    query: Option<String>,
}

/// Create the GraphQL router
pub fn graphql_router(schema: BookshelfSchema, graphiql: bool) -> Router {
    Router::new()
        .route("/", get(graphql_get).post(graphql_handler))
        .layer(Extension(schema))
        .layer(Extension(GraphiQL(graphiql)))
}

/// Execute a GraphQL request against the schema
///
/// Field errors are reported inside the response body; the HTTP status
/// stays 200 so partial results reach the client.
async fn graphql_handler(
    Extension(schema): Extension<BookshelfSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    execute(&schema, req.into_inner()).await
}

/// Execute a query carried in the URL, or serve GraphiQL when there is none
async fn graphql_get(
    Extension(schema): Extension<BookshelfSchema>,
    Extension(GraphiQL(graphiql)): Extension<GraphiQL>,
    Query(params): Query<GetParams>,
    request: Request,
) -> Response {
    if params.query.is_none() {
        if graphiql {
            return graphiql_page().into_response();
        }
        let body = ErrorResponse {
            code: "MISSING_QUERY",
            message: "Must provide query string.".to_string(),
        };
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    }

    let req: GraphQLRequest = match GraphQLRequest::from_request(request, &()).await {
        Ok(req) => req,
        Err(rejection) => {
            tracing::debug!("Rejected GraphQL GET request");
            return rejection.into_response();
        }
    };

    execute(&schema, req.into_inner()).await.into_response()
}

async fn execute(schema: &BookshelfSchema, request: async_graphql::Request) -> GraphQLResponse {
    let operation = request.operation_name.clone();

    let response = schema.execute(request).await;
    if response.is_err() {
        tracing::debug!(
            operation = operation.as_deref().unwrap_or("<anonymous>"),
            errors = response.errors.len(),
            "GraphQL request completed with errors"
        );
    }

    response.into()
}

/// GraphiQL IDE for development
fn graphiql_page() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
