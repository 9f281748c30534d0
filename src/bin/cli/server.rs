use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{error, info};

use openshelf::{
    types::{
        author::AuthorDetail,
        book::SearchResponse,
        cover::CoverSize,
        edition::Edition,
        inside::InsideResults,
        key::{author_key_from_id, work_id_from_key},
        lookup::SubjectBooks,
        work::WorkDetail,
    },
    CatalogClient,
};

pub struct TheStateOfAffairs {
    client: CatalogClient,
}

type ApiResult<T> = Result<Json<T>, StatusCode>;

pub fn router(client: CatalogClient) -> Router {
    let state = Arc::new(TheStateOfAffairs { client });
    Router::new()
        .route("/api/search", get(search))
        .route("/api/works/:id", get(work))
        .route("/api/authors/:id", get(author))
        .route("/api/subjects/:subject", get(subject))
        .route("/api/isbn/:isbn", get(isbn))
        .route("/api/inside/:item", get(inside))
        .route("/api/cover/:id", get(cover))
        .with_state(state)
}

pub async fn start(client: CatalogClient, address: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = address.parse()?;
    info!("Listening on {addr}.");
    axum::Server::bind(&addr)
        .serve(router(client).into_make_service())
        .await?;
    Ok(())
}

fn found<T>(value: Option<T>, what: &str) -> ApiResult<T> {
    match value {
        Some(value) => Ok(Json(value)),
        None => {
            error!("No {what} to serve.");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

fn required<'a>(params: &'a HashMap<String, String>, name: &str) -> Result<&'a str, StatusCode> {
    match params.get(name).map(|x| x.trim()) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<TheStateOfAffairs>>,
) -> ApiResult<SearchResponse> {
    let query = required(&params, "q")?;
    info!("Search for {query:?}.");
    Ok(Json(state.client.search(query).await))
}

async fn work(
    Path(id): Path<String>,
    State(state): State<Arc<TheStateOfAffairs>>,
) -> ApiResult<WorkDetail> {
    found(state.client.book_details(work_id_from_key(&id)).await, "work")
}

async fn author(
    Path(id): Path<String>,
    State(state): State<Arc<TheStateOfAffairs>>,
) -> ApiResult<AuthorDetail> {
    found(state.client.author_details(&author_key_from_id(&id)).await, "author")
}

async fn subject(
    Path(subject): Path<String>,
    State(state): State<Arc<TheStateOfAffairs>>,
) -> ApiResult<SubjectBooks> {
    found(state.client.subject_books(&subject).await, "subject")
}

async fn isbn(
    Path(isbn): Path<String>,
    State(state): State<Arc<TheStateOfAffairs>>,
) -> ApiResult<Edition> {
    found(state.client.book_by_isbn(&isbn).await, "edition")
}

async fn inside(
    Path(item): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<TheStateOfAffairs>>,
) -> ApiResult<InsideResults> {
    let query = required(&params, "q")?;
    found(state.client.search_inside(query, &item).await, "full-text results")
}

#[derive(Serialize)]
struct CoverLink {
    url: String,
}

async fn cover(
    Path(id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<TheStateOfAffairs>>,
) -> ApiResult<CoverLink> {
    let size = match params.get("size") {
        Some(size) => size.parse::<CoverSize>().map_err(|_| StatusCode::BAD_REQUEST)?,
        None => CoverSize::default(),
    };
    Ok(Json(CoverLink {
        url: state.client.cover_url(id, size),
    }))
}
