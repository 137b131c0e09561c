use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::{extractors::validated_query::ValidatedQuery, structs::genre::Genre, AppState};

pub async fn genres_list_route(
    State(app_state): State<Arc<AppState>>,
    ValidatedQuery(arguments): ValidatedQuery,
) -> Json<Vec<Genre>> {
    let page_size = app_state.config.page_size(arguments.max());
    let genres = app_state.catalog.list(&arguments, page_size);

    info!(
        "Listing {} genres (offset {:?}, max {:?}, sort {:?}, order {:?}, page size {page_size})",
        genres.len(),
        arguments.offset(),
        arguments.max(),
        arguments.sort(),
        arguments.order()
    );

    Json(genres)
}
