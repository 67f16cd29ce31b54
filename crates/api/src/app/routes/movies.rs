use std::sync::Arc;

use axum::{
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use marquee_catalog::Payload;

use crate::app::errors::{self, ApiError};
use crate::app::{dto, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route("/director/:director", get(get_movies_by_director))
        .route(
            "/:id",
            get(get_movie).delete(delete_movie).patch(update_movie),
        )
}

pub async fn list_movies(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::GenreQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let movies = services.movies.list_movies(query.genre()).await?;
    if movies.is_empty() {
        return Ok(errors::message(StatusCode::NOT_FOUND, "no movies found"));
    }
    Ok((StatusCode::OK, Json(movies)).into_response())
}

pub async fn get_movie(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    match services.movies.get_movie_by_id(&id).await? {
        Some(movie) => Ok((StatusCode::OK, Json(movie)).into_response()),
        None => Ok(errors::message(StatusCode::NOT_FOUND, "movie not found")),
    }
}

pub async fn get_movies_by_director(
    Extension(services): Extension<Arc<AppServices>>,
    director: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(director) = director?;
    let movies = services.movies.get_movies_by_director(&director).await?;
    if movies.is_empty() {
        return Ok(errors::message(StatusCode::NOT_FOUND, "no movies found"));
    }
    Ok((StatusCode::OK, Json(movies)).into_response())
}

pub async fn create_movie(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Payload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = body?;
    let movie = services.movies.create_movie(&payload).await?;
    Ok((StatusCode::CREATED, Json(movie)).into_response())
}

pub async fn delete_movie(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let deleted_movie = services.movies.delete_movie(&id).await?;
    Ok((
        StatusCode::OK,
        Json(dto::DeletedMovieResponse {
            message: "Movie deleted",
            deleted_movie,
        }),
    )
        .into_response())
}

pub async fn update_movie(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Payload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = id?;
    let Json(partial) = body?;
    match services.movies.update_movie(&id, &partial).await? {
        Some(updated_movie) => Ok((
            StatusCode::OK,
            Json(dto::UpdatedMovieResponse {
                message: "Movie updated",
                updated_movie,
            }),
        )
            .into_response()),
        None => Ok(errors::message(StatusCode::NOT_FOUND, "Movie not found")),
    }
}
