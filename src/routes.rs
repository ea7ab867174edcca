use std::sync::Arc;
use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::models::*;
use crate::query::PostQuery;
use crate::repo::Repo;

pub fn config(cfg: &mut web::ServiceConfig) {
    // extractor rejections use the same `{error}` body as handler errors
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| json_rejection(err).into()))
        .app_data(web::PathConfig::default().error_handler(|_err, _req| ApiError::NotFound.into()))
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err, _req| ApiError::Validation(err.to_string()).into()),
        )
        .service(
            web::scope("/api")
                .service(web::resource("/health").route(web::get().to(health)))
                .service(
                    web::resource("/posts")
                        .route(web::get().to(list_posts))
                        .route(web::post().to(create_post)),
                )
                .service(
                    web::resource("/posts/{id}")
                        .route(web::get().to(get_post))
                        .route(web::put().to(update_post))
                        .route(web::delete().to(delete_post)),
                )
                .service(web::resource("/categories").route(web::get().to(list_categories))),
        );
}

/// A body that is not declared as JSON carries no fields at all.
fn json_rejection(err: JsonPayloadError) -> ApiError {
    match err {
        JsonPayloadError::ContentType => {
            ValidationError { missing: vec!["title", "content", "authorId", "category"] }.into()
        }
        other => ApiError::Validation(other.to_string()),
    }
}

#[derive(Clone)]
pub struct AppState { pub repo: Arc<dyn Repo> }

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up", body = HealthBody))
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthBody { status: "ok".into() })
}

#[utoipa::path(
    get,
    path = "/api/posts",
    params(PostFilter),
    responses(
        (status = 200, description = "Matching posts, newest first", body = [Post]),
        (status = 500, description = "Storage failure", body = ApiErrorBody)
    )
)]
pub async fn list_posts(data: web::Data<AppState>, filter: web::Query<PostFilter>) -> Result<HttpResponse, ApiError> {
    let query = PostQuery::from(&filter.into_inner());
    let posts = data.repo.list_posts(&query).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 404, description = "Post not found", body = ApiErrorBody)
    )
)]
pub async fn get_post(data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let post = data.repo.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = NewPost,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Missing required fields", body = ApiErrorBody)
    )
)]
pub async fn create_post(data: web::Data<AppState>, payload: web::Json<NewPost>) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner().validate()?;
    let post = data.repo.create_post(input).await?;
    log::info!("created post {}", post.id);
    Ok(HttpResponse::Created().json(post))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    request_body = NewPost,
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post updated", body = Post),
        (status = 400, description = "Missing required fields", body = ApiErrorBody),
        (status = 404, description = "Post not found", body = ApiErrorBody)
    )
)]
pub async fn update_post(
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<NewPost>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner().validate()?;
    let post = data.repo.update_post(path.into_inner(), input).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = MessageBody),
        (status = 404, description = "Post not found", body = ApiErrorBody)
    )
)]
pub async fn delete_post(data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    data.repo.delete_post(id).await?;
    log::info!("deleted post {id}");
    Ok(HttpResponse::Ok().json(MessageBody { message: "Post deleted successfully".into() }))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Distinct categories, sorted", body = [String]),
        (status = 500, description = "Storage failure", body = ApiErrorBody)
    )
)]
pub async fn list_categories(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let categories = data.repo.list_categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}
