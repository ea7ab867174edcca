use crate::error::ApiErrorBody;
use crate::models::{HealthBody, MessageBody, NewPost, Post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::list_posts,
        crate::routes::get_post,
        crate::routes::create_post,
        crate::routes::update_post,
        crate::routes::delete_post,
        crate::routes::list_categories,
    ),
    components(schemas(Post, NewPost, MessageBody, HealthBody, ApiErrorBody)),
    tags(
        (name = "posts", description = "Post operations"),
    )
)]
pub struct ApiDoc;
