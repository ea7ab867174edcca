use tokio::time::Instant;

use super::api::{ClientError, PostsApi};
use super::notify::{Notification, NotificationKind};
use super::render;
use crate::models::{Id, NewPost, Post, PostFilter};

/// Client-side state: the last unfiltered post list and the post being edited.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClientState {
    pub posts: Vec<Post>,
    pub edit_target: Option<Id>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    pub fn heading(self) -> &'static str {
        match self {
            FormMode::Create => "Add New Post",
            FormMode::Edit => "Edit Post",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            FormMode::Create => "Add Post",
            FormMode::Edit => "Update Post",
        }
    }

    pub fn shows_cancel(self) -> bool {
        self == FormMode::Edit
    }
}

/// Where a click on the detail overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    CloseButton,
    Backdrop,
    Content,
}

/// The page surface the controller drives.
pub trait View {
    fn render_list(&mut self, html: String);
    fn populate_form(&mut self, post: &NewPost);
    fn clear_form(&mut self);
    fn set_form_mode(&mut self, mode: FormMode);
    fn open_overlay(&mut self, html: String);
    fn close_overlay(&mut self);
    fn notify(&mut self, notification: Notification);
    fn confirm(&mut self, question: &str) -> bool;
}

pub struct PostController<A, V> {
    api: A,
    view: V,
    state: ClientState,
}

impl<A: PostsApi, V: View> PostController<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self { api, view, state: ClientState::default() }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.view.notify(Notification::new(message, kind, Instant::now()));
    }

    fn notify_error(&mut self, prefix: &str, err: ClientError) {
        log::warn!("{prefix}{err}");
        self.notify(format!("{prefix}{err}"), NotificationKind::Error);
    }

    /// Fetch every post, replace the cache, render it.
    pub async fn load(&mut self) {
        match self.api.list(&PostFilter::default()).await {
            Ok(posts) => {
                self.state.posts = posts;
                let html = render::posts_list_html(&self.state.posts, !self.state.posts.is_empty());
                self.view.render_list(html);
            }
            Err(e) => {
                self.notify_error("Error loading posts: ", e);
                self.view.render_list(render::posts_list_html(&[], !self.state.posts.is_empty()));
            }
        }
    }

    /// Re-query with the current search box and category values. The cache is left alone.
    pub async fn filter(&mut self, search: &str, category: &str) {
        let filter = PostFilter {
            search: Some(search.to_string()),
            category: Some(category.to_string()),
        };
        match self.api.list(&filter).await {
            Ok(found) => {
                let html = render::posts_list_html(&found, !self.state.posts.is_empty());
                self.view.render_list(html);
            }
            Err(e) => self.notify_error("Error filtering posts: ", e),
        }
    }

    pub async fn submit(&mut self, form: NewPost) {
        let result = match self.state.edit_target {
            Some(id) => self.api.update(id, &form).await.map(|_| "Post updated successfully!"),
            None => self.api.create(&form).await.map(|_| "Post created successfully!"),
        };
        match result {
            Ok(message) => {
                self.notify(message, NotificationKind::Success);
                self.reset_form();
                self.load().await;
            }
            Err(e) => self.notify_error("Error: ", e),
        }
    }

    /// Switch the form into edit mode for a cached post. Unknown ids are ignored.
    pub fn edit(&mut self, id: Id) {
        let Some(post) = self.state.posts.iter().find(|p| p.id == id) else {
            return;
        };
        let form = NewPost::from(post);
        self.state.edit_target = Some(id);
        self.view.populate_form(&form);
        self.view.set_form_mode(FormMode::Edit);
    }

    pub fn cancel(&mut self) {
        self.reset_form();
    }

    fn reset_form(&mut self) {
        self.state.edit_target = None;
        self.view.clear_form();
        self.view.set_form_mode(FormMode::Create);
    }

    pub async fn view_post(&mut self, id: Id) {
        match self.api.get(id).await {
            Ok(post) => self.view.open_overlay(render::post_modal_html(&post)),
            Err(e) => self.notify_error("Error: ", e),
        }
    }

    pub fn overlay_clicked(&mut self, click: OverlayClick) {
        if matches!(click, OverlayClick::CloseButton | OverlayClick::Backdrop) {
            self.view.close_overlay();
        }
    }

    pub async fn delete(&mut self, id: Id) {
        if !self.view.confirm("Are you sure you want to delete this post?") {
            return;
        }
        match self.api.delete(id).await {
            Ok(()) => {
                self.load().await;
                self.notify("Post deleted successfully!", NotificationKind::Success);
            }
            Err(e) => self.notify_error("Error: ", e),
        }
    }
}
