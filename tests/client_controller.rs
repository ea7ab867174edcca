#![cfg(feature = "inmem-store")]

use async_trait::async_trait;
use postboard::client::api::ClientResult;
use postboard::client::{
    ClientError, FormMode, Notification, NotificationKind, NotificationTray, OverlayClick, PostController,
    PostsApi, View, NOTIFICATION_TTL,
};
use postboard::models::{Id, NewPost, Post, PostFilter};
use postboard::query::PostQuery;
use postboard::repo::inmem::InMemRepo;
use postboard::repo::{PostRepo, RepoError};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::time::Instant;

/// Talks to an in-memory repository the way the HTTP API would.
#[derive(Default)]
struct FakeApi {
    repo: InMemRepo,
    fail: AtomicBool,
}

impl FakeApi {
    fn failing(&self) -> ClientResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::Api("database is locked".into()));
        }
        Ok(())
    }
}

fn api_err(e: RepoError) -> ClientError {
    ClientError::Api(e.to_string())
}

#[async_trait]
impl PostsApi for FakeApi {
    async fn list(&self, filter: &PostFilter) -> ClientResult<Vec<Post>> {
        self.failing()?;
        self.repo.list_posts(&PostQuery::from(filter)).await.map_err(api_err)
    }
    async fn get(&self, id: Id) -> ClientResult<Post> {
        self.failing()?;
        self.repo.get_post(id).await.map_err(api_err)
    }
    async fn create(&self, post: &NewPost) -> ClientResult<Post> {
        self.failing()?;
        let input = post.clone().validate().map_err(|e| ClientError::Api(e.to_string()))?;
        self.repo.create_post(input).await.map_err(api_err)
    }
    async fn update(&self, id: Id, post: &NewPost) -> ClientResult<Post> {
        self.failing()?;
        let input = post.clone().validate().map_err(|e| ClientError::Api(e.to_string()))?;
        self.repo.update_post(id, input).await.map_err(api_err)
    }
    async fn delete(&self, id: Id) -> ClientResult<()> {
        self.failing()?;
        self.repo.delete_post(id).await.map_err(api_err)
    }
}

#[derive(Default)]
struct RecordingView {
    list_html: String,
    form: Option<NewPost>,
    mode: Option<FormMode>,
    overlay: Option<String>,
    notifications: NotificationTray,
    confirm_answer: bool,
}

impl View for RecordingView {
    fn render_list(&mut self, html: String) { self.list_html = html; }
    fn populate_form(&mut self, post: &NewPost) { self.form = Some(post.clone()); }
    fn clear_form(&mut self) { self.form = None; }
    fn set_form_mode(&mut self, mode: FormMode) { self.mode = Some(mode); }
    fn open_overlay(&mut self, html: String) { self.overlay = Some(html); }
    fn close_overlay(&mut self) { self.overlay = None; }
    fn notify(&mut self, notification: Notification) { self.notifications.push(notification); }
    fn confirm(&mut self, _question: &str) -> bool { self.confirm_answer }
}

fn form(title: &str, category: &str) -> NewPost {
    NewPost {
        title: Some(title.into()),
        content: Some(format!("{title} content")),
        author_id: Some("me".into()),
        category: Some(category.into()),
        tags: Some(String::new()),
    }
}

fn controller() -> PostController<FakeApi, RecordingView> {
    PostController::new(FakeApi::default(), RecordingView { confirm_answer: true, ..Default::default() })
}

fn last_note(c: &PostController<FakeApi, RecordingView>) -> &Notification {
    c.view().notifications.latest().unwrap()
}

#[tokio::test]
async fn load_renders_empty_state_then_posts() {
    let mut c = controller();
    c.load().await;
    assert!(c.state().posts.is_empty());
    assert!(c.view().list_html.contains("Create your first post"));

    c.submit(form("Hello <world>", "Tech")).await;
    assert_eq!(c.state().posts.len(), 1);
    assert!(c.view().list_html.contains("Hello &lt;world&gt;"));
    assert_eq!(last_note(&c).kind, NotificationKind::Success);
    assert_eq!(last_note(&c).message, "Post created successfully!");
}

#[tokio::test]
async fn edit_then_submit_updates_and_leaves_edit_mode() {
    let mut c = controller();
    c.submit(form("Original", "Tech")).await;
    let id = c.state().posts[0].id;

    c.edit(id);
    assert_eq!(c.state().edit_target, Some(id));
    assert_eq!(c.view().mode, Some(FormMode::Edit));
    assert_eq!(c.view().form.as_ref().unwrap().title.as_deref(), Some("Original"));

    c.submit(form("Changed", "Life")).await;
    assert_eq!(c.state().edit_target, None);
    assert_eq!(c.view().mode, Some(FormMode::Create));
    assert!(c.view().form.is_none());
    assert_eq!(c.state().posts.len(), 1);
    assert_eq!(c.state().posts[0].title, "Changed");
    assert_eq!(last_note(&c).message, "Post updated successfully!");
}

#[tokio::test]
async fn edit_unknown_id_is_ignored_and_cancel_resets() {
    let mut c = controller();
    c.edit(99);
    assert_eq!(c.state().edit_target, None);
    assert_eq!(c.view().mode, None);

    c.submit(form("One", "Tech")).await;
    let id = c.state().posts[0].id;
    c.edit(id);
    c.cancel();
    assert_eq!(c.state().edit_target, None);
    assert_eq!(c.view().mode, Some(FormMode::Create));
}

#[tokio::test]
async fn filter_renders_results_without_touching_cache() {
    let mut c = controller();
    c.submit(form("AI news", "Tech")).await;
    c.submit(form("Cooking", "Life")).await;

    c.filter("ai", "").await;
    assert!(c.view().list_html.contains("AI news"));
    assert!(!c.view().list_html.contains("Cooking"));
    assert_eq!(c.state().posts.len(), 2);

    c.filter("nothing-matches", "Tech").await;
    assert!(c.view().list_html.contains("No posts match"));
}

#[tokio::test]
async fn server_errors_become_notifications_without_state_change() {
    let mut c = controller();
    c.submit(form("Keep", "Tech")).await;
    let before = c.state().clone();

    // validation error from the API
    c.submit(NewPost { title: None, ..form("x", "Tech") }).await;
    assert_eq!(last_note(&c).kind, NotificationKind::Error);
    assert_eq!(last_note(&c).message, "Error: Missing required fields");
    assert_eq!(c.state(), &before);

    // transport-level failure while editing keeps the edit target
    let id = before.posts[0].id;
    c.edit(id);
    set_failing(&c, true);
    c.submit(form("Nope", "Tech")).await;
    assert_eq!(last_note(&c).message, "Error: database is locked");
    assert_eq!(c.state().edit_target, Some(id));
    assert_eq!(c.state().posts, before.posts);

    c.load().await;
    assert_eq!(last_note(&c).message, "Error loading posts: database is locked");
    assert_eq!(c.state().posts, before.posts);
}

fn set_failing(c: &PostController<FakeApi, RecordingView>, on: bool) {
    c.api().fail.store(on, Ordering::SeqCst);
}

#[tokio::test]
async fn view_opens_overlay_and_closes_on_outside_click() {
    let mut c = controller();
    c.submit(form("Line", "Tech")).await;
    let id = c.state().posts[0].id;

    c.view_post(id).await;
    assert!(c.view().overlay.as_ref().unwrap().contains("modal-content"));

    c.overlay_clicked(OverlayClick::Content);
    assert!(c.view().overlay.is_some());
    c.overlay_clicked(OverlayClick::Backdrop);
    assert!(c.view().overlay.is_none());

    c.view_post(id).await;
    c.overlay_clicked(OverlayClick::CloseButton);
    assert!(c.view().overlay.is_none());

    c.view_post(12345).await;
    assert!(c.view().overlay.is_none());
    assert_eq!(last_note(&c).message, "Error: Post not found");
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let mut c = controller();
    c.submit(form("Doomed", "Tech")).await;
    let id = c.state().posts[0].id;

    c.view_mut().confirm_answer = false;
    c.delete(id).await;
    assert_eq!(c.state().posts.len(), 1);

    c.view_mut().confirm_answer = true;
    c.delete(id).await;
    assert!(c.state().posts.is_empty());
    assert_eq!(last_note(&c).message, "Post deleted successfully!");

    c.delete(id).await;
    assert_eq!(last_note(&c).message, "Error: Post not found");
}

#[tokio::test]
async fn notifications_dismiss_themselves() {
    let mut c = controller();
    c.view_post(1).await;
    let now = Instant::now();
    assert_eq!(c.view_mut().notifications.visible(now).len(), 1);
    assert!(c.view_mut().notifications.visible(now + NOTIFICATION_TTL).is_empty());
}
