//! Client side of the post board: the controller that owns the page state,
//! the HTTP adapter it talks to, and the markup it renders.

pub mod api;
pub mod controller;
pub mod notify;
pub mod render;

pub use api::{ClientError, HttpPostsApi, PostsApi};
pub use controller::{ClientState, FormMode, OverlayClick, PostController, View};
pub use notify::{Notification, NotificationKind, NotificationTray, NOTIFICATION_TTL};
