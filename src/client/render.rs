//! HTML fragments for the post list and the detail overlay.
//!
//! Every piece of post-derived text goes through [`escape_html`].

use crate::models::Post;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn tags_html(tags: &str) -> String {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| format!(r#"<span class="tag">{}</span>"#, escape_html(t)))
        .collect()
}

fn meta_html(post: &Post) -> String {
    format!(
        "<strong>Author:</strong> {} | <strong>Category:</strong> {} | <strong>Created:</strong> {} | <strong>Updated:</strong> {}",
        escape_html(&post.author_id),
        escape_html(&post.category),
        post.created_at.format("%Y-%m-%d"),
        post.updated_at.format("%Y-%m-%d"),
    )
}

pub fn post_item_html(post: &Post) -> String {
    let tags = tags_html(&post.tags);
    let tags_block = if tags.is_empty() { String::new() } else { format!(r#"<div class="post-tags">{tags}</div>"#) };
    format!(
        concat!(
            r#"<div class="post-item" data-id="{id}">"#,
            r#"<div class="post-header"><div class="post-title">{title}</div><div class="post-meta">{meta}</div></div>"#,
            r#"<div class="post-content">{content}</div>{tags}"#,
            r#"<div class="post-actions">"#,
            r#"<button class="view-btn" data-action="view" data-id="{id}">View</button>"#,
            r#"<button class="edit-btn" data-action="edit" data-id="{id}">Edit</button>"#,
            r#"<button class="delete-btn" data-action="delete" data-id="{id}">Delete</button>"#,
            r#"</div></div>"#,
        ),
        id = post.id,
        title = escape_html(&post.title),
        meta = meta_html(post),
        content = escape_html(&post.content),
        tags = tags_block,
    )
}

/// Render a list. `has_posts` tells the empty state whether anything exists at all.
pub fn posts_list_html(posts: &[Post], has_posts: bool) -> String {
    if posts.is_empty() {
        let hint = if has_posts {
            "No posts match your search criteria."
        } else {
            "Create your first post to get started!"
        };
        return format!(r#"<div class="empty-state"><h3>No posts found</h3><p>{hint}</p></div>"#);
    }
    posts.iter().map(post_item_html).collect()
}

pub fn post_modal_html(post: &Post) -> String {
    let tags = tags_html(&post.tags);
    let tags_block = if tags.is_empty() { String::new() } else { format!(r#"<div class="post-tags">{tags}</div>"#) };
    format!(
        concat!(
            r#"<div class="modal"><div class="modal-content">"#,
            r#"<div class="modal-header"><h2>{title}</h2><span class="close">&times;</span></div>"#,
            r#"<div class="modal-body"><div class="post-meta">{meta}</div>"#,
            r#"<div class="post-content-full">{content}</div>{tags}</div>"#,
            r#"</div></div>"#,
        ),
        title = escape_html(&post.title),
        meta = meta_html(post),
        content = escape_html(&post.content).replace('\n', "<br>"),
        tags = tags_block,
    )
}
