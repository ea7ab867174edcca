use crate::models::PostInput;
use crate::repo::{PostRepo, RepoResult};

struct Sample {
    title: &'static str,
    content: &'static str,
    author_id: &'static str,
    category: &'static str,
    tags: &'static str,
}

const SAMPLE_POSTS: &[Sample] = &[
    Sample {
        title: "Getting Started with Web Development",
        content: "Web development is an exciting journey that combines creativity with technical skills. In this post, we'll explore the fundamentals of HTML, CSS, and JavaScript that every aspiring web developer should know. From creating your first webpage to understanding responsive design principles, this guide will set you on the path to becoming a proficient web developer.",
        author_id: "john_doe",
        category: "Digital and Tech",
        tags: "web development,programming,tutorial",
    },
    Sample {
        title: "The Future of Artificial Intelligence",
        content: "Artificial Intelligence is rapidly transforming our world, from autonomous vehicles to smart home assistants. This technology is not just about robots; it's about creating systems that can learn, adapt, and make decisions. As we move forward, AI will continue to shape industries, create new opportunities, and challenge our understanding of what's possible.",
        author_id: "jane_smith",
        category: "Digital and Tech",
        tags: "AI,technology,future",
    },
    Sample {
        title: "Building Scalable Web Applications",
        content: "Scalability is a crucial aspect of modern web applications. This post covers the fundamental principles of building applications that can handle growth and increased load. We'll discuss database optimization, caching strategies, load balancing, and microservices architecture.",
        author_id: "tech_guru",
        category: "Digital and Tech",
        tags: "scalability,architecture,web development",
    },
];

pub fn sample_posts() -> Vec<PostInput> {
    SAMPLE_POSTS
        .iter()
        .map(|s| PostInput {
            title: s.title.into(),
            content: s.content.into(),
            author_id: s.author_id.into(),
            category: s.category.into(),
            tags: s.tags.into(),
        })
        .collect()
}

/// Insert the sample posts if the table is empty. Returns how many were inserted.
///
/// The emptiness check and the inserts are separate statements, so two
/// processes starting against the same empty database can both seed.
pub async fn seed_if_empty<R: PostRepo + ?Sized>(repo: &R) -> RepoResult<usize> {
    if repo.count_posts().await? > 0 {
        return Ok(0);
    }
    let mut inserted = 0;
    for post in sample_posts() {
        repo.create_post(post).await?;
        inserted += 1;
    }
    tracing::info!(inserted, "sample posts inserted");
    Ok(inserted)
}
