//! Post list query construction.
//!
//! A list request is reduced to a small set of [`Predicate`]s. The same set is
//! rendered to parameterized SQL for the SQLite backend and evaluated directly
//! against posts held in memory, so both backends agree on what matches.

use sqlx::{QueryBuilder, Sqlite};

use crate::models::{Post, PostFilter};

const SELECT_POSTS: &str =
    "SELECT id, title, content, authorId, category, tags, createdAt, updatedAt FROM posts";
const ORDER_BY: &str = " ORDER BY createdAt DESC, id DESC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// title OR content OR tags contains the term, ignoring case
    Search(String),
    /// category equals the value exactly
    Category(String),
}

impl Predicate {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            Predicate::Search(term) => {
                let needle = term.to_lowercase();
                [&post.title, &post.content, &post.tags]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            Predicate::Category(category) => post.category == *category,
        }
    }

    fn push_sql<'a>(&self, qb: &mut QueryBuilder<'a, Sqlite>) {
        match self {
            Predicate::Search(term) => {
                let pattern = format!("%{}%", escape_like(term));
                qb.push("(title LIKE ");
                qb.push_bind(pattern.clone());
                qb.push(" ESCAPE '\\' OR content LIKE ");
                qb.push_bind(pattern.clone());
                qb.push(" ESCAPE '\\' OR tags LIKE ");
                qb.push_bind(pattern);
                qb.push(" ESCAPE '\\')");
            }
            Predicate::Category(category) => {
                qb.push("category = ");
                qb.push_bind(category.clone());
            }
        }
    }
}

/// Conjunction of predicates, always ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    predicates: Vec<Predicate>,
}

impl PostQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.predicates.iter().all(|p| p.matches(post))
    }

    pub fn to_builder(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(SELECT_POSTS);
        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.push_sql(&mut qb);
        }
        qb.push(ORDER_BY);
        qb
    }
}

impl From<&PostFilter> for PostQuery {
    fn from(filter: &PostFilter) -> Self {
        let mut q = PostQuery::all();
        if let Some(search) = filter.search() {
            q = q.with(Predicate::Search(search.to_string()));
        }
        if let Some(category) = filter.category() {
            q = q.with(Predicate::Category(category.to_string()));
        }
        q
    }
}

/// LIKE treats `%` and `_` as wildcards; search terms are plain substrings.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
