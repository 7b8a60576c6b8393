//! 期号目录：文章排序与相邻文章导航

mod collection;
mod navigator;

pub use self::{
    collection::{
        HIGHLIGHTED_TYPES, IssueArticles, IssueKind, classify, list_articles, list_highlighted,
        sort_articles,
    },
    navigator::{Direction, goto, next, previous, sibling},
};
