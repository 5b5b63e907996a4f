//! Domain Services
//!
//! Reads join posts to their tags, which yields one row per (post, tag) and
//! a single row with no tag for untagged posts. These rows are folded back
//! into one [`Post`] per id.

use std::collections::HashMap;

use kernel::id::PostId;

use crate::domain::entities::{Post, Tag};
use crate::error::{BlogError, BlogResult};

/// Fold joined rows into posts, keeping the order in which posts first appear.
///
/// An empty input is `NotFound`.
pub fn fold_rows<I>(rows: I) -> BlogResult<Vec<Post>>
where
    I: IntoIterator<Item = (Post, Option<Tag>)>,
{
    let mut posts: Vec<Post> = Vec::new();
    let mut index: HashMap<PostId, usize> = HashMap::new();

    for (post, tag) in rows {
        let slot = match index.get(&post.id) {
            Some(&slot) => slot,
            None => {
                index.insert(post.id, posts.len());
                posts.push(Post {
                    tags: Vec::new(),
                    ..post
                });
                posts.len() - 1
            }
        };

        if let Some(tag) = tag {
            posts[slot].tags.push(tag);
        }
    }

    if posts.is_empty() {
        return Err(BlogError::NotFound);
    }

    Ok(posts)
}
