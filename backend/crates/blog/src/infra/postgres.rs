//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{PostId, TagId, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entities::{NewPost, NewTag, Post, Tag};
use crate::domain::repository::{PostRepository, PostTagRepository, TagRepository};
use crate::domain::services::fold_rows;
use crate::domain::value_objects::{PostCriteria, PostStatus};
use crate::error::{BlogError, BlogResult};

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Foreign key failures on association inserts mean an unknown tag id
fn map_association_error(err: sqlx::Error) -> BlogError {
    match err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            BlogError::BadRequest("unknown tag id".to_string())
        }
        other => BlogError::from(other),
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgBlogRepository {
    async fn find_by_criteria(&self, criteria: &PostCriteria) -> BlogResult<Vec<Post>> {
        // Page over distinct posts first, then join tags onto that page.
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            WITH page AS (
                SELECT
                    p.id, p.user_id, p.reading_time, p.status, p.title, p.subtitle,
                    p.image_url, p.content, p.slug, p.published_at, p.created_at,
                    p.updated_at, p.deleted_at
                FROM posts p
                WHERE TRUE
            "#,
        );

        if let Some(id) = criteria.id {
            qb.push(" AND p.id = ").push_bind(id);
        }
        if let Some(user_id) = criteria.user_id {
            qb.push(" AND p.user_id = ").push_bind(user_id);
        }
        match criteria.status {
            Some(status) => {
                qb.push(" AND p.status = ").push_bind(status.as_i16());
            }
            None => {
                qb.push(" AND p.status <> ")
                    .push_bind(PostStatus::Deleted.as_i16());
            }
        }
        if let Some(tag_id) = criteria.tag_id {
            qb.push(
                " AND EXISTS (SELECT 1 FROM posts_tags f WHERE f.post_id = p.id AND f.tag_id = ",
            )
            .push_bind(tag_id)
            .push(")");
        }

        qb.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ")
            .push_bind(criteria.effective_limit())
            .push(" OFFSET ")
            .push_bind(criteria.offset.max(0));

        qb.push(
            r#"
            )
            SELECT
                page.*,
                t.id AS tag_id,
                t.name AS tag_name,
                t.slug AS tag_slug
            FROM page
            LEFT JOIN posts_tags pt ON pt.post_id = page.id
            LEFT JOIN tags t ON t.id = pt.tag_id
            ORDER BY page.created_at DESC, page.id DESC, t.id
            "#,
        );

        let rows = qb
            .build_query_as::<PostTagRow>()
            .fetch_all(&self.pool)
            .await?;

        let rows = rows
            .into_iter()
            .map(PostTagRow::into_parts)
            .collect::<BlogResult<Vec<_>>>()?;

        fold_rows(rows)
    }

    async fn create(&self, post: &NewPost) -> BlogResult<PostId> {
        let id = sqlx::query_scalar::<_, PostId>(
            r#"
            INSERT INTO posts (
                user_id,
                reading_time,
                status,
                title,
                subtitle,
                image_url,
                content,
                slug
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(post.user_id)
        .bind(post.reading_time)
        .bind(PostStatus::Draft.as_i16())
        .bind(&post.title)
        .bind(&post.subtitle)
        .bind(&post.image_url)
        .bind(&post.content)
        .bind(&post.slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(&self, post: &Post, tags: Option<&[TagId]>) -> BlogResult<()> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query(
            r#"
            UPDATE posts SET
                reading_time = $2,
                status = $3,
                title = $4,
                subtitle = $5,
                image_url = $6,
                content = $7,
                slug = $8,
                published_at = $9,
                updated_at = $10
            WHERE id = $1 AND status <> $11
            "#,
        )
        .bind(post.id)
        .bind(post.reading_time)
        .bind(post.status.as_i16())
        .bind(&post.title)
        .bind(&post.subtitle)
        .bind(&post.image_url)
        .bind(&post.content)
        .bind(&post.slug)
        .bind(post.published_at)
        .bind(post.updated_at)
        .bind(PostStatus::Deleted.as_i16())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(BlogError::NotFound);
        }

        if let Some(tags) = tags {
            sqlx::query("DELETE FROM posts_tags WHERE post_id = $1")
                .bind(post.id)
                .execute(&mut *tx)
                .await?;

            for tag_id in tags {
                sqlx::query(
                    r#"
                    INSERT INTO posts_tags (tag_id, post_id)
                    VALUES ($1, $2)
                    ON CONFLICT DO NOTHING
                    "#,
                )
                .bind(*tag_id)
                .bind(post.id)
                .execute(&mut *tx)
                .await
                .map_err(map_association_error)?;
            }
        }

        tx.commit().await?;

        Ok(())
    }

    async fn soft_delete(&self, id: PostId, at: DateTime<Utc>) -> BlogResult<()> {
        let affected = sqlx::query(
            r#"
            UPDATE posts SET
                status = $2,
                deleted_at = $3,
                updated_at = $3
            WHERE id = $1 AND status <> $2
            "#,
        )
        .bind(id)
        .bind(PostStatus::Deleted.as_i16())
        .bind(at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(BlogError::NotFound);
        }

        Ok(())
    }
}

impl PostTagRepository for PgBlogRepository {
    async fn tag_post(&self, post_id: PostId, tag_id: TagId) -> BlogResult<()> {
        sqlx::query("INSERT INTO posts_tags (tag_id, post_id) VALUES ($1, $2)")
            .bind(tag_id)
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(map_association_error)?;

        Ok(())
    }
}

// ============================================================================
// Tag Repository Implementation
// ============================================================================

impl TagRepository for PgBlogRepository {
    async fn create_tag(&self, tag: &NewTag) -> BlogResult<Tag> {
        let row = sqlx::query_as::<_, TagRow>(
            r#"
            INSERT INTO tags (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug
            "#,
        )
        .bind(&tag.name)
        .bind(&tag.slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_tag())
    }

    async fn find_tag(&self, id: TagId) -> BlogResult<Tag> {
        let row = sqlx::query_as::<_, TagRow>("SELECT id, name, slug FROM tags WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into_tag())
    }

    async fn find_all_tags(&self) -> BlogResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>("SELECT id, name, slug FROM tags ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Err(BlogError::NotFound);
        }

        Ok(rows.into_iter().map(TagRow::into_tag).collect())
    }

    async fn update_tag(&self, tag: &Tag) -> BlogResult<()> {
        let affected = sqlx::query("UPDATE tags SET name = $2, slug = $3 WHERE id = $1")
            .bind(tag.id)
            .bind(&tag.name)
            .bind(&tag.slug)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(BlogError::NotFound);
        }

        Ok(())
    }

    async fn delete_tag(&self, id: TagId) -> BlogResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM posts_tags WHERE tag_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let affected = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        // Dropping the transaction rolls the association delete back
        if affected == 0 {
            return Err(BlogError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostTagRow {
    id: PostId,
    user_id: UserId,
    reading_time: i32,
    status: i16,
    title: String,
    subtitle: String,
    image_url: String,
    content: String,
    slug: String,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    tag_id: Option<TagId>,
    tag_name: Option<String>,
    tag_slug: Option<String>,
}

impl PostTagRow {
    fn into_parts(self) -> BlogResult<(Post, Option<Tag>)> {
        let status = PostStatus::from_i16(self.status)
            .ok_or_else(|| BlogError::Internal(format!("unknown post status {}", self.status)))?;

        let tag = match (self.tag_id, self.tag_name, self.tag_slug) {
            (Some(id), Some(name), Some(slug)) => Some(Tag { id, name, slug }),
            _ => None,
        };

        let post = Post {
            id: self.id,
            user_id: self.user_id,
            reading_time: self.reading_time,
            status,
            title: self.title,
            subtitle: self.subtitle,
            image_url: self.image_url,
            content: self.content,
            slug: self.slug,
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
            tags: Vec::new(),
        };

        Ok((post, tag))
    }
}

#[derive(sqlx::FromRow)]
struct TagRow {
    id: TagId,
    name: String,
    slug: String,
}

impl TagRow {
    fn into_tag(self) -> Tag {
        Tag {
            id: self.id,
            name: self.name,
            slug: self.slug,
        }
    }
}

// ============================================================================
// Database-backed tests
// ============================================================================
