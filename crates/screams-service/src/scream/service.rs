//! Scream operations: posting, reading, commenting, liking and deleting.

use std::sync::Arc;

use tracing::info;

use screams_core::error::AppError;
use screams_core::result::AppResult;
use screams_core::types::generate_document_id;
use screams_database::repositories::{CommentRepository, LikeRepository, ScreamRepository};
use screams_entity::{Comment, Like, Scream, ScreamWithComments};

use crate::context::RequestContext;

/// Handles scream, comment and like use cases.
#[derive(Debug, Clone)]
pub struct ScreamService {
    screams: Arc<ScreamRepository>,
    comments: Arc<CommentRepository>,
    likes: Arc<LikeRepository>,
}

impl ScreamService {
    /// Creates a new scream service.
    pub fn new(
        screams: Arc<ScreamRepository>,
        comments: Arc<CommentRepository>,
        likes: Arc<LikeRepository>,
    ) -> Self {
        Self {
            screams,
            comments,
            likes,
        }
    }

    /// All screams, newest first.
    pub async fn list(&self) -> AppResult<Vec<Scream>> {
        self.screams.find_all().await
    }

    /// Posts a new scream as the caller.
    pub async fn create(&self, ctx: &RequestContext, body: &str) -> AppResult<Scream> {
        if body.trim().is_empty() {
            return Err(AppError::field("body", "Body must not be empty"));
        }

        let scream = Scream::new(generate_document_id(), body, &ctx.handle, &ctx.image_url);
        let scream = self.screams.create(&scream).await?;

        info!(scream_id = %scream.scream_id, handle = %ctx.handle, "Scream created");
        Ok(scream)
    }

    /// One scream with its comments, newest first.
    pub async fn get(&self, scream_id: &str) -> AppResult<ScreamWithComments> {
        let scream = self.require(scream_id).await?;
        let comments = self.comments.find_by_scream(scream_id).await?;
        Ok(ScreamWithComments { scream, comments })
    }

    /// Comments on a scream as the caller.
    pub async fn comment(
        &self,
        ctx: &RequestContext,
        scream_id: &str,
        body: &str,
    ) -> AppResult<Comment> {
        if body.trim().is_empty() {
            return Err(AppError::field("body", "Comment must not be empty"));
        }

        self.require(scream_id).await?;
        self.screams.add_comments(scream_id, 1).await?;

        let comment = Comment::new(
            generate_document_id(),
            body,
            scream_id,
            &ctx.handle,
            &ctx.image_url,
        );
        let comment = self.comments.create(&comment).await?;

        info!(scream_id, comment_id = %comment.comment_id, handle = %ctx.handle, "Comment added");
        Ok(comment)
    }

    /// Likes a scream as the caller and returns the updated scream.
    pub async fn like(&self, ctx: &RequestContext, scream_id: &str) -> AppResult<Scream> {
        self.require(scream_id).await?;

        if self
            .likes
            .find_by_user_and_scream(&ctx.handle, scream_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Scream already liked"));
        }

        let like = Like::new(generate_document_id(), scream_id, &ctx.handle);
        self.likes.create(&like).await?;
        let scream = self.screams.add_likes(scream_id, 1).await?;

        info!(scream_id, handle = %ctx.handle, like_count = scream.like_count, "Scream liked");
        Ok(scream)
    }

    /// Removes the caller's like and returns the updated scream.
    pub async fn unlike(&self, ctx: &RequestContext, scream_id: &str) -> AppResult<Scream> {
        self.require(scream_id).await?;

        let like = self
            .likes
            .find_by_user_and_scream(&ctx.handle, scream_id)
            .await?
            .ok_or_else(|| AppError::conflict("Scream not liked yet"))?;

        self.likes.delete(&like.like_id).await?;
        let scream = self.screams.add_likes(scream_id, -1).await?;

        info!(scream_id, handle = %ctx.handle, like_count = scream.like_count, "Scream unliked");
        Ok(scream)
    }

    /// Deletes one of the caller's screams.
    ///
    /// Only the scream document is removed here; comments, likes and
    /// notifications are removed by the cascade trigger.
    pub async fn delete(&self, ctx: &RequestContext, scream_id: &str) -> AppResult<()> {
        let scream = self.require(scream_id).await?;

        if !scream.is_authored_by(&ctx.handle) {
            return Err(AppError::forbidden("Unauthorized"));
        }

        self.screams.delete(scream_id).await?;
        info!(scream_id, handle = %ctx.handle, "Scream deleted");
        Ok(())
    }

    async fn require(&self, scream_id: &str) -> AppResult<Scream> {
        self.screams
            .find_by_id(scream_id)
            .await?
            .ok_or_else(|| AppError::not_found("Scream not found"))
    }
}
