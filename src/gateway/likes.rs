//! Likes on posts and comments.
//!
//! A like is a join row keyed by the unique (user, target) pair. Writes are
//! idempotent: liking twice leaves one row, unliking twice is a no-op.

use uuid::Uuid;

use super::{logged, Gateway, Query};
use crate::error::GatewayResult;
use crate::models::{LikeAction, LikeTarget};
use crate::traits::{Method, Request};

impl Gateway {
    /// Whether `user_id` currently likes `target`.
    pub async fn user_has_liked(&self, target: LikeTarget, user_id: Uuid) -> GatewayResult<bool> {
        let query = Query::table(target.table())
            .select("id")
            .eq("user_id", user_id)
            .eq(target.column(), target.id())
            .limit(1);
        let rows: Vec<serde_json::Value> = self.select_many(query).await?;
        Ok(!rows.is_empty())
    }

    /// Put the like into the requested state.
    pub async fn set_like(
        &self,
        target: LikeTarget,
        user_id: Uuid,
        liked: bool,
    ) -> GatewayResult<LikeAction> {
        tracing::debug!(
            "Setting like on {} {} to {}",
            target.column(),
            target.id(),
            liked
        );
        let result = if liked {
            let query = Query::table(target.table()).on_conflict(&target.conflict_columns());
            let mut row = serde_json::Map::new();
            row.insert("user_id".to_string(), serde_json::json!(user_id));
            row.insert(target.column().to_string(), serde_json::json!(target.id()));
            let request = Request::new(Method::Post, self.rest_url(&query))
                .json(&row)?
                .header("Prefer", "resolution=ignore-duplicates,return=minimal");
            self.execute_authorized(request).await.map(|_| ())
        } else {
            let query = Query::table(target.table())
                .eq("user_id", user_id)
                .eq(target.column(), target.id());
            self.delete_where(query).await
        };
        logged(result, "Like updated", "Error updating like")?;
        Ok(LikeAction::from_liked(liked))
    }

    /// Flip the like state by reading it first.
    ///
    /// Callers that already track the state should call [`Gateway::set_like`]
    /// directly and save the round trip.
    pub async fn toggle_like(&self, target: LikeTarget, user_id: Uuid) -> GatewayResult<LikeAction> {
        let liked = self.user_has_liked(target, user_id).await?;
        self.set_like(target, user_id, !liked).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_gateway;
    use super::*;
    use crate::adapters::mock::MockResponse;

    const POST_LIKES: &str = "https://abc.supabase.co/rest/v1/post_likes";

    #[tokio::test]
    async fn test_has_liked_query() {
        let (gateway, mock) = test_gateway();
        let (post, user) = (Uuid::new_v4(), Uuid::new_v4());
        mock.on(
            Method::Get,
            POST_LIKES,
            MockResponse::json(200, serde_json::json!([{"id": "x"}])),
        );

        assert!(gateway.user_has_liked(LikeTarget::Post(post), user).await.unwrap());
        assert_eq!(
            mock.get_requests()[0].url,
            format!(
                "{}?select=id&user_id=eq.{}&post_id=eq.{}&limit=1",
                POST_LIKES, user, post
            )
        );
    }

    #[tokio::test]
    async fn test_set_like_upserts() {
        let (gateway, mock) = test_gateway();
        let (post, user) = (Uuid::new_v4(), Uuid::new_v4());
        mock.on(Method::Post, POST_LIKES, MockResponse::status(201));

        let action = gateway.set_like(LikeTarget::Post(post), user, true).await.unwrap();
        assert_eq!(action, LikeAction::Liked);

        let req = &mock.get_requests()[0];
        assert_eq!(req.url, format!("{}?on_conflict=user_id%2Cpost_id", POST_LIKES));
        assert_eq!(
            req.header("prefer"),
            Some("resolution=ignore-duplicates,return=minimal")
        );
        let body = req.body_json().unwrap();
        assert_eq!(body["post_id"], serde_json::json!(post));
        assert_eq!(body["user_id"], serde_json::json!(user));
    }

    #[tokio::test]
    async fn test_unlike_deletes_by_pair() {
        let (gateway, mock) = test_gateway();
        let (comment, user) = (Uuid::new_v4(), Uuid::new_v4());
        mock.on(
            Method::Delete,
            "https://abc.supabase.co/rest/v1/comment_likes",
            MockResponse::status(204),
        );

        let action = gateway
            .set_like(LikeTarget::Comment(comment), user, false)
            .await
            .unwrap();
        assert_eq!(action, LikeAction::Unliked);
        assert_eq!(
            mock.get_requests()[0].url,
            format!(
                "https://abc.supabase.co/rest/v1/comment_likes?user_id=eq.{}&comment_id=eq.{}",
                user, comment
            )
        );
    }

    #[tokio::test]
    async fn test_toggle_reads_then_writes_once() {
        let (gateway, mock) = test_gateway();
        let (post, user) = (Uuid::new_v4(), Uuid::new_v4());
        mock.on(Method::Get, POST_LIKES, MockResponse::json(200, serde_json::json!([])));
        mock.on(Method::Post, POST_LIKES, MockResponse::status(201));

        let action = gateway.toggle_like(LikeTarget::Post(post), user).await.unwrap();
        assert!(action.is_liked());
        assert_eq!(mock.requests_to(Method::Post, "/post_likes").len(), 1);
        assert!(mock.requests_to(Method::Delete, "/post_likes").is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_is_an_error() {
        let (gateway, mock) = test_gateway();
        mock.on(
            Method::Post,
            POST_LIKES,
            MockResponse::json(401, serde_json::json!({"message": "JWT expired"})),
        );

        let err = gateway
            .set_like(LikeTarget::Post(Uuid::new_v4()), Uuid::new_v4(), true)
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }
}
