use uuid::Uuid;

use super::{logged, Gateway, Query};
use crate::error::GatewayResult;
use crate::models::{Comment, NewComment};

const COMMENTS: &str = "comments";
const COMMENTS_WITH_STATS: &str = "comments_with_stats";

impl Gateway {
    /// Insert a comment. The content is trimmed; validation happens upstream.
    pub async fn create_comment(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        content: &str,
    ) -> GatewayResult<Comment> {
        let row = NewComment {
            user_id,
            post_id,
            content: content.trim().to_string(),
        };
        logged(
            self.insert_single(COMMENTS, &row).await,
            "Comment created",
            "Error creating comment",
        )
    }

    /// Comments of a post, with author and like counts, oldest first.
    pub async fn get_post_comments(&self, post_id: Uuid) -> GatewayResult<Vec<Comment>> {
        let query = Query::table(COMMENTS_WITH_STATS)
            .select("*")
            .eq("post_id", post_id)
            .order("created_at", true);
        logged(
            self.select_many(query).await,
            "Comments retrieved",
            "Error loading comments",
        )
    }

    pub async fn delete_comment(&self, comment_id: Uuid) -> GatewayResult<()> {
        let query = Query::table(COMMENTS).eq("id", comment_id);
        logged(
            self.delete_where(query).await,
            "Comment deleted",
            "Error deleting comment",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_gateway;
    use super::*;
    use crate::adapters::mock::MockResponse;
    use crate::traits::Method;

    #[tokio::test]
    async fn test_create_comment_trims_content() {
        let (gateway, mock) = test_gateway();
        let (user, post) = (Uuid::new_v4(), Uuid::new_v4());
        mock.on(
            Method::Post,
            "https://abc.supabase.co/rest/v1/comments",
            MockResponse::json(
                201,
                serde_json::json!({"id": Uuid::new_v4(), "post_id": post, "user_id": user, "content": "gg"}),
            ),
        );

        let comment = gateway.create_comment(user, post, "  gg \n").await.unwrap();
        assert_eq!(comment.content, "gg");
        assert_eq!(mock.get_requests()[0].body_json().unwrap()["content"], "gg");
    }

    #[tokio::test]
    async fn test_post_comments_query() {
        let (gateway, mock) = test_gateway();
        let post = Uuid::new_v4();
        mock.on(
            Method::Get,
            "https://abc.supabase.co/rest/v1/comments_with_stats",
            MockResponse::json(200, serde_json::json!([])),
        );

        gateway.get_post_comments(post).await.unwrap();
        let url = &mock.get_requests()[0].url;
        assert!(url.contains(&format!("post_id=eq.{}", post)));
        assert!(url.ends_with("order=created_at.asc"));
    }

    #[tokio::test]
    async fn test_delete_comment() {
        let (gateway, mock) = test_gateway();
        let id = Uuid::new_v4();
        mock.on(Method::Delete, "https://abc.supabase.co/rest/v1/comments", MockResponse::status(204));

        gateway.delete_comment(id).await.unwrap();
        assert_eq!(
            mock.get_requests()[0].url,
            format!("https://abc.supabase.co/rest/v1/comments?id=eq.{}", id)
        );
    }
}
