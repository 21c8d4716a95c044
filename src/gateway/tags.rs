use uuid::Uuid;

use super::{logged, Gateway, Query};
use crate::error::GatewayResult;
use crate::models::{NewTag, PostTag};

const POST_TAGS: &str = "post_tags";

/// Columns read for a tag, including the joined character.
pub const TAG_COLUMNS: &str =
    "id,character_name,position_x,position_y,character_id,characters(name,subclass)";

#[derive(serde::Serialize)]
struct TagRow<'a> {
    post_id: Uuid,
    #[serde(flatten)]
    tag: &'a NewTag,
}

impl Gateway {
    /// Attach tags to a post. No request is made for an empty list.
    pub async fn create_post_tags(&self, post_id: Uuid, tags: &[NewTag]) -> GatewayResult<Vec<PostTag>> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        let normalized: Vec<NewTag> = tags.iter().cloned().map(NewTag::normalized).collect();
        let rows: Vec<TagRow<'_>> = normalized
            .iter()
            .map(|tag| TagRow { post_id, tag })
            .collect();
        logged(
            self.insert_many(POST_TAGS, &rows).await,
            "Post tags created",
            "Error creating post tags",
        )
    }

    pub async fn get_post_tags(&self, post_id: Uuid) -> GatewayResult<Vec<PostTag>> {
        let query = Query::table(POST_TAGS)
            .select(TAG_COLUMNS)
            .eq("post_id", post_id);
        logged(
            self.select_many(query).await,
            "Post tags retrieved",
            "Error loading post tags",
        )
    }

    pub async fn delete_post_tags(&self, post_id: Uuid) -> GatewayResult<()> {
        let query = Query::table(POST_TAGS).eq("post_id", post_id);
        logged(
            self.delete_where(query).await,
            "Post tags deleted",
            "Error deleting post tags",
        )
    }
}
