//! `characters` table.

use uuid::Uuid;

use super::{logged, stamped, Gateway, Query};
use crate::error::GatewayResult;
use crate::models::{Character, CharacterChanges, CharacterSummary, NewCharacter};

const CHARACTERS: &str = "characters";

/// Most rows returned by a character search.
pub const SEARCH_LIMIT: usize = 10;

impl Gateway {
    pub async fn create_character(&self, character: &NewCharacter) -> GatewayResult<Character> {
        tracing::debug!(
            "Creating character {} ({})",
            character.name,
            character.subclass.as_str()
        );
        logged(
            self.insert_single(CHARACTERS, character).await,
            "Character created",
            "Error creating character",
        )
    }

    /// A user's characters, oldest first.
    pub async fn get_user_characters(&self, user_id: Uuid) -> GatewayResult<Vec<Character>> {
        tracing::debug!("Loading characters for user {}", user_id);
        let query = Query::table(CHARACTERS)
            .select("*")
            .eq("user_id", user_id)
            .order("created_at", true);
        let result: GatewayResult<Vec<Character>> = self.select_many(query).await;
        if let Ok(rows) = &result {
            tracing::info!("Loaded {} characters", rows.len());
        }
        logged(result, "Characters retrieved", "Error loading characters")
    }

    /// Apply changes to a character, stamping `updated_at`.
    pub async fn update_character(
        &self,
        id: Uuid,
        changes: &CharacterChanges,
    ) -> GatewayResult<Character> {
        tracing::debug!("Updating character {}", id);
        let body = stamped(changes)?;
        let query = Query::table(CHARACTERS).eq("id", id);
        logged(
            self.update_single(query, &body).await,
            "Character updated",
            "Error updating character",
        )
    }

    pub async fn delete_character(&self, id: Uuid) -> GatewayResult<()> {
        tracing::debug!("Deleting character {}", id);
        let query = Query::table(CHARACTERS).eq("id", id);
        logged(
            self.delete_where(query).await,
            "Character deleted",
            "Error deleting character",
        )
    }

    /// Case-insensitive substring search on character names.
    ///
    /// A blank term returns no results without a request.
    pub async fn search_characters(&self, term: &str) -> GatewayResult<Vec<CharacterSummary>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let query = Query::table(CHARACTERS)
            .select("id,name,subclass,user_id")
            .ilike("name", &format!("%{}%", term))
            .limit(SEARCH_LIMIT);
        let result = self.select_many(query).await;
        if let Err(e) = &result {
            tracing::error!("Error searching characters: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_gateway;
    use super::*;
    use crate::adapters::mock::MockResponse;
    use crate::models::Subclass;
    use crate::traits::Method;

    const URL: &str = "https://abc.supabase.co/rest/v1/characters";

    #[tokio::test]
    async fn test_get_user_characters_query() {
        let (gateway, mock) = test_gateway();
        let user = Uuid::new_v4();
        mock.on(Method::Get, URL, MockResponse::json(200, serde_json::json!([])));

        gateway.get_user_characters(user).await.unwrap();
        let req = &mock.get_requests()[0];
        assert_eq!(
            req.url,
            format!("{}?select=%2A&user_id=eq.{}&order=created_at.asc", URL, user)
        );
    }

    #[tokio::test]
    async fn test_create_character_returns_row() {
        let (gateway, mock) = test_gateway();
        let user = Uuid::new_v4();
        let id = Uuid::new_v4();
        mock.on(
            Method::Post,
            URL,
            MockResponse::json(
                201,
                serde_json::json!({
                    "id": id, "user_id": user, "name": "Ragnar", "subclass": "Barbaro",
                    "created_at": "2025-01-01T00:00:00Z", "updated_at": "2025-01-01T00:00:00Z"
                }),
            ),
        );

        let created = gateway
            .create_character(&NewCharacter {
                user_id: user,
                name: "Ragnar".to_string(),
                subclass: Subclass::Barbaro,
            })
            .await
            .unwrap();
        assert_eq!(created.id, id);

        let req = &mock.get_requests()[0];
        assert_eq!(req.header("prefer"), Some("return=representation"));
        assert_eq!(req.body_json().unwrap()["subclass"], "Barbaro");
    }

    #[tokio::test]
    async fn test_search_blank_term_makes_no_request() {
        let (gateway, mock) = test_gateway();
        assert!(gateway.search_characters("   ").await.unwrap().is_empty());
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_search_query() {
        let (gateway, mock) = test_gateway();
        mock.on(Method::Get, URL, MockResponse::json(200, serde_json::json!([])));

        gateway.search_characters(" rag ").await.unwrap();
        let url = &mock.get_requests()[0].url;
        assert!(url.contains("select=id%2Cname%2Csubclass%2Cuser_id"));
        assert!(url.contains("name=ilike.%25rag%25"));
        assert!(url.ends_with("limit=10"));
    }
}
