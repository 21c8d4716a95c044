//! Query-string builder for the REST dialect.
//!
//! Filters are `column=op.value` pairs; `select`, `order`, `limit` and
//! `on_conflict` are plain parameters. Values are percent-encoded.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    params: Vec<(String, String)>,
}

impl Query {
    /// Start a query against a table or view.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            params: Vec::new(),
        }
    }

    /// Start a query against a stored procedure.
    pub fn rpc(function: &str) -> Self {
        Self::table(format!("rpc/{}", function))
    }

    pub fn select(self, columns: &str) -> Self {
        self.param("select", columns)
    }

    /// `column = value`
    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("eq.{}", value))
    }

    /// Case-insensitive `LIKE`. `*` or `%` act as wildcards.
    pub fn ilike(self, column: &str, pattern: &str) -> Self {
        self.param(column, format!("ilike.{}", pattern))
    }

    pub fn order(self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.param("order", format!("{}.{}", column, dir))
    }

    pub fn limit(self, n: usize) -> Self {
        self.param("limit", n.to_string())
    }

    /// Conflict target for upserts.
    pub fn on_conflict(self, columns: &str) -> Self {
        self.param("on_conflict", columns)
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    /// Full URL under the given REST base (`{project}/rest/v1`).
    pub fn to_url(&self, rest_base: &str) -> String {
        let mut url = format!("{}/{}", rest_base.trim_end_matches('/'), self.table);
        if !self.params.is_empty() {
            let query = self
                .params
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://abc.supabase.co/rest/v1";

    #[test]
    fn test_plain_table() {
        assert_eq!(
            Query::table("media_posts_with_stats").to_url(BASE),
            "https://abc.supabase.co/rest/v1/media_posts_with_stats"
        );
    }

    #[test]
    fn test_filters_in_order() {
        let url = Query::table("characters")
            .select("*")
            .eq("user_id", "42")
            .order("created_at", true)
            .to_url(BASE);
        assert_eq!(
            url,
            "https://abc.supabase.co/rest/v1/characters?select=%2A&user_id=eq.42&order=created_at.asc"
        );
    }

    #[test]
    fn test_ilike_encodes_wildcards() {
        let url = Query::table("characters")
            .select("id,name")
            .ilike("name", "%rag nar%")
            .limit(10)
            .to_url(BASE);
        assert!(url.contains("select=id%2Cname"));
        assert!(url.contains("name=ilike.%25rag%20nar%25"));
        assert!(url.ends_with("limit=10"));
    }

    #[test]
    fn test_rpc_and_on_conflict() {
        assert_eq!(
            Query::rpc("delete_user").to_url(BASE),
            "https://abc.supabase.co/rest/v1/rpc/delete_user"
        );
        let url = Query::table("post_likes")
            .on_conflict("user_id,post_id")
            .to_url(BASE);
        assert!(url.ends_with("post_likes?on_conflict=user_id%2Cpost_id"));
    }
}
