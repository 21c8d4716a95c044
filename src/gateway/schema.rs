//! Check for the backend tables this client expects.

use super::{Gateway, Query};
use crate::error::{GatewayError, GatewayResult};

/// Whether the `profiles` table answered the schema check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    Ready,
    Missing,
}

/// SQL that creates the profiles table, its row-level-security policies and
/// the unique like constraints.
pub const SCHEMA_SQL: &str = r#"create table if not exists public.profiles (
  id uuid references auth.users on delete cascade primary key,
  email text,
  full_name text,
  avatar_url text,
  created_at timestamptz default now(),
  updated_at timestamptz default now()
);

alter table public.profiles enable row level security;

create policy "Profiles are viewable by everyone"
  on public.profiles for select using (true);
create policy "Users can insert their own profile"
  on public.profiles for insert with check (auth.uid() = id);
create policy "Users can update their own profile"
  on public.profiles for update using (auth.uid() = id);
create policy "Users can delete their own profile"
  on public.profiles for delete using (auth.uid() = id);

alter table public.post_likes
  add constraint post_likes_user_post_key unique (user_id, post_id);
alter table public.comment_likes
  add constraint comment_likes_user_comment_key unique (user_id, comment_id);
"#;

/// Error codes meaning "relation does not exist".
const MISSING_TABLE_CODES: [&str; 2] = ["42P01", "PGRST205"];

fn is_missing_table(error: &GatewayError) -> bool {
    error
        .code()
        .map(|c| MISSING_TABLE_CODES.contains(&c))
        .unwrap_or(false)
        || error.status() == Some(404)
}

impl Gateway {
    /// Check that the `profiles` table is reachable.
    ///
    /// A missing table is reported as [`SchemaStatus::Missing`] and the SQL
    /// to create it is logged at `warn`.
    pub async fn check_profiles_table(&self) -> GatewayResult<SchemaStatus> {
        let query = Query::table("profiles").select("id").limit(1);
        match self.select_many::<serde_json::Value>(query).await {
            Ok(_) => {
                tracing::info!("Profiles table reachable");
                Ok(SchemaStatus::Ready)
            }
            Err(e) if is_missing_table(&e) => {
                tracing::warn!(
                    "Profiles table missing ({}). Run this SQL on the backend:\n{}",
                    e,
                    SCHEMA_SQL
                );
                Ok(SchemaStatus::Missing)
            }
            Err(e) => {
                tracing::error!("Error probing profiles table: {}", e);
                Err(e)
            }
        }
    }
}
