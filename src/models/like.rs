use uuid::Uuid;

/// Something a user can like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    Post(Uuid),
    Comment(Uuid),
}

impl LikeTarget {
    /// Join table holding the likes.
    pub fn table(&self) -> &'static str {
        match self {
            LikeTarget::Post(_) => "post_likes",
            LikeTarget::Comment(_) => "comment_likes",
        }
    }

    /// Column referencing the liked row.
    pub fn column(&self) -> &'static str {
        match self {
            LikeTarget::Post(_) => "post_id",
            LikeTarget::Comment(_) => "comment_id",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            LikeTarget::Post(id) | LikeTarget::Comment(id) => *id,
        }
    }

    /// Conflict target of the unique (user, target) constraint.
    pub fn conflict_columns(&self) -> String {
        format!("user_id,{}", self.column())
    }
}

/// Outcome of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Liked,
    Unliked,
}

impl LikeAction {
    pub fn from_liked(liked: bool) -> Self {
        if liked {
            LikeAction::Liked
        } else {
            LikeAction::Unliked
        }
    }

    pub fn is_liked(&self) -> bool {
        matches!(self, LikeAction::Liked)
    }
}
