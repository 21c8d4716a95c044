//! Form validation.
//!
//! Every check here runs before the corresponding gateway call, so a rejected
//! form never reaches the network.

use crate::error::ValidationError;
use crate::models::{FileUpload, NewTag, Subclass, User, MAX_CHARACTERS};

pub const MIN_NAME_CHARS: usize = 2;
pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_COMMENT_CHARS: usize = 500;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const MIN_SEARCH_CHARS: usize = 2;
pub const MIN_PASSWORD_CHARS: usize = 6;

const MB: u64 = 1024 * 1024;
pub const MAX_POST_IMAGE_MB: u64 = 10;
pub const MAX_AVATAR_MB: u64 = 5;

/// Word the user must type to confirm account deletion.
pub const DELETE_CONFIRMATION: &str = "ELIMINAR";

/// Reject creation when the owner already has the maximum of characters.
pub fn ensure_character_capacity(current: usize) -> Result<(), ValidationError> {
    if current >= MAX_CHARACTERS {
        return Err(ValidationError::CharacterLimitReached {
            limit: MAX_CHARACTERS,
        });
    }
    Ok(())
}

/// Validate the character form, returning the trimmed name and subclass.
pub fn validate_character(
    name: &str,
    subclass: Option<Subclass>,
) -> Result<(String, Subclass), ValidationError> {
    let name = name.trim();
    let subclass = match subclass {
        Some(s) if !name.is_empty() => s,
        _ => return Err(ValidationError::MissingFields),
    };
    let len = name.chars().count();
    if len < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort {
            min: MIN_NAME_CHARS,
        });
    }
    if len > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong {
            max: MAX_NAME_CHARS,
        });
    }
    Ok((name.to_string(), subclass))
}

/// Parse a subclass typed or picked by the user.
pub fn parse_subclass(input: &str) -> Result<Subclass, ValidationError> {
    input
        .parse()
        .map_err(|_| ValidationError::UnknownSubclass(input.trim().to_string()))
}

/// Validate a new comment, returning the trimmed content.
///
/// The length limit applies to the text as typed, surrounding whitespace
/// included.
pub fn validate_comment(user: Option<&User>, content: &str) -> Result<String, ValidationError> {
    if user.is_none() {
        return Err(ValidationError::SignInRequired { action: "comentar" });
    }
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyComment);
    }
    if content.chars().count() > MAX_COMMENT_CHARS {
        return Err(ValidationError::CommentTooLong {
            max: MAX_COMMENT_CHARS,
        });
    }
    Ok(content.trim().to_string())
}

/// Validate a post image at pick time.
pub fn validate_post_image(file: &FileUpload) -> Result<(), ValidationError> {
    validate_image(file, MAX_POST_IMAGE_MB)
}

/// Validate an avatar image.
pub fn validate_avatar(file: &FileUpload) -> Result<(), ValidationError> {
    validate_image(file, MAX_AVATAR_MB)
}

fn validate_image(file: &FileUpload, max_mb: u64) -> Result<(), ValidationError> {
    if !file.is_image() {
        return Err(ValidationError::NotAnImage);
    }
    if file.size() > max_mb * MB {
        return Err(ValidationError::FileTooLarge { max_mb });
    }
    Ok(())
}

/// Validate the whole upload form right before submitting it.
pub fn validate_post(file: Option<&FileUpload>, description: &str) -> Result<(), ValidationError> {
    let file = file.ok_or(ValidationError::NoImageSelected)?;
    validate_post_image(file)?;
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_CHARS,
        });
    }
    Ok(())
}

/// Whether a character search term is long enough to query.
pub fn is_searchable(term: &str) -> bool {
    term.trim().chars().count() >= MIN_SEARCH_CHARS
}

/// Check a tag against those already on the draft.
///
/// Returns `Ok(None)` for a blank free-text tag, which is silently ignored.
pub fn check_new_tag(existing: &[NewTag], tag: NewTag) -> Result<Option<NewTag>, ValidationError> {
    match tag.character_id {
        Some(id) => {
            if existing.iter().any(|t| t.character_id == Some(id)) {
                return Err(ValidationError::DuplicateCharacterTag);
            }
        }
        None => {
            if tag.character_name.trim().is_empty() {
                return Ok(None);
            }
            let wanted = tag.character_name.trim().to_lowercase();
            if existing
                .iter()
                .any(|t| t.character_name.to_lowercase() == wanted)
            {
                return Err(ValidationError::DuplicateTagName);
            }
        }
    }
    Ok(Some(tag))
}

/// Validate the login form. The sign-up full name is optional.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_CHARS,
        });
    }
    Ok(())
}

/// Validate the typed account-deletion confirmation.
pub fn validate_delete_confirmation(input: &str) -> Result<(), ValidationError> {
    if input.trim() != DELETE_CONFIRMATION {
        return Err(ValidationError::ConfirmationMismatch);
    }
    Ok(())
}
