use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::{Result, ScapeError};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 20;

/// Player identity, assigned once the backend has registered the name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub id: String,
}

/// Trims `input` and checks it is a usable player name.
///
/// Letters and digits of any script, spaces and hyphens are accepted.
pub fn validate_player_name(input: &str) -> Result<&str> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ScapeError::EmptyName);
    }

    let length = name.chars().count();
    let allowed = name
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || c == '-');
    if allowed && (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&length) {
        Ok(name)
    } else {
        Err(ScapeError::InvalidName)
    }
}
