use alloc::string::String;
use thiserror::Error;

use crate::CardId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScapeError {
    #[error("Duplicate card id `{0}` in the deck")]
    DuplicateCard(CardId),
    #[error("The deck has no card with id `{0}`")]
    MissingCard(CardId),
    #[error("Malformed card deck: {0}")]
    MalformedDeck(String),
    #[error("Please enter your name")]
    EmptyName,
    #[error("Name must be 2-20 characters long and contain only letters, numbers, and spaces")]
    InvalidName,
    #[error("Could not register the player, please try again")]
    RegistrationFailed,
    #[error("Rating must be between 1 and 5")]
    InvalidRating(u8),
    #[error("No player is registered for this session")]
    NoPlayer,
}

pub type Result<T> = core::result::Result<T, ScapeError>;
