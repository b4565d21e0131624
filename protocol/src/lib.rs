//! Row payloads of the game backend, a PostgREST-style table API.
//!
//! Every write is a JSON array of rows posted to `/rest/v1/{table}`; the
//! playtime update patches the player's start row in place.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PLAYER_STARTS: &str = "player_starts";
pub const HINT_USAGE: &str = "hint_usage";
pub const RATINGS: &str = "ratings";

pub const REST_PREFIX: &str = "/rest/v1";

/// Path inserting rows into `table`.
pub fn table_path(table: &str) -> String {
    format!("{REST_PREFIX}/{table}")
}

/// Path updating the row of `table` whose `id` equals `id`.
pub fn row_path(table: &str, id: &str) -> String {
    format!("{REST_PREFIX}/{table}?id=eq.{id}")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStart {
    #[serde(rename = "trackID")]
    pub track_id: String,
    pub player_name: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `HH:MM:SS`
    pub start_time: String,
    pub playtime_minutes: u64,
}

/// Row echoed back by an insert; only the id is read.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PlayerRow {
    #[serde(default)]
    pub id: Value,
}

impl PlayerRow {
    /// The id as text, whether the table uses numeric or uuid keys.
    pub fn id_string(&self) -> Option<String> {
        match &self.id {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaytimeUpdate {
    pub playtime_minutes: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintType {
    Small,
    Big,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintUsage {
    pub player_id: String,
    pub hint_type: HintType,
    pub puzzle_id: String,
    pub cards_title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub player_id: String,
    #[serde(rename = "trackID")]
    pub track_id: String,
    pub rating: u8,
}
