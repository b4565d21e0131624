//! Snapshot encoding of [`Progress`].
//!
//! Decoding is lenient: every field is read on its own, and a missing or
//! malformed field falls back to its fresh-session value. Fields this codec
//! does not know, such as the card list older saves carried, are ignored.

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::*;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    unlocked_cards: &'a BTreeSet<CardId>,
    completed_cards: &'a BTreeSet<CardId>,
    active_card_id: Option<&'a str>,
    journal_entries: &'a Journal,
    hints_used: u32,
    stopwatch_state: StopwatchState,
    stopwatch_time: u64,
    player_name: Option<&'a str>,
    player_id: Option<&'a str>,
    theme: Theme,
}

impl<'a> From<&'a Progress> for Snapshot<'a> {
    fn from(progress: &'a Progress) -> Self {
        Self {
            unlocked_cards: &progress.unlocked,
            completed_cards: &progress.completed,
            active_card_id: progress.active_card(),
            journal_entries: &progress.journal,
            hints_used: progress.hints_used,
            stopwatch_state: progress.stopwatch.state(),
            stopwatch_time: progress.stopwatch.elapsed_ms(),
            player_name: progress.player_name(),
            player_id: progress.player_id(),
            theme: progress.theme,
        }
    }
}

pub fn encode(progress: &Progress) -> Value {
    // A snapshot made of strings, integers and derived enums always serializes.
    serde_json::to_value(Snapshot::from(progress)).unwrap_or(Value::Null)
}

pub fn encode_string(progress: &Progress) -> String {
    encode(progress).to_string()
}

pub fn decode_str(json: &str) -> Progress {
    match serde_json::from_str::<Value>(json) {
        Ok(value) => decode(&value),
        Err(err) => {
            log::warn!("discarding unreadable snapshot: {err}");
            Progress::new()
        }
    }
}

pub fn decode(value: &Value) -> Progress {
    let Some(record) = value.as_object() else {
        log::warn!("discarding snapshot that is not a record");
        return Progress::new();
    };

    Progress {
        unlocked: id_set(record, "unlockedCards"),
        completed: id_set(record, "completedCards"),
        active_card: string(record, "activeCardId"),
        journal: journal(record),
        hints_used: number(record, "hintsUsed")
            .and_then(|hints| u32::try_from(hints).ok())
            .unwrap_or_default(),
        stopwatch: Stopwatch::restore(
            typed(record, "stopwatchState").unwrap_or_default(),
            number(record, "stopwatchTime").unwrap_or_default(),
        ),
        player: player(record),
        theme: typed(record, "theme").unwrap_or_default(),
    }
}

fn field<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|value| !value.is_null())
}

fn typed<T: serde::de::DeserializeOwned>(record: &Map<String, Value>, key: &str) -> Option<T> {
    let value = field(record, key)?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            log::warn!("ignoring snapshot field {key}: {err}");
            None
        }
    }
}

fn string(record: &Map<String, Value>, key: &str) -> Option<String> {
    match field(record, key)? {
        Value::String(text) => Some(text.clone()),
        // Older saves stored the backend row id as a number.
        Value::Number(number) => Some(number.to_string()),
        _ => {
            log::warn!("ignoring snapshot field {key}: not a string");
            None
        }
    }
}

/// Non-negative integer, also accepting whole floats.
fn number(record: &Map<String, Value>, key: &str) -> Option<u64> {
    let value = field(record, key)?;
    let parsed = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|float| float.is_finite() && *float >= 0.0)
            .map(|float| float as u64)
    });
    if parsed.is_none() {
        log::warn!("ignoring snapshot field {key}: not a count");
    }
    parsed
}

fn id_set(record: &Map<String, Value>, key: &str) -> BTreeSet<CardId> {
    let Some(value) = field(record, key) else {
        return BTreeSet::new();
    };
    let Some(ids) = value.as_array() else {
        log::warn!("ignoring snapshot field {key}: not a list");
        return BTreeSet::new();
    };
    ids.iter()
        .filter_map(|id| id.as_str().map(ToString::to_string))
        .collect()
}

fn journal(record: &Map<String, Value>) -> Journal {
    let Some(entries) = field(record, "journalEntries").and_then(Value::as_array) else {
        return Journal::new();
    };
    Journal::from_entries(entries.iter().filter_map(|entry| {
        serde_json::from_value::<JournalEntry>(entry.clone())
            .inspect_err(|err| log::warn!("dropping journal entry: {err}"))
            .ok()
    }))
}

fn player(record: &Map<String, Value>) -> Option<Player> {
    match (string(record, "playerName"), string(record, "playerId")) {
        (Some(name), Some(id)) => Some(Player { name, id }),
        (None, None) => None,
        _ => {
            log::warn!("ignoring half-registered player in snapshot");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use serde_json::json;

    fn ids(ids: &[&str]) -> BTreeSet<CardId> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn progress_fields_survive_round_trip() {
        let mut progress = Progress::new();
        progress.unlocked = ids(&["a", "b"]);
        progress.completed = ids(&["a"]);
        progress.hints_used = 3;

        let decoded = decode(&encode(&progress));
        assert_eq!(decoded.unlocked(), &ids(&["a", "b"]));
        assert_eq!(decoded.completed(), &ids(&["a"]));
        assert_eq!(decoded.hints_used(), 3);
        assert_eq!(decoded, progress);
    }

    #[test]
    fn played_session_round_trips_through_text() {
        let catalog = fixtures::catalog();
        let mut progress = Progress::bootstrap(&catalog);
        progress.set_player(Player {
            name: "Ada".to_string(),
            id: "42".to_string(),
        });
        progress.unlock_by_pin(&catalog, "archive", "4321");
        progress.open_card(&catalog, "p1");
        progress.stopwatch_mut().tick();
        progress.update_notes("archive", "behind the poster");
        progress.set_theme(Theme::Grayscale);

        assert_eq!(decode_str(&encode_string(&progress)), progress);
    }

    #[test]
    fn snapshot_uses_legacy_field_names() {
        let encoded = encode(&Progress::new());

        assert_eq!(
            encoded,
            json!({
                "unlockedCards": [],
                "completedCards": [],
                "activeCardId": null,
                "journalEntries": [],
                "hintsUsed": 0,
                "stopwatchState": "stopped",
                "stopwatchTime": 0,
                "playerName": null,
                "playerId": null,
                "theme": "default"
            })
        );
    }

    #[test]
    fn missing_fields_take_fresh_values() {
        let decoded = decode(&json!({ "unlockedCards": ["a"] }));

        assert_eq!(decoded.hints_used(), 0);
        assert_eq!(decoded.stopwatch(), &Stopwatch::new());
        assert_eq!(decoded.theme(), Theme::Default);
        assert!(decoded.journal().is_empty());
        assert_eq!(decoded.player(), None);
    }

    #[test]
    fn wrongly_shaped_fields_are_treated_as_absent() {
        let decoded = decode(&json!({
            "unlockedCards": "a,b",
            "completedCards": ["a", 7, null],
            "hintsUsed": "three",
            "stopwatchState": "sprinting",
            "stopwatchTime": -5,
            "theme": 12,
            "journalEntries": [{ "cardId": "a" }, {
                "cardId": "b", "cardTitle": "B", "notes": "n", "type": "puzzle"
            }]
        }));

        assert!(decoded.unlocked().is_empty());
        assert_eq!(decoded.completed(), &ids(&["a"]));
        assert_eq!(decoded.hints_used(), 0);
        assert_eq!(decoded.stopwatch(), &Stopwatch::new());
        assert_eq!(decoded.theme(), Theme::Default);
        assert_eq!(decoded.journal().len(), 1);
        assert_eq!(decoded.journal().get("b").unwrap().notes, "n");
    }

    #[test]
    fn legacy_card_list_and_unknown_fields_are_ignored() {
        let decoded = decode(&json!({
            "cards": [{ "id": "stale", "title": "Old", "type": "puzzle" }],
            "language": "fi",
            "currentLevel": 2,
            "currentPage": "game",
            "completedCards": ["p1"],
            "playerName": "Ada",
            "playerId": 17,
            "stopwatchState": "paused",
            "stopwatchTime": 61000.0
        }));

        assert_eq!(decoded.completed(), &ids(&["p1"]));
        assert_eq!(decoded.player_id(), Some("17"));
        assert_eq!(decoded.stopwatch().elapsed_minutes(), 1);
        assert_eq!(decoded.stopwatch().state(), StopwatchState::Paused);
    }

    #[test]
    fn unreadable_snapshot_decodes_to_fresh_progress() {
        assert_eq!(decode_str("{not json"), Progress::new());
        assert_eq!(decode(&json!([1, 2, 3])), Progress::new());
    }
}
