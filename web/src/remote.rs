use chrono::prelude::*;
use gloo::net::http::{Request, RequestBuilder, Response};
use scape_core::HintKind;
use scape_protocol as protocol;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum RemoteError {
    #[error("request failed: {0}")]
    Transport(#[from] gloo::net::Error),
    #[error("backend answered {status} {text}")]
    Status { status: u16, text: String },
    #[error("backend returned no player row")]
    MissingRow,
}

pub(crate) type RemoteResult<T> = Result<T, RemoteError>;

/// The game backend, or a local stand-in when none is configured.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Backend {
    Offline,
    Rest { base_url: String, api_key: String },
}

impl Backend {
    pub(crate) fn new(api_url: Option<String>, api_key: Option<String>) -> Self {
        match api_url {
            Some(base_url) => Self::Rest {
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key: api_key.unwrap_or_default(),
            },
            None => {
                log::info!("no backend configured, playing offline");
                Self::Offline
            }
        }
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Offline => builder,
            Self::Rest { api_key, .. } => builder
                .header("apikey", api_key)
                .header("Authorization", &format!("Bearer {api_key}")),
        }
    }

    fn url(base_url: &str, path: &str) -> String {
        format!("{base_url}{path}")
    }

    async fn insert<T: Serialize>(&self, base_url: &str, table: &str, row: &T) -> RemoteResult<Response> {
        let url = Self::url(base_url, &protocol::table_path(table));
        let response = self
            .request(Request::post(&url))
            .header("Prefer", "return=representation")
            .json(&[row])?
            .send()
            .await?;
        check(response).await
    }

    /// Registers the player and returns the backend's player id.
    pub(crate) async fn register_player(
        &self,
        track_id: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> RemoteResult<String> {
        let Self::Rest { base_url, .. } = self else {
            return Ok(format!("local-{:016x}", crate::utils::js_random_id()));
        };
        let row = player_start(track_id, name, now);
        let response = self
            .insert(base_url, protocol::PLAYER_STARTS, &row)
            .await?;
        let rows: Vec<protocol::PlayerRow> = response.json().await?;
        rows.first()
            .and_then(protocol::PlayerRow::id_string)
            .ok_or(RemoteError::MissingRow)
    }

    pub(crate) async fn update_playtime(&self, player_id: &str, minutes: u64) -> RemoteResult<()> {
        let Self::Rest { base_url, .. } = self else {
            log::debug!("offline: playtime {minutes} min for {player_id}");
            return Ok(());
        };
        let url = Self::url(
            base_url,
            &protocol::row_path(protocol::PLAYER_STARTS, player_id),
        );
        let response = self
            .request(Request::patch(&url))
            .json(&protocol::PlaytimeUpdate {
                playtime_minutes: minutes,
            })?
            .send()
            .await?;
        check(response).await.map(drop)
    }

    pub(crate) async fn record_hint_usage(
        &self,
        player_id: &str,
        kind: HintKind,
        puzzle_id: &str,
        card_title: &str,
    ) -> RemoteResult<()> {
        let Self::Rest { base_url, .. } = self else {
            log::debug!("offline: {kind:?} hint on {puzzle_id}");
            return Ok(());
        };
        let row = protocol::HintUsage {
            player_id: player_id.into(),
            hint_type: hint_type(kind),
            puzzle_id: puzzle_id.into(),
            cards_title: card_title.into(),
        };
        self.insert(base_url, protocol::HINT_USAGE, &row)
            .await
            .map(drop)
    }

    pub(crate) async fn submit_rating(
        &self,
        player_id: &str,
        rating: u8,
        track_id: &str,
    ) -> RemoteResult<()> {
        let Self::Rest { base_url, .. } = self else {
            log::debug!("offline: rating {rating} for {track_id}");
            return Ok(());
        };
        let row = protocol::Rating {
            player_id: player_id.into(),
            track_id: track_id.into(),
            rating,
        };
        self.insert(base_url, protocol::RATINGS, &row)
            .await
            .map(drop)
    }
}

async fn check(response: Response) -> RemoteResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    Err(RemoteError::Status {
        status: response.status(),
        text: response.text().await.unwrap_or_default(),
    })
}

fn hint_type(kind: HintKind) -> protocol::HintType {
    match kind {
        HintKind::Small => protocol::HintType::Small,
        HintKind::Big => protocol::HintType::Big,
    }
}

/// Start row for a newly named player, stamped with the UTC date and time.
pub(crate) fn player_start(track_id: &str, name: &str, now: DateTime<Utc>) -> protocol::PlayerStart {
    protocol::PlayerStart {
        track_id: track_id.into(),
        player_name: name.into(),
        start_date: now.format("%Y-%m-%d").to_string(),
        start_time: now.format("%H:%M:%S").to_string(),
        playtime_minutes: 0,
    }
}
