//! Blocking client for the PokeAPI species endpoint.
//! One creature costs two round-trips: the species JSON, then its icon PNG.

use std::time::{Duration, Instant};

use anyhow::Context;
use game_core::constants::ICON_HEIGHT;
use game_core::{CreatureId, CreatureRecord, CreatureSource, CreatureStats, FetchError, Icon};
use image::imageops::{self, FilterType};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::APP_NAME;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";

/// Fetches wait for the service however long it takes.
pub const REQUEST_TIMEOUT: Option<Duration> = None;

#[derive(Debug, Deserialize)]
struct SpeciesPayload {
    id: u16,
    name: String,
    stats: Vec<StatEntry>,
    sprites: SpritesPayload,
}

#[derive(Debug, Deserialize)]
struct StatEntry {
    base_stat: u32,
}

#[derive(Debug, Deserialize)]
struct SpritesPayload {
    other: OtherSprites,
}

#[derive(Debug, Deserialize)]
struct OtherSprites {
    home: HomeSprites,
}

#[derive(Debug, Deserialize)]
struct HomeSprites {
    front_default: Option<String>,
}

/// Species data before its icon has been downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesEntry {
    pub id: CreatureId,
    pub name: String,
    pub stats: CreatureStats,
    pub icon_url: String,
}

/// Parse a species body. Stats are read by position: hit points, attack, defense.
pub fn parse_species(id: CreatureId, body: &str) -> Result<SpeciesEntry, FetchError> {
    let malformed = |reason: String| FetchError::Malformed { id, reason };
    let payload: SpeciesPayload =
        serde_json::from_str(body).map_err(|err| malformed(err.to_string()))?;

    let [hit_points, attack, defense] = match payload.stats.as_slice() {
        [hp, atk, def, ..] => [hp.base_stat, atk.base_stat, def.base_stat],
        short => return Err(malformed(format!("expected 3 stats, found {}", short.len()))),
    };
    let icon_url = payload
        .sprites
        .other
        .home
        .front_default
        .ok_or_else(|| malformed("species has no home sprite".to_string()))?;

    Ok(SpeciesEntry {
        id: CreatureId(payload.id),
        name: payload.name,
        stats: CreatureStats { hit_points, attack, defense },
        icon_url,
    })
}

/// Decode an icon image and scale it to `target_height`, keeping its aspect ratio.
pub fn decode_icon(id: CreatureId, bytes: &[u8], target_height: u32) -> Result<Icon, FetchError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|err| FetchError::Icon { id, reason: err.to_string() })?
        .to_rgba8();
    let (width, height) =
        Icon::scaled_dimensions(decoded.width(), decoded.height(), target_height);
    if width == 0 || height == 0 {
        return Err(FetchError::Icon {
            id,
            reason: format!("icon of {}x{} cannot be scaled", decoded.width(), decoded.height()),
        });
    }

    let scaled = imageops::resize(&decoded, width, height, FilterType::Triangle);
    Ok(Icon { width, height, rgba: scaled.into_raw() })
}

pub struct SpeciesClient {
    http: Client,
    base_url: String,
    icon_height: u32,
}

impl SpeciesClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(APP_NAME)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build species HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            icon_height: ICON_HEIGHT,
        })
    }

    pub fn species_url(&self, id: CreatureId) -> String {
        format!("{}/pokemon/{}", self.base_url, id.0)
    }

    fn get_bytes(&self, id: CreatureId, url: &str) -> Result<(u16, Vec<u8>), FetchError> {
        let transport = |err: reqwest::Error| FetchError::Transport { id, reason: err.to_string() };
        let response = self.http.get(url).send().map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(transport)?;
        Ok((status, body.to_vec()))
    }

    fn fetch_species(&self, id: CreatureId) -> Result<SpeciesEntry, FetchError> {
        let (status, body) = self.get_bytes(id, &self.species_url(id))?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Status { id, status });
        }
        let body = String::from_utf8(body)
            .map_err(|err| FetchError::Malformed { id, reason: err.to_string() })?;
        parse_species(id, &body)
    }

    fn fetch_icon(&self, id: CreatureId, url: &str) -> Result<Icon, FetchError> {
        let (status, body) = self.get_bytes(id, url)?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Icon { id, reason: format!("HTTP {status}") });
        }
        decode_icon(id, &body, self.icon_height)
    }
}

impl CreatureSource for SpeciesClient {
    fn fetch(&mut self, id: CreatureId) -> Result<CreatureRecord, FetchError> {
        let started = Instant::now();
        let entry = self.fetch_species(id)?;
        let icon = self.fetch_icon(id, &entry.icon_url)?;
        let elapsed_ms = elapsed_ms(started.elapsed());
        debug!(%id, name = %entry.name, elapsed_ms, "creature fetched");

        Ok(CreatureRecord { id: entry.id, name: entry.name, stats: entry.stats, icon })
    }
}

fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
