//! Decoders from one JSON result object to a typed record.
//!
//! Decoders are pure. A required field that is missing or has the wrong JSON
//! type is reported as [`ApiError::DecodeFailed`] naming the field. Derived
//! ids (origin, location, episodes) never fail: unresolvable URLs become `0`.

use rmdb_catalog::{
    AirDatePolicy, CharacterRecord, EpisodeRecord, LocationRecord, ResourceKind, id_from_url,
    ids_from_urls,
};
use serde_json::Value;

use crate::error::ApiError;

/// Knobs that change how records are decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub air_date_policy: AirDatePolicy,
}

/// A record type that can be decoded from one listing result.
pub trait Resource: Sized {
    const KIND: ResourceKind;

    fn decode(value: &Value, options: &DecodeOptions) -> Result<Self, ApiError>;
}

impl Resource for LocationRecord {
    const KIND: ResourceKind = ResourceKind::Location;

    fn decode(value: &Value, _options: &DecodeOptions) -> Result<Self, ApiError> {
        decode_location(value)
    }
}

impl Resource for EpisodeRecord {
    const KIND: ResourceKind = ResourceKind::Episode;

    fn decode(value: &Value, options: &DecodeOptions) -> Result<Self, ApiError> {
        decode_episode_with(value, options.air_date_policy)
    }
}

impl Resource for CharacterRecord {
    const KIND: ResourceKind = ResourceKind::Character;

    fn decode(value: &Value, _options: &DecodeOptions) -> Result<Self, ApiError> {
        decode_character(value)
    }
}

// ── Field helpers ───────────────────────────────────────────────────────────

fn int_field(value: &Value, kind: ResourceKind, field: &'static str) -> Result<i64, ApiError> {
    value
        .get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| ApiError::decode_failed(kind, field))
}

fn str_field<'a>(
    value: &'a Value,
    kind: ResourceKind,
    field: &'static str,
) -> Result<&'a str, ApiError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::decode_failed(kind, field))
}

fn string_field(
    value: &Value,
    kind: ResourceKind,
    field: &'static str,
) -> Result<String, ApiError> {
    str_field(value, kind, field).map(str::to_string)
}

/// `value[object].url`, reported as `"{object}.url"` when missing.
fn link_url<'a>(
    value: &'a Value,
    kind: ResourceKind,
    object: &'static str,
    field: &'static str,
) -> Result<&'a str, ApiError> {
    value
        .get(object)
        .and_then(|link| link.get("url"))
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::decode_failed(kind, field))
}

// ── Decoders ────────────────────────────────────────────────────────────────

/// Decode a location result: `id`, `name`, `type`, `dimension` are required.
pub fn decode_location(value: &Value) -> Result<LocationRecord, ApiError> {
    let kind = ResourceKind::Location;
    Ok(LocationRecord {
        id: int_field(value, kind, "id")?,
        name: string_field(value, kind, "name")?,
        kind: Some(string_field(value, kind, "type")?),
        dimension: Some(string_field(value, kind, "dimension")?),
    })
}

/// Decode an episode result with the default air-date policy.
pub fn decode_episode(value: &Value) -> Result<EpisodeRecord, ApiError> {
    decode_episode_with(value, AirDatePolicy::default())
}

/// Decode an episode result: `id`, `name`, `air_date`, `episode` are required.
///
/// `air_date` must be a string; whether unparseable text fails the record is
/// up to `policy`.
pub fn decode_episode_with(
    value: &Value,
    policy: AirDatePolicy,
) -> Result<EpisodeRecord, ApiError> {
    let kind = ResourceKind::Episode;
    let id = int_field(value, kind, "id")?;
    let name = string_field(value, kind, "name")?;
    let air_date_text = str_field(value, kind, "air_date")?;
    let episode_code = string_field(value, kind, "episode")?;

    let air_date = policy
        .resolve(air_date_text)
        .ok_or_else(|| ApiError::decode_failed(kind, "air_date"))?;

    Ok(EpisodeRecord {
        id,
        name,
        air_date,
        episode_code,
    })
}

/// Decode a character result, resolving origin, location and episode URLs
/// to ids.
pub fn decode_character(value: &Value) -> Result<CharacterRecord, ApiError> {
    let kind = ResourceKind::Character;
    let id = int_field(value, kind, "id")?;

    let episode_urls = value
        .get("episode")
        .and_then(Value::as_array)
        .and_then(|urls| urls.iter().map(Value::as_str).collect::<Option<Vec<&str>>>())
        .ok_or_else(|| ApiError::decode_failed(kind, "episode"))?;

    Ok(CharacterRecord {
        id,
        name: string_field(value, kind, "name")?,
        status: string_field(value, kind, "status")?,
        species: string_field(value, kind, "species")?,
        kind: string_field(value, kind, "type")?,
        gender: string_field(value, kind, "gender")?,
        origin_id: id_from_url(link_url(value, kind, "origin", "origin.url")?),
        location_id: id_from_url(link_url(value, kind, "location", "location.url")?),
        episode_ids: ids_from_urls(episode_urls),
    })
}

#[cfg(test)]
#[path = "tests/decode_tests.rs"]
mod tests;
