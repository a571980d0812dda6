// ABOUTME: Opaque cursor codec for keyset pagination over recipe records
// ABOUTME: Encodes (created_at, id) positions as URL-safe base64 tokens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ladle Kitchen

use std::fmt::{self, Display, Formatter};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::QueryError;
use crate::models::RecipeSummary;

/// Opaque pagination cursor encoding a `(created_at, id)` position.
///
/// Wire format: URL-safe base64 (no padding) over the UTF-8 payload
/// `"<RFC 3339 timestamp>:<UUID v4>"`. The payload is an implementation
/// detail; callers treat the token as opaque and pass it back verbatim.
/// Encoding and decoding round-trip exactly, including sub-second
/// timestamp precision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    /// Encode a position into a cursor token
    #[must_use]
    pub fn new(created_at: DateTime<Utc>, id: Uuid) -> Self {
        let payload = format!("{}:{id}", created_at.to_rfc3339());
        Self(base64::Engine::encode(&URL_SAFE_NO_PAD, payload.as_bytes()))
    }

    /// Decode this cursor into its `(created_at, id)` position.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidCursor`] when the token is not valid
    /// base64, the payload is not UTF-8, the separator is missing, the
    /// timestamp does not parse as RFC 3339, or the id segment is not a
    /// canonical v4 UUID.
    pub fn decode(&self) -> Result<(DateTime<Utc>, Uuid), QueryError> {
        let bytes = base64::Engine::decode(&URL_SAFE_NO_PAD, &self.0)
            .map_err(|_| QueryError::invalid_cursor("token is not valid base64"))?;
        let payload = String::from_utf8(bytes)
            .map_err(|_| QueryError::invalid_cursor("payload is not valid UTF-8"))?;

        // RFC 3339 timestamps contain ':', so the id starts after the last one
        let (timestamp_str, id_str) = payload
            .rsplit_once(':')
            .ok_or_else(|| QueryError::invalid_cursor("payload is missing the ':' separator"))?;

        let created_at = DateTime::parse_from_rfc3339(timestamp_str)
            .map_err(|_| QueryError::invalid_cursor("timestamp is not RFC 3339"))?
            .with_timezone(&Utc);
        let id = parse_uuid_v4(id_str)?;

        Ok((created_at, id))
    }

    /// Get the raw cursor token
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap a raw token received from a caller
    #[must_use]
    pub const fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_uuid_v4(s: &str) -> Result<Uuid, QueryError> {
    let id = Uuid::parse_str(s).map_err(|_| QueryError::invalid_cursor("id is not a UUID"))?;
    // Require the canonical hyphenated v4 form; parse_str also accepts
    // braced, simple, and urn forms which never appear in our tokens
    if id.get_version_num() != 4 || id.as_hyphenated().to_string() != s.to_ascii_lowercase() {
        return Err(QueryError::invalid_cursor("id is not a canonical v4 UUID"));
    }
    Ok(id)
}

/// Sort order for recipe listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first (`created_at` DESC, id DESC)
    #[default]
    Recent,
    /// Oldest first (`created_at` ASC, id ASC)
    Oldest,
}

impl SortOrder {
    /// Parse a sort order from user input (case-insensitive, defaults to recent)
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "oldest" => Self::Oldest,
            _ => Self::Recent,
        }
    }

    /// Get the wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Oldest => "oldest",
        }
    }
}

/// Pagination metadata attached to every page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    /// The limit the page was planned with
    pub limit: usize,

    /// Cursor for the next page; present only when `has_more` is true and
    /// the query paginated by cursor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<Cursor>,

    /// Whether rows exist beyond this page
    pub has_more: bool,

    /// Rows matching the filters, counted independently of pagination
    pub total_count: u64,
}

/// One page of recipe summaries plus pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipePage {
    /// The page rows, in query order
    pub recipes: Vec<RecipeSummary>,

    /// Pagination metadata
    pub pagination: PageInfo,

    /// Human-readable note, attached only when the page is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_position() -> (DateTime<Utc>, Uuid) {
        let ts = Utc
            .timestamp_micros(1_750_000_000_123_456)
            .single()
            .expect("valid timestamp");
        let id = Uuid::new_v4();
        (ts, id)
    }

    #[test]
    fn test_cursor_round_trips_exactly() {
        let (ts, id) = sample_position();
        let cursor = Cursor::new(ts, id);
        let (decoded_ts, decoded_id) = cursor.decode().expect("round trip");
        assert_eq!(decoded_ts, ts);
        assert_eq!(decoded_id, id);
    }

    #[test]
    fn test_cursor_round_trips_whole_seconds() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 9, 8, 15, 0).single().unwrap();
        let id = Uuid::new_v4();
        let (decoded_ts, decoded_id) = Cursor::new(ts, id).decode().unwrap();
        assert_eq!(decoded_ts, ts);
        assert_eq!(decoded_id, id);
    }

    #[test]
    fn test_rejects_non_base64_token() {
        let err = Cursor::from_string("not base64!!!".into()).decode().unwrap_err();
        assert!(err.to_string().contains("base64"));
    }

    #[test]
    fn test_rejects_non_utf8_payload() {
        let token = base64::Engine::encode(&URL_SAFE_NO_PAD, [0xff, 0xfe, 0x00, 0x41]);
        let err = Cursor::from_string(token).decode().unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_rejects_missing_separator() {
        let token = base64::Engine::encode(&URL_SAFE_NO_PAD, b"no separator here");
        let err = Cursor::from_string(token).decode().unwrap_err();
        assert!(err.to_string().contains("separator"));
    }

    #[test]
    fn test_rejects_malformed_timestamp() {
        let token =
            base64::Engine::encode(&URL_SAFE_NO_PAD, b"not-a-date:550e8400-e29b-41d4-a716-446655440000");
        let err = Cursor::from_string(token).decode().unwrap_err();
        assert!(err.to_string().contains("RFC 3339"));
    }

    #[test]
    fn test_rejects_non_uuid_id_segment() {
        let payload = format!("{}:not-a-uuid", Utc::now().to_rfc3339());
        let token = base64::Engine::encode(&URL_SAFE_NO_PAD, payload.as_bytes());
        let err = Cursor::from_string(token).decode().unwrap_err();
        assert!(err.to_string().contains("UUID"));
    }

    #[test]
    fn test_rejects_non_v4_uuid() {
        // Nil UUID parses but is version 0
        let payload = format!("{}:00000000-0000-0000-0000-000000000000", Utc::now().to_rfc3339());
        let token = base64::Engine::encode(&URL_SAFE_NO_PAD, payload.as_bytes());
        let err = Cursor::from_string(token).decode().unwrap_err();
        assert!(err.to_string().contains("v4"));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!(SortOrder::parse("oldest"), SortOrder::Oldest);
        assert_eq!(SortOrder::parse("OLDEST"), SortOrder::Oldest);
        assert_eq!(SortOrder::parse("anything"), SortOrder::Recent);
    }
}
