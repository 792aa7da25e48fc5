//! DTOs for decoding microCMS list and content responses.

use serde::Deserialize;

use crate::domain::{GuestInvites, GuestRecord};

/// One page of a list endpoint requested with `fields=id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ContentIdPageDto {
    #[serde(default)]
    pub(super) contents: Vec<ContentIdDto>,
    pub(super) total_count: usize,
}

#[derive(Debug, Deserialize)]
pub(super) struct ContentIdDto {
    pub(super) id: String,
}

/// Guest content as stored in the `guests` API.
///
/// microCMS adds bookkeeping fields (`createdAt`, `revisedAt`, ...) which
/// are ignored.
#[derive(Debug, Deserialize)]
pub(super) struct GuestContentDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) name: Option<String>,
    #[serde(default)]
    pub(super) invite: GuestInvites,
}

impl From<GuestContentDto> for GuestRecord {
    fn from(value: GuestContentDto) -> Self {
        Self {
            id: value.id,
            name: value.name.unwrap_or_default(),
            invite: value.invite,
        }
    }
}
