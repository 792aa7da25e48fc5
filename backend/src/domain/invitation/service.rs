//! Guest-aware event selection.
//!
//! Lookup outcomes fold into an [`InviteFilter`] through one explicit match.
//! A failed or empty lookup never fails the selection; it yields the default
//! filter and records why in [`EventSelection::fallback`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::{EventDefinition, GuestRecord, InviteFilter};
use crate::domain::error_builders::create_not_found_error;
use crate::domain::ports::{GuestLookup, GuestRepository, GuestRepositoryError};
use crate::domain::{AppError, ErrorLogger};

/// Why the default event set was used for a guest lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The CMS has no guest for the invitation id.
    GuestNotFound,
    /// The lookup failed; holds the rendered error.
    LookupFailed(String),
}

/// Events chosen for one page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSelection {
    /// Guest the selection was made for, when the lookup found one.
    pub guest: Option<GuestRecord>,
    /// Events to render, in definition order.
    pub events: Vec<&'static EventDefinition>,
    /// Present when a lookup was attempted but fell back to the default set.
    pub fallback: Option<FallbackReason>,
}

/// A guest with the events their invitation shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestInvitation {
    /// Invitation id.
    pub id: String,
    /// Guest display name.
    pub name: String,
    /// Events the guest is invited to.
    pub events: Vec<&'static EventDefinition>,
}

/// Selects event blocks for invitation pages.
#[derive(Clone)]
pub struct EventSelectionService {
    guests: Arc<dyn GuestRepository>,
    logger: ErrorLogger,
}

impl EventSelectionService {
    /// Service reading guests from `guests`.
    pub fn new(guests: Arc<dyn GuestRepository>, logger: ErrorLogger) -> Self {
        Self { guests, logger }
    }

    /// Events for an optional invitation id. Never fails.
    pub async fn select(
        &self,
        invitation_id: Option<&str>,
        draft_key: Option<&str>,
    ) -> EventSelection {
        let Some(invitation_id) = invitation_id.filter(|id| !id.trim().is_empty()) else {
            return EventSelection {
                guest: None,
                events: InviteFilter::Default.apply(),
                fallback: None,
            };
        };
        let lookup = GuestLookup::new(invitation_id).with_draft_key(draft_key.map(str::to_owned));
        let outcome = self.guests.find_by_invitation_id(&lookup).await;
        self.resolve(&lookup, outcome)
    }

    fn resolve(
        &self,
        lookup: &GuestLookup,
        outcome: Result<Option<GuestRecord>, GuestRepositoryError>,
    ) -> EventSelection {
        let (guest, filter, fallback) = match outcome {
            Ok(Some(guest)) => {
                let filter = InviteFilter::for_invites(&guest.invite);
                (Some(guest), filter, None)
            }
            Ok(None) => {
                debug!(invitation_id = %lookup.invitation_id, "guest not found; using default events");
                (None, InviteFilter::Default, Some(FallbackReason::GuestNotFound))
            }
            Err(error) => {
                let rendered = error.to_string();
                self.logger
                    .log_error(&AppError::from(error), Some("event selection"));
                warn!(
                    invitation_id = %lookup.invitation_id,
                    error = %rendered,
                    "guest lookup failed; using default events"
                );
                (
                    None,
                    InviteFilter::Default,
                    Some(FallbackReason::LookupFailed(rendered)),
                )
            }
        };
        EventSelection {
            guest,
            events: filter.apply(),
            fallback,
        }
    }

    /// The guest behind an invitation, with their events.
    ///
    /// Unlike [`Self::select`] this surfaces lookup failures, and reports an
    /// unknown guest as [`AppError::NotFound`].
    pub async fn guest_invitation(
        &self,
        lookup: &GuestLookup,
    ) -> Result<GuestInvitation, AppError> {
        let guest = self
            .guests
            .find_by_invitation_id(lookup)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| {
                create_not_found_error(format!("no guest for invitation {}", lookup.invitation_id))
            })?;
        let events = InviteFilter::for_invites(&guest.invite).apply();
        Ok(GuestInvitation {
            id: guest.id,
            name: guest.name,
            events,
        })
    }

    /// Every invitation id known to the CMS.
    pub async fn invitation_ids(&self) -> Result<Vec<String>, AppError> {
        self.guests.all_invitation_ids().await.map_err(AppError::from)
    }
}
