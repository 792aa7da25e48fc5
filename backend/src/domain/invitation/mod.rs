//! Guest invitations and the event blocks each guest is shown.
//!
//! A guest record from the CMS lists the invite types the guest received
//! (`挙式`, `披露宴`, `二次会`). The invitation page renders the matching
//! event blocks in the fixed order ceremony → reception → afterparty.
//! Missing, empty or malformed invite data falls back to the default set
//! (reception and afterparty).

mod service;

pub use service::{EventSelection, EventSelectionService, FallbackReason, GuestInvitation};

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Invitation categories a guest may receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InviteType {
    /// Wedding ceremony.
    #[serde(rename = "挙式")]
    Ceremony,
    /// Wedding reception.
    #[serde(rename = "披露宴")]
    Reception,
    /// After-party.
    #[serde(rename = "二次会")]
    Afterparty,
}

impl InviteType {
    /// Label used by the CMS.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ceremony => "挙式",
            Self::Reception => "披露宴",
            Self::Afterparty => "二次会",
        }
    }

    /// Parse a CMS label.
    ///
    /// # Examples
    /// ```
    /// use invitation::domain::invitation::InviteType;
    ///
    /// assert_eq!(InviteType::from_label("披露宴"), Some(InviteType::Reception));
    /// assert_eq!(InviteType::from_label("reception"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "挙式" => Some(Self::Ceremony),
            "披露宴" => Some(Self::Reception),
            "二次会" => Some(Self::Afterparty),
            _ => None,
        }
    }
}

/// Static description of one event block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDefinition {
    /// Invite type that unlocks this block.
    pub kind: InviteType,
    /// Heading shown on the page.
    pub title: &'static str,
    /// Event date (ISO 8601).
    pub date: &'static str,
    /// Start time, local.
    pub start_time: &'static str,
    /// Reception desk opening time, local.
    pub doors_open: &'static str,
    /// Venue name.
    pub venue: &'static str,
    /// Venue address.
    pub address: &'static str,
}

/// Every event block, in rendering order.
pub static EVENT_DEFINITIONS: [EventDefinition; 3] = [
    EventDefinition {
        kind: InviteType::Ceremony,
        title: "挙式",
        date: "2027-04-24",
        start_time: "11:00",
        doors_open: "10:30",
        venue: "ガーデンチャペル",
        address: "東京都港区南青山一丁目1番1号",
    },
    EventDefinition {
        kind: InviteType::Reception,
        title: "披露宴",
        date: "2027-04-24",
        start_time: "12:00",
        doors_open: "11:30",
        venue: "グランドバンケット",
        address: "東京都港区南青山一丁目1番1号",
    },
    EventDefinition {
        kind: InviteType::Afterparty,
        title: "二次会",
        date: "2027-04-24",
        start_time: "18:00",
        doors_open: "17:30",
        venue: "ダイニング ルミエール",
        address: "東京都渋谷区神宮前二丁目2番2号",
    },
];

/// Invite types shown when no guest-specific data applies.
pub const DEFAULT_INVITE_TYPES: [InviteType; 2] = [InviteType::Reception, InviteType::Afterparty];

/// Invite data as stored on a guest record.
///
/// Decoding is lenient: an array becomes [`GuestInvites::Listed`], `null` or
/// an absent field [`GuestInvites::Missing`], and anything else
/// [`GuestInvites::Malformed`]. Non-string array items are kept as their JSON
/// text, which never names an event, so a non-empty array always restricts
/// the selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum GuestInvites {
    /// Labels as stored in the CMS, possibly including unknown ones.
    Listed(Vec<String>),
    /// No invite data.
    #[default]
    Missing,
    /// Invite data that is not a list.
    Malformed,
}

impl GuestInvites {
    /// Build a listed value from invite types.
    pub fn from_types(types: &[InviteType]) -> Self {
        Self::Listed(types.iter().map(|kind| kind.label().to_owned()).collect())
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Listed(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(label) => label,
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            Value::Null => Self::Missing,
            _ => Self::Malformed,
        }
    }
}

impl<'de> Deserialize<'de> for GuestInvites {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Guest record fetched from the CMS for one invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    /// CMS content id, used as the invitation id.
    pub id: String,
    /// Guest display name.
    #[serde(default)]
    pub name: String,
    /// Invite types this guest received.
    #[serde(default)]
    pub invite: GuestInvites,
}

/// Which events to render, decided from guest data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteFilter {
    /// Use [`DEFAULT_INVITE_TYPES`].
    Default,
    /// Show only events whose label the guest lists.
    Guest(Vec<String>),
}

impl InviteFilter {
    /// Filter implied by a guest's invite data.
    pub fn for_invites(invites: &GuestInvites) -> Self {
        match invites {
            GuestInvites::Listed(labels) if !labels.is_empty() => Self::Guest(labels.clone()),
            GuestInvites::Listed(_) | GuestInvites::Missing | GuestInvites::Malformed => {
                Self::Default
            }
        }
    }

    fn admits(&self, kind: InviteType) -> bool {
        match self {
            Self::Default => DEFAULT_INVITE_TYPES.contains(&kind),
            Self::Guest(labels) => labels.iter().any(|label| label == kind.label()),
        }
    }

    /// Events admitted by this filter, in definition order.
    pub fn apply(&self) -> Vec<&'static EventDefinition> {
        EVENT_DEFINITIONS
            .iter()
            .filter(|event| self.admits(event.kind))
            .collect()
    }
}

/// Events shown when no guest-specific data applies.
pub fn default_events() -> Vec<&'static EventDefinition> {
    InviteFilter::Default.apply()
}

/// Events for a guest's invite data.
///
/// # Examples
/// ```
/// use invitation::domain::invitation::{select_events, GuestInvites, InviteType};
///
/// let events = select_events(&GuestInvites::from_types(&[InviteType::Reception]));
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].kind, InviteType::Reception);
/// ```
pub fn select_events(invites: &GuestInvites) -> Vec<&'static EventDefinition> {
    InviteFilter::for_invites(invites).apply()
}
