use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::KeelError;

/// The two marketplace roles. An account is scored independently per role:
/// role is a first-class partition key, never a derived filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Posts jobs/bookings and is scored on how reliably they host them.
    Requester,
    /// Accepts and performs jobs/bookings.
    Fulfiller,
}

impl Role {
    /// Stable string form used in storage columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Requester => "requester",
            Role::Fulfiller => "fulfiller",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = KeelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requester" => Ok(Role::Requester),
            "fulfiller" => Ok(Role::Fulfiller),
            other => Err(KeelError::InvalidRole {
                name: other.to_string(),
            }),
        }
    }
}

/// Behavioral weight class of an event. Drives expiry and which counters
/// the event feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Negative,
    Positive,
    Neutral,
}

impl EventCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::Negative => "negative",
            EventCategory::Positive => "positive",
            EventCategory::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = KeelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "negative" => Ok(EventCategory::Negative),
            "positive" => Ok(EventCategory::Positive),
            "neutral" => Ok(EventCategory::Neutral),
            other => Err(KeelError::InvalidEventType {
                name: other.to_string(),
            }),
        }
    }
}

/// The closed event taxonomy. Collaborators may only record these; anything
/// else is rejected at the boundary with `InvalidEventType`.
///
/// Cross-party filtering (an incident caused by the *other* party must never
/// be recorded against this actor) is the calling subsystem's responsibility;
/// the engine validates membership and category consistency only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Actor failed to appear for a confirmed booking.
    NoShow,
    /// Actor arrived materially late.
    LateArrival,
    /// Actor requested extensions beyond the tolerated pattern.
    ExcessiveExtension,
    /// A dispute was resolved against the actor.
    DisputeUpheld,
    /// Job finished cleanly.
    JobCompleted,
    /// Booking finished cleanly.
    BookingCompleted,
    /// Administrative compensating credit issued by support. The only
    /// sanctioned manual override path besides snapshot annotations.
    SupportCredit,
    /// A dispute was opened involving the actor; outcome unknown.
    DisputeFiled,
    /// A normal (non-excessive) extension request.
    ExtensionRequested,
}

impl EventType {
    /// Canonical category for each taxonomy member.
    pub fn category(self) -> EventCategory {
        match self {
            EventType::NoShow
            | EventType::LateArrival
            | EventType::ExcessiveExtension
            | EventType::DisputeUpheld => EventCategory::Negative,
            EventType::JobCompleted | EventType::BookingCompleted | EventType::SupportCredit => {
                EventCategory::Positive
            }
            EventType::DisputeFiled | EventType::ExtensionRequested => EventCategory::Neutral,
        }
    }

    /// Stable string form used in storage columns.
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::NoShow => "no_show",
            EventType::LateArrival => "late_arrival",
            EventType::ExcessiveExtension => "excessive_extension",
            EventType::DisputeUpheld => "dispute_upheld",
            EventType::JobCompleted => "job_completed",
            EventType::BookingCompleted => "booking_completed",
            EventType::SupportCredit => "support_credit",
            EventType::DisputeFiled => "dispute_filed",
            EventType::ExtensionRequested => "extension_requested",
        }
    }

    /// All taxonomy members, for boundary validation and tests.
    pub fn all() -> &'static [EventType] {
        &[
            EventType::NoShow,
            EventType::LateArrival,
            EventType::ExcessiveExtension,
            EventType::DisputeUpheld,
            EventType::JobCompleted,
            EventType::BookingCompleted,
            EventType::SupportCredit,
            EventType::DisputeFiled,
            EventType::ExtensionRequested,
        ]
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = KeelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_show" => Ok(EventType::NoShow),
            "late_arrival" => Ok(EventType::LateArrival),
            "excessive_extension" => Ok(EventType::ExcessiveExtension),
            "dispute_upheld" => Ok(EventType::DisputeUpheld),
            "job_completed" => Ok(EventType::JobCompleted),
            "booking_completed" => Ok(EventType::BookingCompleted),
            "support_credit" => Ok(EventType::SupportCredit),
            "dispute_filed" => Ok(EventType::DisputeFiled),
            "extension_requested" => Ok(EventType::ExtensionRequested),
            other => Err(KeelError::InvalidEventType {
                name: other.to_string(),
            }),
        }
    }
}
