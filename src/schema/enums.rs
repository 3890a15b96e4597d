//! Closed value sets shared across entities.
//!
//! Each set is declared once and reused wherever an entity carries it, so the
//! wire form, the Postgres enum type and the validation message all come from
//! the same list.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::validate::{Decode, Reject};

/// A closed set of string-valued variants.
pub trait ClosedSet: Sized + Copy + 'static {
    const VALUES: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        Self::VALUES.iter().copied().find(|v| v.as_str() == raw)
    }

    fn allowed() -> String {
        Self::VALUES
            .iter()
            .map(|v| format!("'{}'", v.as_str()))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Exact match only; no case folding or trimming.
fn decode_closed_set<T: ClosedSet>(value: &Value) -> Result<T, Reject> {
    match value {
        Value::String(raw) => T::parse(raw).ok_or_else(|| {
            Reject::new(
                "invalid_enum_value",
                format!("expected {}, received '{}'", T::allowed(), raw),
            )
        }),
        other => Err(Reject::invalid_type("string", other)),
    }
}

macro_rules! closed_set {
    ($(#[$meta:meta])* $name:ident as $pg:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
        #[sqlx(type_name = $pg)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                #[sqlx(rename = $wire)]
                $variant,
            )+
        }

        impl ClosedSet for $name {
            const VALUES: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Decode for $name {
            fn decode(value: &Value) -> Result<Self, Reject> {
                decode_closed_set(value)
            }
        }
    };
}

closed_set! {
    UserRole as "user_role" {
        Admin => "ADMIN",
        Manager => "MANAGER",
        Staff => "STAFF",
        Officer => "OFFICER",
    }
}

closed_set! {
    /// Complaint lifecycle: PENDING → VERIFIED → ASSIGNED → IN_PROGRESS →
    /// RESOLVED → CLOSED, or REJECTED.
    ComplaintStatus as "complaint_status" {
        Pending => "PENDING",
        Verified => "VERIFIED",
        Assigned => "ASSIGNED",
        InProgress => "IN_PROGRESS",
        Resolved => "RESOLVED",
        Closed => "CLOSED",
        Rejected => "REJECTED",
    }
}

closed_set! {
    WorkOrderStatus as "work_order_status" {
        Pending => "PENDING",
        Assigned => "ASSIGNED",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
}

closed_set! {
    InfrastructureStatus as "infrastructure_status" {
        Good => "GOOD",
        NeedsMaintenance => "NEEDS_MAINTENANCE",
        Damaged => "DAMAGED",
        Critical => "CRITICAL",
    }
}

closed_set! {
    PublicationStatus as "publication_status" {
        Draft => "DRAFT",
        Published => "PUBLISHED",
        Archived => "ARCHIVED",
    }
}

closed_set! {
    PublicationType as "publication_type" {
        News => "NEWS",
        Announcement => "ANNOUNCEMENT",
        Event => "EVENT",
    }
}

closed_set! {
    /// Shared by complaints and work orders.
    Priority as "priority" {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
        Urgent => "URGENT",
    }
}

closed_set! {
    OccupancyStatus as "occupancy_status" {
        Occupied => "OCCUPIED",
        Vacant => "VACANT",
        Maintenance => "MAINTENANCE",
        Reserved => "RESERVED",
    }
}

impl ComplaintStatus {
    /// Statuses in which a complaint counts as resolved and keeps `resolved_at`.
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

impl WorkOrderStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Assigned | Self::InProgress)
    }
}
