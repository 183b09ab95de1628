use std::cmp::Ordering;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Service categories offered when booking or logging work.
pub const SERVICE_TYPES: &[&str] = &[
    "Haircut",
    "Color",
    "Highlights",
    "Manicure",
    "Pedicure",
    "Gel Nails",
    "Beard Trim",
    "Shave",
    "Blowout",
    "Extensions",
    "Braids",
    "Other",
];

/// A booked client slot for a given day. Completion is flipped when the
/// session is logged, so prep lists only show outstanding work.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub client_name: String,
    pub service_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<NaiveTime>,
    #[serde(default)]
    pub completed: bool,
}

impl Appointment {
    pub fn new(
        client_name: impl Into<String>,
        service_type: impl Into<String>,
        scheduled_time: Option<NaiveTime>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.into(),
            service_type: service_type.into(),
            scheduled_time,
            completed: false,
        }
    }
}

/// Orders a day's schedule: timed slots ascending, untimed ones after them.
/// The sort is stable, so equal slots keep their booking order.
pub fn sort_schedule(appointments: &mut [Appointment]) {
    appointments.sort_by(|left, right| match (left.scheduled_time, right.scheduled_time) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
