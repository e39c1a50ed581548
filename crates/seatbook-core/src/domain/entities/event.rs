//! Event entity.

use crate::{EventId, SeatbookError, SeatbookResult, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event with a finite number of seats.
///
/// `available_spots` always stays within `0..=capacity`. Outside the
/// in-memory store it is only moved by conditional writes in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for the event.
    pub id: EventId,

    /// Title, 1 to 200 characters.
    pub title: String,

    /// Optional long description.
    pub description: Option<String>,

    /// Optional venue name.
    pub venue: Option<String>,

    /// When the event starts.
    pub starts_at: DateTime<Utc>,

    /// Declared number of seats.
    pub capacity: i32,

    /// Seats not yet granted.
    pub available_spots: i32,

    /// Admin who created the event.
    pub created_by: UserId,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new event with every seat available.
    pub fn new(
        title: String,
        description: Option<String>,
        venue: Option<String>,
        starts_at: DateTime<Utc>,
        capacity: i32,
        created_by: UserId,
    ) -> SeatbookResult<Self> {
        if capacity <= 0 {
            return Err(SeatbookError::validation("capacity must be positive"));
        }

        let now = Utc::now();
        Ok(Self {
            id: EventId::new(),
            title,
            description,
            venue,
            starts_at,
            capacity,
            available_spots: capacity,
            created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// Number of seats already granted.
    #[must_use]
    pub const fn approved_seats(&self) -> i32 {
        self.capacity - self.available_spots
    }

    /// Checks if no seat is left.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.available_spots <= 0
    }

    /// Moves `available_spots` by `delta`, refusing to leave `0..=capacity`.
    ///
    /// Taking a seat from a full event is `CapacityExhausted`; returning
    /// more seats than the event holds is a `BusinessRule` violation.
    pub fn apply_spot_delta(&mut self, delta: i32) -> SeatbookResult<i32> {
        let next = self.available_spots + delta;
        if next < 0 {
            return Err(SeatbookError::capacity_exhausted(self.id));
        }
        if next > self.capacity {
            return Err(SeatbookError::BusinessRule(format!(
                "available spots would exceed capacity {} for event {}",
                self.capacity, self.id
            )));
        }
        self.available_spots = next;
        self.updated_at = Utc::now();
        Ok(next)
    }

    /// Changes the declared capacity, carrying the difference into the
    /// available spots.
    pub fn resize(&mut self, new_capacity: i32) -> SeatbookResult<()> {
        if new_capacity <= 0 {
            return Err(SeatbookError::validation("capacity must be positive"));
        }
        let available = self.available_spots + (new_capacity - self.capacity);
        if available < 0 {
            return Err(SeatbookError::BusinessRule(format!(
                "capacity {} is below the {} seats already approved",
                new_capacity,
                self.approved_seats()
            )));
        }
        self.capacity = new_capacity;
        self.available_spots = available;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(capacity: i32) -> Event {
        Event::new(
            "Rust meetup".to_string(),
            None,
            Some("Hall A".to_string()),
            Utc::now(),
            capacity,
            UserId::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_event_is_fully_available() {
        let event = event(10);
        assert_eq!(event.available_spots, 10);
        assert_eq!(event.approved_seats(), 0);
        assert!(!event.is_full());
    }

    #[test]
    fn test_new_event_rejects_non_positive_capacity() {
        let result = Event::new("x".to_string(), None, None, Utc::now(), 0, UserId::new());
        assert!(matches!(result, Err(SeatbookError::Validation(_))));
    }

    #[test]
    fn test_spot_delta_stays_in_bounds() {
        let mut event = event(1);
        assert_eq!(event.apply_spot_delta(-1).unwrap(), 0);
        assert!(event.is_full());

        match event.apply_spot_delta(-1).unwrap_err() {
            SeatbookError::CapacityExhausted { .. } => {}
            other => panic!("Expected CapacityExhausted, got {other:?}"),
        }
        assert_eq!(event.available_spots, 0);

        assert_eq!(event.apply_spot_delta(1).unwrap(), 1);
        match event.apply_spot_delta(1).unwrap_err() {
            SeatbookError::BusinessRule(_) => {}
            other => panic!("Expected BusinessRule, got {other:?}"),
        }
        assert_eq!(event.available_spots, 1);
    }

    #[test]
    fn test_resize_carries_difference() {
        let mut event = event(5);
        event.apply_spot_delta(-3).unwrap();

        event.resize(8).unwrap();
        assert_eq!(event.capacity, 8);
        assert_eq!(event.available_spots, 5);

        event.resize(3).unwrap();
        assert_eq!(event.available_spots, 0);
    }

    #[test]
    fn test_resize_below_approved_is_rejected() {
        let mut event = event(5);
        event.apply_spot_delta(-3).unwrap();

        match event.resize(2).unwrap_err() {
            SeatbookError::BusinessRule(_) => {}
            other => panic!("Expected BusinessRule, got {other:?}"),
        }
        assert_eq!(event.capacity, 5);
        assert_eq!(event.available_spots, 2);
    }
}
