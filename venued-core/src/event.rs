//! Booking event types.
//!
//! An [`Event`] is a single booking at a venue. Zero or more [`EventForm`]s
//! hang off an event, each representing one leg of the booking (e.g. a
//! ceremony and a reception) with its own timing, guest counts and form
//! responses. Forms are owned by their event and stored inside the event's
//! record file, so deleting the event deletes them with it.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single venue booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Free-form tag used for categorization/coloring (e.g. "wedding")
    pub event_type: Option<String>,
    /// First calendar day of the booking. Events without a start date are
    /// drafts and are excluded from day placement and sync.
    pub start_date: Option<NaiveDate>,
    /// Last calendar day, inclusive. Absent means single-day.
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    /// Id of the mirrored entry on the external calendar. Present means the
    /// event has been synced before; written only by the sync reconciler.
    pub external_calendar_id: Option<String>,
    #[serde(default)]
    pub guest_counts: GuestCounts,
    pub primary_contact: Option<Contact>,
    pub secondary_contact: Option<Contact>,
}

impl Event {
    pub fn new(title: String, start_date: Option<NaiveDate>) -> Self {
        Event {
            id: Uuid::new_v4().to_string(),
            title,
            event_type: None,
            start_date,
            end_date: None,
            start_time: None,
            end_time: None,
            external_calendar_id: None,
            guest_counts: GuestCounts::default(),
            primary_contact: None,
            secondary_contact: None,
        }
    }

    /// The inclusive `[start, end]` day span, with the end coalesced to the
    /// start for single-day events. `None` when the event has no start date.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.start_date?;
        Some((start, self.end_date.unwrap_or(start)))
    }

    /// Effective start time: the event's own when set, otherwise the
    /// earliest start across its forms.
    pub fn effective_start_time(&self, forms: &[EventForm]) -> Option<NaiveTime> {
        self.start_time
            .or_else(|| forms.iter().filter_map(|f| f.start_time).min())
    }

    /// Effective end time: the event's own when set, otherwise the latest
    /// end across its forms.
    pub fn effective_end_time(&self, forms: &[EventForm]) -> Option<NaiveTime> {
        self.end_time
            .or_else(|| forms.iter().filter_map(|f| f.end_time).max())
    }

    /// Effective guest counts: the event's own unless they are entirely
    /// zero and at least one form carries an override, in which case the
    /// form overrides are summed (forms are distinct legs of the booking).
    pub fn effective_guest_counts(&self, forms: &[EventForm]) -> GuestCounts {
        if !self.guest_counts.is_empty() {
            return self.guest_counts;
        }
        let mut total = GuestCounts::default();
        let mut any = false;
        for counts in forms.iter().filter_map(|f| f.guest_counts) {
            total.men += counts.men;
            total.ladies += counts.ladies;
            any = true;
        }
        if any { total } else { self.guest_counts }
    }
}

/// Head-count split for a booking or one of its legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GuestCounts {
    #[serde(default)]
    pub men: u32,
    #[serde(default)]
    pub ladies: u32,
}

impl GuestCounts {
    pub fn total(&self) -> u32 {
        self.men + self.ladies
    }

    pub fn is_empty(&self) -> bool {
        self.men == 0 && self.ladies == 0
    }
}

/// A booking contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: Option<String>,
}

/// One leg of a booking with its own form responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventForm {
    pub label: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub guest_counts: Option<GuestCounts>,
    /// Responses keyed by field id. A BTreeMap keeps iteration (and thus
    /// generated descriptions) deterministic.
    #[serde(default)]
    pub responses: BTreeMap<String, FieldResponse>,
}

impl EventForm {
    pub fn new(label: impl Into<String>) -> Self {
        EventForm {
            label: label.into(),
            start_time: None,
            end_time: None,
            guest_counts: None,
            responses: BTreeMap::new(),
        }
    }
}

/// A response value, shaped by the field type it answers.
///
/// Modeled as a tagged union rather than an open dictionary so consumers
/// (the description generator in particular) can match exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldResponse {
    /// Free text answer.
    Text {
        value: Option<String>,
        notes: Option<String>,
    },
    /// One option chosen from a predefined list.
    Select {
        option: Option<String>,
        notes: Option<String>,
        price: Option<f64>,
    },
    /// A counted item (chairs, centerpieces, ...).
    Quantity {
        quantity: u32,
        notes: Option<String>,
        price: Option<f64>,
    },
    /// An on/off add-on.
    Toggle {
        enabled: bool,
        notes: Option<String>,
        price: Option<f64>,
    },
}

impl FieldResponse {
    pub fn value(&self) -> Option<&str> {
        match self {
            FieldResponse::Text { value, .. } => value.as_deref().filter(|v| !v.is_empty()),
            _ => None,
        }
    }

    pub fn option(&self) -> Option<&str> {
        match self {
            FieldResponse::Select { option, .. } => option.as_deref().filter(|o| !o.is_empty()),
            _ => None,
        }
    }

    pub fn quantity(&self) -> Option<u32> {
        match self {
            FieldResponse::Quantity { quantity, .. } if *quantity > 0 => Some(*quantity),
            _ => None,
        }
    }

    pub fn notes(&self) -> Option<&str> {
        let notes = match self {
            FieldResponse::Text { notes, .. }
            | FieldResponse::Select { notes, .. }
            | FieldResponse::Quantity { notes, .. }
            | FieldResponse::Toggle { notes, .. } => notes,
        };
        notes.as_deref().filter(|n| !n.is_empty())
    }

    pub fn price(&self) -> Option<f64> {
        let price = match self {
            FieldResponse::Text { .. } => &None,
            FieldResponse::Select { price, .. }
            | FieldResponse::Quantity { price, .. }
            | FieldResponse::Toggle { price, .. } => price,
        };
        price.filter(|p| *p > 0.0)
    }

    /// Whether the field is "on". Only toggles can be off; every other
    /// response type is considered enabled by construction.
    pub fn is_enabled(&self) -> bool {
        match self {
            FieldResponse::Toggle { enabled, .. } => *enabled,
            _ => true,
        }
    }

    /// Default-inclusion predicate: a response is worth showing when it
    /// carries a non-empty value, non-empty notes, a positive price, or is
    /// an explicitly enabled toggle.
    pub fn has_content(&self) -> bool {
        if self.value().is_some()
            || self.option().is_some()
            || self.quantity().is_some()
            || self.notes().is_some()
            || self.price().is_some()
        {
            return true;
        }
        matches!(self, FieldResponse::Toggle { enabled: true, .. })
    }
}

/// Field type tag, mirroring the [`FieldResponse`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Select,
    Quantity,
    Toggle,
}

/// Venue-level description of a form field. Referenced by responses via the
/// field id, never owned by them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub name: String,
    pub field_type: FieldType,
}

/// An event together with its owned forms. This is the unit of storage: one
/// record per file, so deleting the file cascades to the forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: Event,
    #[serde(default)]
    pub forms: Vec<EventForm>,
}

impl EventRecord {
    pub fn new(event: Event) -> Self {
        EventRecord {
            event,
            forms: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn form_with_times(start: Option<NaiveTime>, end: Option<NaiveTime>) -> EventForm {
        EventForm {
            start_time: start,
            end_time: end,
            ..EventForm::new("Ceremony")
        }
    }

    #[test]
    fn test_span_coalesces_missing_end_date() {
        let mut event = Event::new("Dinner".into(), NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(
            event.span(),
            Some((
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
            ))
        );

        event.start_date = None;
        assert_eq!(event.span(), None);
    }

    #[test]
    fn test_event_times_win_over_forms() {
        let mut event = Event::new("Gala".into(), NaiveDate::from_ymd_opt(2024, 6, 1));
        event.start_time = Some(time(18, 0));
        event.end_time = Some(time(23, 0));

        let forms = vec![form_with_times(Some(time(10, 0)), Some(time(11, 0)))];

        assert_eq!(event.effective_start_time(&forms), Some(time(18, 0)));
        assert_eq!(event.effective_end_time(&forms), Some(time(23, 0)));
    }

    #[test]
    fn test_form_times_union_fills_missing_event_times() {
        let event = Event::new("Gala".into(), NaiveDate::from_ymd_opt(2024, 6, 1));

        let forms = vec![
            form_with_times(Some(time(14, 0)), Some(time(16, 0))),
            form_with_times(Some(time(11, 30)), Some(time(22, 0))),
            form_with_times(None, None),
        ];

        // Earliest start, latest end across forms
        assert_eq!(event.effective_start_time(&forms), Some(time(11, 30)));
        assert_eq!(event.effective_end_time(&forms), Some(time(22, 0)));
    }

    #[test]
    fn test_no_times_anywhere() {
        let event = Event::new("Gala".into(), NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(event.effective_start_time(&[]), None);
        assert_eq!(event.effective_end_time(&[]), None);
    }

    #[test]
    fn test_guest_counts_sum_from_forms_when_event_is_empty() {
        let event = Event::new("Gala".into(), NaiveDate::from_ymd_opt(2024, 6, 1));

        let mut a = EventForm::new("Ceremony");
        a.guest_counts = Some(GuestCounts { men: 20, ladies: 25 });
        let mut b = EventForm::new("Reception");
        b.guest_counts = Some(GuestCounts { men: 40, ladies: 50 });

        let counts = event.effective_guest_counts(&[a, b]);
        assert_eq!(counts, GuestCounts { men: 60, ladies: 75 });
    }

    #[test]
    fn test_event_guest_counts_win_when_present() {
        let mut event = Event::new("Gala".into(), NaiveDate::from_ymd_opt(2024, 6, 1));
        event.guest_counts = GuestCounts { men: 5, ladies: 5 };

        let mut form = EventForm::new("Ceremony");
        form.guest_counts = Some(GuestCounts { men: 99, ladies: 99 });

        let counts = event.effective_guest_counts(&[form]);
        assert_eq!(counts, GuestCounts { men: 5, ladies: 5 });
    }

    #[test]
    fn test_toggle_content_rules() {
        let on = FieldResponse::Toggle {
            enabled: true,
            notes: None,
            price: None,
        };
        let off = FieldResponse::Toggle {
            enabled: false,
            notes: None,
            price: None,
        };
        assert!(on.has_content());
        assert!(!off.has_content());

        // A disabled toggle with notes still shows (the notes carry info)
        let off_with_notes = FieldResponse::Toggle {
            enabled: false,
            notes: Some("declined by client".into()),
            price: None,
        };
        assert!(off_with_notes.has_content());
    }

    #[test]
    fn test_response_accessors_filter_empty() {
        let blank = FieldResponse::Text {
            value: Some(String::new()),
            notes: Some(String::new()),
        };
        assert_eq!(blank.value(), None);
        assert_eq!(blank.notes(), None);
        assert!(!blank.has_content());

        let zero_price = FieldResponse::Select {
            option: None,
            notes: None,
            price: Some(0.0),
        };
        assert_eq!(zero_price.price(), None);
        assert!(!zero_price.has_content());
    }
}
