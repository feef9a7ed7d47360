//! Calendar description generation.
//!
//! Builds the text body of the mirrored external-calendar entry from an
//! event, its forms, and the venue's field configuration. The output is a
//! deterministic concatenation of sections: same inputs, byte-identical
//! text. Sync regenerates it on every call instead of diffing, which only
//! works because nothing here depends on time, locale, or map ordering.
//!
//! Empty optional data is omitted entirely. No section ever emits a blank
//! line for a missing value, with one deliberate exception: a form without
//! times shows a `[Time Slot]` placeholder so the gap is visible to staff.

use serde::{Deserialize, Serialize};

use crate::event::{Event, EventForm, FieldDefinition, FieldResponse};

/// Placeholder shown for a form leg that has no times yet.
const TIME_SLOT_PLACEHOLDER: &str = "[Time Slot]";

/// Per-venue selection of which fields appear in generated descriptions,
/// scoped to an event type and/or form label. Absence of any matching
/// config falls back to the default "show anything with content" policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncFieldConfig {
    /// Event type this config applies to. `None` matches every type.
    pub event_type: Option<String>,
    /// Form label this config applies to. `None` matches every form.
    pub form_label: Option<String>,
    /// Field ids allowed into the description.
    pub field_ids: Vec<String>,
    /// When set, additionally require the response to carry a price or
    /// notes.
    #[serde(default)]
    pub priced_or_noted_only: bool,
}

impl SyncFieldConfig {
    fn matches(&self, event: &Event, form: &EventForm) -> bool {
        let type_ok = match &self.event_type {
            Some(wanted) => event
                .event_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(wanted)),
            None => true,
        };
        let label_ok = match &self.form_label {
            Some(wanted) => form.label.eq_ignore_ascii_case(wanted),
            None => true,
        };
        type_ok && label_ok
    }
}

/// Lookup data the generator needs: field definitions for naming and sync
/// configs for field selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptionContext<'a> {
    pub fields: &'a [FieldDefinition],
    pub sync_configs: &'a [SyncFieldConfig],
}

impl<'a> DescriptionContext<'a> {
    pub fn new(fields: &'a [FieldDefinition], sync_configs: &'a [SyncFieldConfig]) -> Self {
        DescriptionContext {
            fields,
            sync_configs,
        }
    }

    fn field_name<'b>(&'b self, field_id: &'b str) -> &'b str {
        self.fields
            .iter()
            .find(|f| f.id == field_id)
            .map(|f| f.name.as_str())
            // Unknown id: show the raw id rather than dropping the line
            .unwrap_or(field_id)
    }

    fn config_for(&self, event: &Event, form: &EventForm) -> Option<&'a SyncFieldConfig> {
        self.sync_configs.iter().find(|c| c.matches(event, form))
    }
}

/// Generate the external-calendar description for an event.
pub fn generate_description(event: &Event, forms: &[EventForm], ctx: &DescriptionContext) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push(header_section(event, forms));

    if let Some(contact) = contact_section(event) {
        sections.push(contact);
    }

    for form in forms {
        sections.push(form_section(event, form, ctx));
    }

    sections.join("\n\n").trim().to_string()
}

fn header_section(event: &Event, forms: &[EventForm]) -> String {
    let mut lines = vec![event.title.clone()];

    if let Some((start, end)) = event.span() {
        let date_part = if start == end {
            start.format("%Y-%m-%d").to_string()
        } else {
            format!("{} - {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
        };

        let start_time = event.effective_start_time(forms);
        let end_time = event.effective_end_time(forms);
        let line = match (start_time, end_time) {
            (Some(s), Some(e)) => {
                format!("{} {} - {}", date_part, s.format("%H:%M"), e.format("%H:%M"))
            }
            _ => date_part,
        };
        lines.push(line);
    }

    lines.join("\n")
}

fn contact_section(event: &Event) -> Option<String> {
    let mut lines = Vec::new();

    if let Some(primary) = &event.primary_contact {
        lines.push(match &primary.phone {
            Some(phone) => format!("Contact: {} ({})", primary.name, phone),
            None => format!("Contact: {}", primary.name),
        });
    }
    if let Some(secondary) = &event.secondary_contact {
        lines.push(match &secondary.phone {
            Some(phone) => format!("Alt contact: {} ({})", secondary.name, phone),
            None => format!("Alt contact: {}", secondary.name),
        });
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn form_section(event: &Event, form: &EventForm, ctx: &DescriptionContext) -> String {
    let mut lines = vec![normalize_label(&form.label)];

    lines.push(match (form.start_time, form.end_time) {
        (Some(s), Some(e)) => format!("{} - {}", s.format("%H:%M"), e.format("%H:%M")),
        (Some(s), None) => s.format("%H:%M").to_string(),
        _ => TIME_SLOT_PLACEHOLDER.to_string(),
    });

    let counts = form.guest_counts.unwrap_or_default();
    lines.push(format!("Men: {}, Ladies: {}", counts.men, counts.ladies));

    let config = ctx.config_for(event, form);
    for (field_id, response) in &form.responses {
        if !include_field(field_id, response, config) {
            continue;
        }
        lines.push(field_line(ctx.field_name(field_id), response));
    }

    lines.join("\n")
}

/// Section labels for reception legs are normalized; anything else passes
/// through verbatim.
fn normalize_label(label: &str) -> String {
    if label.to_lowercase().contains("reception") {
        "Reception".to_string()
    } else {
        label.to_string()
    }
}

fn include_field(
    field_id: &str,
    response: &FieldResponse,
    config: Option<&SyncFieldConfig>,
) -> bool {
    match config {
        Some(config) => {
            if !config.field_ids.iter().any(|id| id == field_id) {
                return false;
            }
            if config.priced_or_noted_only {
                return response.price().is_some() || response.notes().is_some();
            }
            true
        }
        None => response.has_content(),
    }
}

/// Format one field as `"<FieldName> - <detail> - ..."`, appending in
/// order: quantity, selected option, free value (when no option), notes,
/// and price (enabled responses only).
fn field_line(name: &str, response: &FieldResponse) -> String {
    let mut parts = vec![name.to_string()];

    if let Some(quantity) = response.quantity() {
        parts.push(quantity.to_string());
    }
    if let Some(option) = response.option() {
        parts.push(option.to_string());
    } else if let Some(value) = response.value() {
        parts.push(value.to_string());
    }
    if let Some(notes) = response.notes() {
        parts.push(notes.to_string());
    }
    if response.is_enabled() {
        if let Some(price) = response.price() {
            parts.push(format!("{:.2}", price));
        }
    }

    parts.join(" - ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Contact, FieldType, GuestCounts};
    use chrono::{NaiveDate, NaiveTime};

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn make_event() -> Event {
        let mut event = Event::new(
            "Smith Wedding".to_string(),
            NaiveDate::from_ymd_opt(2024, 6, 1),
        );
        event.event_type = Some("wedding".to_string());
        event
    }

    fn make_fields() -> Vec<FieldDefinition> {
        vec![
            FieldDefinition {
                id: "arch".to_string(),
                name: "Arch Setup".to_string(),
                field_type: FieldType::Quantity,
            },
            FieldDefinition {
                id: "dj".to_string(),
                name: "DJ Service".to_string(),
                field_type: FieldType::Toggle,
            },
            FieldDefinition {
                id: "menu".to_string(),
                name: "Menu Choice".to_string(),
                field_type: FieldType::Select,
            },
        ]
    }

    #[test]
    fn test_determinism() {
        let event = make_event();
        let mut form = EventForm::new("Wedding Reception");
        form.responses.insert(
            "dj".to_string(),
            FieldResponse::Toggle {
                enabled: true,
                notes: None,
                price: Some(300.0),
            },
        );
        let fields = make_fields();
        let ctx = DescriptionContext::new(&fields, &[]);

        let first = generate_description(&event, std::slice::from_ref(&form), &ctx);
        let second = generate_description(&event, std::slice::from_ref(&form), &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_header_with_and_without_times() {
        let mut event = make_event();
        let ctx = DescriptionContext::default();

        let text = generate_description(&event, &[], &ctx);
        assert_eq!(text, "Smith Wedding\n2024-06-01");

        event.start_time = Some(time(14, 0));
        event.end_time = Some(time(22, 0));
        let text = generate_description(&event, &[], &ctx);
        assert_eq!(text, "Smith Wedding\n2024-06-01 14:00 - 22:00");

        // Only one time present: date only, never a dangling dash
        event.end_time = None;
        let text = generate_description(&event, &[], &ctx);
        assert_eq!(text, "Smith Wedding\n2024-06-01");
    }

    #[test]
    fn test_multi_day_header() {
        let mut event = make_event();
        event.end_date = NaiveDate::from_ymd_opt(2024, 6, 2);
        let text = generate_description(&event, &[], &DescriptionContext::default());
        assert_eq!(text, "Smith Wedding\n2024-06-01 - 2024-06-02");
    }

    #[test]
    fn test_header_uses_form_times_when_event_has_none() {
        let event = make_event();
        let mut form = EventForm::new("Ceremony");
        form.start_time = Some(time(15, 0));
        form.end_time = Some(time(17, 0));

        let text = generate_description(&event, &[form], &DescriptionContext::default());
        assert!(
            text.starts_with("Smith Wedding\n2024-06-01 15:00 - 17:00"),
            "got: {}",
            text
        );
    }

    #[test]
    fn test_missing_contacts_produce_no_blank_lines() {
        let mut event = make_event();
        event.primary_contact = Some(Contact {
            name: "Jane Smith".to_string(),
            phone: Some("555-0100".to_string()),
        });

        let text = generate_description(&event, &[], &DescriptionContext::default());
        assert_eq!(
            text,
            "Smith Wedding\n2024-06-01\n\nContact: Jane Smith (555-0100)"
        );
        assert!(!text.contains("Alt contact"));
        assert!(!text.contains("\n\n\n"), "blank line leaked: {:?}", text);
    }

    #[test]
    fn test_form_section_placeholder_and_counts() {
        let event = make_event();
        let mut form = EventForm::new("Ceremony");
        form.guest_counts = Some(GuestCounts { men: 20, ladies: 25 });

        let text = generate_description(&event, &[form], &DescriptionContext::default());
        assert!(text.contains("Ceremony\n[Time Slot]\nMen: 20, Ladies: 25"));
    }

    #[test]
    fn test_reception_label_is_normalized() {
        let event = make_event();
        let form = EventForm::new("evening RECEPTION leg");
        let text = generate_description(&event, &[form], &DescriptionContext::default());
        assert!(text.contains("\n\nReception\n"));
    }

    #[test]
    fn test_default_policy_includes_only_content() {
        let event = make_event();
        let mut form = EventForm::new("Ceremony");
        form.responses.insert(
            "arch".to_string(),
            FieldResponse::Quantity {
                quantity: 2,
                notes: Some("needs delivery".to_string()),
                price: Some(450.0),
            },
        );
        form.responses.insert(
            "dj".to_string(),
            FieldResponse::Toggle {
                enabled: false,
                notes: None,
                price: Some(300.0),
            },
        );
        form.responses.insert(
            "menu".to_string(),
            FieldResponse::Select {
                option: None,
                notes: None,
                price: None,
            },
        );

        let fields = make_fields();
        let ctx = DescriptionContext::new(&fields, &[]);
        let text = generate_description(&event, &[form], &ctx);

        assert!(text.contains("Arch Setup - 2 - needs delivery - 450.00"));
        // Disabled toggle with a price but no notes: excluded entirely
        assert!(!text.contains("DJ Service"));
        // Empty select: excluded
        assert!(!text.contains("Menu Choice"));
    }

    #[test]
    fn test_option_suppresses_free_value_and_price_needs_enabled() {
        let selected = FieldResponse::Select {
            option: Some("Gold Package".to_string()),
            notes: None,
            price: Some(1200.0),
        };
        assert_eq!(
            field_line("Menu Choice", &selected),
            "Menu Choice - Gold Package - 1200.00"
        );

        let off_toggle = FieldResponse::Toggle {
            enabled: false,
            notes: Some("maybe next year".to_string()),
            price: Some(300.0),
        };
        // Notes show, price does not (toggle is off)
        assert_eq!(
            field_line("DJ Service", &off_toggle),
            "DJ Service - maybe next year"
        );
    }

    #[test]
    fn test_sync_config_allow_list_and_filter() {
        let event = make_event();
        let mut form = EventForm::new("Wedding Reception");
        form.responses.insert(
            "arch".to_string(),
            FieldResponse::Quantity {
                quantity: 2,
                notes: None,
                price: None,
            },
        );
        form.responses.insert(
            "dj".to_string(),
            FieldResponse::Toggle {
                enabled: true,
                notes: None,
                price: Some(300.0),
            },
        );
        form.responses.insert(
            "menu".to_string(),
            FieldResponse::Select {
                option: Some("Gold Package".to_string()),
                notes: None,
                price: None,
            },
        );

        let fields = make_fields();
        let configs = vec![SyncFieldConfig {
            event_type: Some("wedding".to_string()),
            form_label: Some("Wedding Reception".to_string()),
            field_ids: vec!["arch".to_string(), "dj".to_string()],
            priced_or_noted_only: true,
        }];
        let ctx = DescriptionContext::new(&fields, &configs);

        let text = generate_description(&event, &[form], &ctx);
        // In the allow-list and priced
        assert!(text.contains("DJ Service - 300.00"));
        // In the allow-list but neither priced nor noted
        assert!(!text.contains("Arch Setup"));
        // Not in the allow-list despite having content
        assert!(!text.contains("Menu Choice"));
    }

    #[test]
    fn test_config_for_other_event_type_does_not_apply() {
        let event = make_event(); // type "wedding"
        let mut form = EventForm::new("Ceremony");
        form.responses.insert(
            "menu".to_string(),
            FieldResponse::Select {
                option: Some("Gold Package".to_string()),
                notes: None,
                price: None,
            },
        );

        let fields = make_fields();
        let configs = vec![SyncFieldConfig {
            event_type: Some("corporate".to_string()),
            form_label: None,
            field_ids: vec![],
            priced_or_noted_only: false,
        }];
        let ctx = DescriptionContext::new(&fields, &configs);

        // The corporate config doesn't match, so default policy applies
        let text = generate_description(&event, &[form], &ctx);
        assert!(text.contains("Menu Choice - Gold Package"));
    }

    #[test]
    fn test_unknown_field_id_renders_raw_id() {
        let event = make_event();
        let mut form = EventForm::new("Ceremony");
        form.responses.insert(
            "mystery".to_string(),
            FieldResponse::Text {
                value: Some("surprise act".to_string()),
                notes: None,
            },
        );

        let text = generate_description(&event, &[form], &DescriptionContext::default());
        assert!(text.contains("mystery - surprise act"));
    }
}
