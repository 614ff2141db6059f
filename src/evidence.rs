use std::fmt::Write;

use chrono::NaiveDate;

use crate::window::Window;

/// Record kind accepted by the record-search collaborator's `type` param.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Statements,
    Bills,
    Votes,
    All,
}

impl RecordKind {
    fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Statements => "statements",
            RecordKind::Bills => "bills",
            RecordKind::Votes => "votes",
            RecordKind::All => "all",
        }
    }
}

/// Filters behind a displayed count. `build` turns these into a search URL
/// that reproduces exactly the record subset that was counted, so every
/// field set here must have been applied to the aggregation, and nothing
/// else.
#[derive(Debug, Clone, Default)]
pub struct EvidenceFilter {
    pub kind: Option<RecordKind>,
    pub topic: Option<String>,
    pub member: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub source_type: Option<String>,
}

impl EvidenceFilter {
    pub fn topic_scoped(kind: RecordKind, topic: &str, window: Window) -> Self {
        EvidenceFilter {
            kind: Some(kind),
            topic: Some(topic.to_string()),
            date_from: Some(window.from),
            date_to: Some(window.to),
            ..Default::default()
        }
    }

    pub fn member_scoped(kind: RecordKind, topic: &str, member: &str, window: Window) -> Self {
        EvidenceFilter {
            member: Some(member.to_string()),
            ..EvidenceFilter::topic_scoped(kind, topic, window)
        }
    }

    /// Builds the relative search URL. Field order is fixed (`type`, `topic`,
    /// `member`, `dateFrom`, `dateTo`, `sourceType`) and unset fields are
    /// omitted entirely rather than emitted empty, so identical filters
    /// always produce byte-identical output.
    pub fn build(&self) -> String {
        let mut url = String::from("/records");
        let mut sep = '?';

        let mut push = |key: &str, value: &str| {
            let _ = write!(url, "{sep}{key}={}", urlencoding::encode(value));
            sep = '&';
        };

        if let Some(kind) = self.kind {
            push("type", kind.as_str());
        }
        if let Some(topic) = &self.topic {
            push("topic", topic);
        }
        if let Some(member) = &self.member {
            push("member", member);
        }
        if let Some(from) = self.date_from {
            push("dateFrom", &from.to_string());
        }
        if let Some(to) = self.date_to {
            push("dateTo", &to.to_string());
        }
        if let Some(source) = &self.source_type {
            push("sourceType", source);
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn identical_filters_build_identical_urls() {
        let window = Window {
            from: date(2026, 2, 1),
            to: date(2026, 3, 1),
        };
        let a = EvidenceFilter::topic_scoped(RecordKind::Statements, "cybersecurity", window);
        let b = EvidenceFilter::topic_scoped(RecordKind::Statements, "cybersecurity", window);
        assert_eq!(a.build(), b.build());
        assert_eq!(
            a.build(),
            "/records?type=statements&topic=cybersecurity&dateFrom=2026-02-01&dateTo=2026-03-01"
        );
    }

    #[test]
    fn unset_fields_are_omitted_not_empty() {
        let url = EvidenceFilter {
            kind: Some(RecordKind::All),
            member: Some("A000360".to_string()),
            ..Default::default()
        }
        .build();
        assert_eq!(url, "/records?type=all&member=A000360");
        assert!(!url.contains("topic="));
        assert!(!url.contains("dateFrom="));
    }

    #[test]
    fn empty_filter_has_no_query_string() {
        assert_eq!(EvidenceFilter::default().build(), "/records");
    }

    #[test]
    fn values_are_percent_encoded() {
        let url = EvidenceFilter {
            source_type: Some("press release".to_string()),
            ..Default::default()
        }
        .build();
        assert_eq!(url, "/records?sourceType=press%20release");
    }

    #[test]
    fn member_scope_keeps_fixed_field_order() {
        let window = Window {
            from: date(2026, 1, 1),
            to: date(2026, 1, 31),
        };
        let url = EvidenceFilter::member_scoped(RecordKind::Bills, "antitrust", "K000389", window)
            .build();
        assert_eq!(
            url,
            "/records?type=bills&topic=antitrust&member=K000389&dateFrom=2026-01-01&dateTo=2026-01-31"
        );
    }
}
