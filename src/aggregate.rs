use std::collections::HashMap;

use chrono::NaiveDate;

use crate::evidence::{EvidenceFilter, RecordKind};
use crate::models::{Bill, Contributor, Member, RecentStatement, Statement, TopicAggregate, Vote};
use crate::window::{bin_weekly, Window};

const TOP_CONTRIBUTORS: usize = 10;
const RECENT_STATEMENTS: usize = 5;

/// Points per bill role when ranking action contributors.
const SPONSOR_POINTS: u32 = 2;
const COSPONSOR_POINTS: u32 = 1;

/// Aggregates one topic over one window: attention (statements) and action
/// (bills + votes) counts, weekly trends, top contributors, and evidence
/// links carrying the same filters that produced the counts. Empty inputs
/// yield zero counts and empty trends and rankings.
pub fn aggregate_topic(
    statements: &[Statement],
    bills: &[Bill],
    votes: &[Vote],
    members: &[Member],
    topic: &str,
    window: Window,
) -> TopicAggregate {
    let in_topic = |topics: &[String]| topics.iter().any(|t| t == topic);

    let statements: Vec<&Statement> = statements
        .iter()
        .filter(|s| in_topic(&s.topics) && window.contains(s.published_at))
        .collect();
    let bills: Vec<&Bill> = bills
        .iter()
        .filter(|b| in_topic(&b.topics) && window.contains(b.introduced_at))
        .collect();
    let votes: Vec<&Vote> = votes
        .iter()
        .filter(|v| in_topic(&v.topics) && window.contains(v.voted_at))
        .collect();

    let attention_dates: Vec<NaiveDate> = statements.iter().map(|s| s.published_at).collect();
    let mut action_dates: Vec<NaiveDate> = bills.iter().map(|b| b.introduced_at).collect();
    action_dates.extend(votes.iter().map(|v| v.voted_at));

    let mut attention_tally: HashMap<&str, u32> = HashMap::new();
    for statement in &statements {
        *attention_tally.entry(statement.member_id.as_str()).or_insert(0) += 1;
    }

    let mut action_tally: HashMap<&str, u32> = HashMap::new();
    for bill in &bills {
        *action_tally.entry(bill.sponsor_id.as_str()).or_insert(0) += SPONSOR_POINTS;
        for cosponsor in &bill.cosponsor_ids {
            *action_tally.entry(cosponsor.as_str()).or_insert(0) += COSPONSOR_POINTS;
        }
    }

    TopicAggregate {
        topic: topic.to_string(),
        from: window.from,
        to: window.to,
        attention_count: statements.len() as u32,
        attention_trend: bin_weekly(&attention_dates),
        attention_evidence: EvidenceFilter::topic_scoped(RecordKind::Statements, topic, window)
            .build(),
        action_count: (bills.len() + votes.len()) as u32,
        action_trend: bin_weekly(&action_dates),
        action_evidence: EvidenceFilter::topic_scoped(RecordKind::All, topic, window).build(),
        top_by_attention: rank_contributors(attention_tally, members),
        top_by_action: rank_contributors(action_tally, members),
        recent_statements: recent_statements(&statements),
    }
}

fn recent_statements(statements: &[&Statement]) -> Vec<RecentStatement> {
    let mut sorted: Vec<&&Statement> = statements.iter().collect();
    sorted.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    sorted
        .into_iter()
        .take(RECENT_STATEMENTS)
        .map(|s| RecentStatement {
            member_id: s.member_id.clone(),
            title: s.title.clone(),
            source_type: s.source_type.clone(),
            url: s.url.clone(),
            published_at: s.published_at,
            matched_snippet: s.matched_snippet.clone(),
        })
        .collect()
}

fn rank_contributors(tally: HashMap<&str, u32>, members: &[Member]) -> Vec<Contributor> {
    let mut ranked: Vec<Contributor> = tally
        .into_iter()
        .map(|(member_id, count)| Contributor {
            member_id: member_id.to_string(),
            name: resolve_name(member_id, members),
            count,
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.member_id.cmp(&b.member_id)));
    ranked.truncate(TOP_CONTRIBUTORS);
    ranked
}

/// Falls back to the raw id when the member is not in reference data; an
/// unresolvable id never fails the aggregation.
fn resolve_name(member_id: &str, members: &[Member]) -> String {
    members
        .iter()
        .find(|m| m.bioguide_id == member_id)
        .map(|m| m.full_name.clone())
        .unwrap_or_else(|| member_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn statement(member_id: &str, topic: &str, published_at: NaiveDate) -> Statement {
        Statement {
            id: Uuid::new_v4(),
            member_id: member_id.to_string(),
            title: "Remarks".to_string(),
            excerpt: String::new(),
            source_type: "press release".to_string(),
            url: String::new(),
            published_at,
            topics: vec![topic.to_string()],
            matched_snippet: String::new(),
        }
    }

    fn bill(id: &str, sponsor: &str, cosponsors: &[&str], topic: &str, at: NaiveDate) -> Bill {
        Bill {
            id: id.to_string(),
            congress: 119,
            title: "A bill".to_string(),
            summary: String::new(),
            sponsor_id: sponsor.to_string(),
            cosponsor_ids: cosponsors.iter().map(|c| c.to_string()).collect(),
            introduced_at: at,
            topics: vec![topic.to_string()],
        }
    }

    fn member(id: &str, name: &str) -> Member {
        Member {
            bioguide_id: id.to_string(),
            full_name: name.to_string(),
            chamber: "Senate".to_string(),
            party: "I".to_string(),
            state: "VT".to_string(),
        }
    }

    #[test]
    fn counts_respect_topic_and_window() {
        let window = Window {
            from: date(2026, 2, 1),
            to: date(2026, 3, 2),
        };
        let statements = vec![
            statement("A000001", "cybersecurity", date(2026, 2, 10)),
            statement("A000002", "cybersecurity", date(2026, 2, 20)),
            statement("A000001", "cybersecurity", date(2026, 1, 5)),
        ];
        let bills = vec![
            bill("hr-100", "A000003", &[], "cybersecurity", date(2026, 2, 12)),
            bill("s-200", "A000004", &[], "cybersecurity", date(2026, 2, 25)),
        ];

        let agg = aggregate_topic(&statements, &bills, &[], &[], "cybersecurity", window);
        assert_eq!(agg.attention_count, 2);
        assert_eq!(agg.action_count, 2);

        let trend_total: u32 = agg.attention_trend.iter().map(|w| w.count).sum();
        assert_eq!(trend_total, 2);

        // Newest first, out-of-window statement excluded.
        assert_eq!(agg.recent_statements.len(), 2);
        assert_eq!(agg.recent_statements[0].published_at, date(2026, 2, 20));
    }

    #[test]
    fn other_topics_are_excluded() {
        let window = Window {
            from: date(2026, 2, 1),
            to: date(2026, 3, 1),
        };
        let statements = vec![statement("A000001", "broadband", date(2026, 2, 10))];
        let agg = aggregate_topic(&statements, &[], &[], &[], "cybersecurity", window);
        assert_eq!(agg.attention_count, 0);
        assert!(agg.attention_trend.is_empty());
        assert!(agg.top_by_attention.is_empty());
    }

    #[test]
    fn action_ranking_weights_sponsor_over_cosponsor() {
        let window = Window {
            from: date(2026, 2, 1),
            to: date(2026, 3, 1),
        };
        let bills = vec![
            bill("hr-1", "SPONSOR", &["COSPONSOR"], "antitrust", date(2026, 2, 5)),
            bill("hr-2", "COSPONSOR", &[], "antitrust", date(2026, 2, 6)),
        ];

        let agg = aggregate_topic(&[], &bills, &[], &[], "antitrust", window);
        // SPONSOR has 2 points, COSPONSOR has 1 + 2 = 3 points.
        assert_eq!(agg.top_by_action[0].member_id, "COSPONSOR");
        assert_eq!(agg.top_by_action[0].count, 3);
        assert_eq!(agg.top_by_action[1].count, 2);
    }

    #[test]
    fn contributor_names_fall_back_to_raw_id() {
        let window = Window {
            from: date(2026, 2, 1),
            to: date(2026, 3, 1),
        };
        let statements = vec![
            statement("A000001", "data-privacy", date(2026, 2, 10)),
            statement("Z999999", "data-privacy", date(2026, 2, 11)),
        ];
        let members = vec![member("A000001", "Jane Carver")];

        let agg = aggregate_topic(&statements, &[], &[], &members, "data-privacy", window);
        let names: Vec<&str> = agg.top_by_attention.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"Jane Carver"));
        assert!(names.contains(&"Z999999"));
    }

    #[test]
    fn evidence_links_carry_the_aggregation_filters() {
        let window = Window {
            from: date(2026, 2, 1),
            to: date(2026, 3, 1),
        };
        let agg = aggregate_topic(&[], &[], &[], &[], "semiconductors", window);
        assert_eq!(
            agg.attention_evidence,
            "/records?type=statements&topic=semiconductors&dateFrom=2026-02-01&dateTo=2026-03-01"
        );
        assert!(agg.action_evidence.contains("dateFrom=2026-02-01"));
    }
}
