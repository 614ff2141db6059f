use chrono::NaiveDate;

use crate::evidence::{EvidenceFilter, RecordKind};
use crate::models::{
    Bill, GapLabel, Member, MemberOverview, MemberTopicAggregate, Statement, Vote,
};
use crate::taxonomy::TAXONOMY;
use crate::window::{bin_weekly, Window};

/// Policy constant: |score| above this is a gap, at or below it is aligned.
pub const GAP_THRESHOLD: f64 = 0.3;

const HIGHLIGHT_TOPICS: usize = 3;

/// Signed imbalance between attention and action volume, in [-1, 1].
/// Positive means more talk than legislative activity. A member with no
/// records scores 0 and is labeled no-data, never a division error.
pub fn gap_score(attention: u32, action: u32) -> f64 {
    let total = attention + action;
    if total == 0 {
        return 0.0;
    }
    (attention as f64 - action as f64) / total as f64
}

pub fn gap_label(attention: u32, action: u32) -> GapLabel {
    if attention + action == 0 {
        return GapLabel::NoData;
    }
    let score = gap_score(attention, action);
    if score > GAP_THRESHOLD {
        GapLabel::HighAttentionLowAction
    } else if score < -GAP_THRESHOLD {
        GapLabel::LowAttentionHighAction
    } else {
        GapLabel::Aligned
    }
}

/// Full words-vs-actions breakdown for one member over one window: one
/// entry per taxonomy topic, the three largest gaps, the three most aligned
/// topics, and overall totals. Pure function of its inputs; recomputed per
/// call.
pub fn aggregate_member(
    member: &Member,
    statements: &[Statement],
    bills: &[Bill],
    votes: &[Vote],
    window: Window,
) -> MemberOverview {
    let id = member.bioguide_id.as_str();

    let topics: Vec<MemberTopicAggregate> = TAXONOMY
        .iter()
        .map(|topic| {
            let in_topic = |tags: &[String]| tags.iter().any(|t| t == topic.id);

            let statement_dates: Vec<NaiveDate> = statements
                .iter()
                .filter(|s| {
                    s.member_id == id && in_topic(&s.topics) && window.contains(s.published_at)
                })
                .map(|s| s.published_at)
                .collect();

            let in_window_bills = bills
                .iter()
                .filter(|b| in_topic(&b.topics) && window.contains(b.introduced_at));
            let mut sponsored_count = 0u32;
            let mut cosponsored_count = 0u32;
            for bill in in_window_bills {
                if bill.sponsor_id == id {
                    sponsored_count += 1;
                } else if bill.cosponsor_ids.iter().any(|c| c == id) {
                    cosponsored_count += 1;
                }
            }

            let vote_count = votes
                .iter()
                .filter(|v| {
                    v.member_id == id && in_topic(&v.topics) && window.contains(v.voted_at)
                })
                .count() as u32;

            let attention_count = statement_dates.len() as u32;
            let action_count = sponsored_count + cosponsored_count + vote_count;

            MemberTopicAggregate {
                topic: topic.id.to_string(),
                attention_count,
                attention_trend: bin_weekly(&statement_dates),
                attention_evidence: EvidenceFilter::member_scoped(
                    RecordKind::Statements,
                    topic.id,
                    id,
                    window,
                )
                .build(),
                sponsored_count,
                cosponsored_count,
                vote_count,
                action_count,
                gap_score: gap_score(attention_count, action_count),
                gap_label: gap_label(attention_count, action_count),
            }
        })
        .collect();

    // Stable sort keeps taxonomy order for equal-magnitude gaps.
    let mut gapped: Vec<MemberTopicAggregate> = topics
        .iter()
        .filter(|t| {
            t.gap_label != GapLabel::Aligned && t.gap_label != GapLabel::NoData
        })
        .cloned()
        .collect();
    gapped.sort_by(|a, b| {
        b.gap_score
            .abs()
            .partial_cmp(&a.gap_score.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    gapped.truncate(HIGHLIGHT_TOPICS);

    // Aligned topics tie-broken by total volume so the pick is deterministic.
    let mut aligned: Vec<MemberTopicAggregate> = topics
        .iter()
        .filter(|t| t.gap_label == GapLabel::Aligned)
        .cloned()
        .collect();
    aligned.sort_by(|a, b| {
        (b.attention_count + b.action_count).cmp(&(a.attention_count + a.action_count))
    });
    aligned.truncate(HIGHLIGHT_TOPICS);

    let total_attention: u32 = topics.iter().map(|t| t.attention_count).sum();
    let total_action: u32 = topics.iter().map(|t| t.action_count).sum();

    MemberOverview {
        member_id: member.bioguide_id.clone(),
        member_name: member.full_name.clone(),
        from: window.from,
        to: window.to,
        topics,
        biggest_gaps: gapped,
        most_aligned: aligned,
        total_attention,
        total_action,
        overall_gap_score: gap_score(total_attention, total_action),
        overall_gap_label: gap_label(total_attention, total_action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn window() -> Window {
        Window {
            from: date(2026, 2, 1),
            to: date(2026, 3, 2),
        }
    }

    fn member(id: &str) -> Member {
        Member {
            bioguide_id: id.to_string(),
            full_name: "Dana Whitfield".to_string(),
            chamber: "House".to_string(),
            party: "D".to_string(),
            state: "CA".to_string(),
        }
    }

    fn statement(member_id: &str, topic: &str, published_at: NaiveDate) -> Statement {
        Statement {
            id: Uuid::new_v4(),
            member_id: member_id.to_string(),
            title: "Statement".to_string(),
            excerpt: String::new(),
            source_type: "floor speech".to_string(),
            url: String::new(),
            published_at,
            topics: vec![topic.to_string()],
            matched_snippet: String::new(),
        }
    }

    fn sponsored_bill(sponsor: &str, topic: &str, at: NaiveDate) -> Bill {
        Bill {
            id: format!("hr-{}", at),
            congress: 119,
            title: "A bill".to_string(),
            summary: String::new(),
            sponsor_id: sponsor.to_string(),
            cosponsor_ids: Vec::new(),
            introduced_at: at,
            topics: vec![topic.to_string()],
        }
    }

    fn vote(member_id: &str, topic: &str, at: NaiveDate) -> Vote {
        Vote {
            id: Uuid::new_v4(),
            roll_call: 77,
            member_id: member_id.to_string(),
            bill_id: None,
            question: "On Passage".to_string(),
            position: "Yea".to_string(),
            voted_at: at,
            topics: vec![topic.to_string()],
        }
    }

    #[test]
    fn score_stays_within_bounds() {
        assert_eq!(gap_score(0, 0), 0.0);
        assert_eq!(gap_score(5, 0), 1.0);
        assert_eq!(gap_score(0, 5), -1.0);
        for attention in 0..20u32 {
            for action in 0..20u32 {
                let score = gap_score(attention, action);
                assert!((-1.0..=1.0).contains(&score));
            }
        }
    }

    #[test]
    fn labels_partition_the_score_range() {
        assert_eq!(gap_label(0, 0), GapLabel::NoData);
        assert_eq!(gap_label(8, 1), GapLabel::HighAttentionLowAction);
        assert_eq!(gap_label(1, 8), GapLabel::LowAttentionHighAction);
        assert_eq!(gap_label(5, 5), GapLabel::Aligned);
        // 13 vs 7: score = 0.3 exactly, on the aligned side of the threshold.
        assert_eq!(gap_label(13, 7), GapLabel::Aligned);
    }

    #[test]
    fn heavy_talker_gets_high_attention_label() {
        let m = member("W000100");
        let statements: Vec<Statement> = (1..=8)
            .map(|day| statement("W000100", "cybersecurity", date(2026, 2, day)))
            .collect();
        let bills = vec![sponsored_bill("W000100", "cybersecurity", date(2026, 2, 10))];

        let overview = aggregate_member(&m, &statements, &bills, &[], window());
        let cyber = overview
            .topics
            .iter()
            .find(|t| t.topic == "cybersecurity")
            .expect("cybersecurity entry");

        assert_eq!(cyber.attention_count, 8);
        assert_eq!(cyber.action_count, 1);
        assert!((cyber.gap_score - 7.0 / 9.0).abs() < 1e-9);
        assert_eq!(cyber.gap_label, GapLabel::HighAttentionLowAction);
        assert_eq!(overview.biggest_gaps[0].topic, "cybersecurity");
    }

    #[test]
    fn balanced_topic_is_aligned() {
        let m = member("W000100");
        let statements: Vec<Statement> = (1..=5)
            .map(|day| statement("W000100", "broadband", date(2026, 2, day)))
            .collect();
        let votes: Vec<Vote> = (10..=14)
            .map(|day| vote("W000100", "broadband", date(2026, 2, day)))
            .collect();

        let overview = aggregate_member(&m, &statements, &[], &votes, window());
        let entry = overview
            .topics
            .iter()
            .find(|t| t.topic == "broadband")
            .expect("broadband entry");

        assert_eq!(entry.gap_score, 0.0);
        assert_eq!(entry.gap_label, GapLabel::Aligned);
        assert_eq!(overview.most_aligned[0].topic, "broadband");
    }

    #[test]
    fn action_splits_into_sponsored_cosponsored_voted() {
        let m = member("W000100");
        let mut cosponsored = sponsored_bill("OTHER", "antitrust", date(2026, 2, 5));
        cosponsored.cosponsor_ids.push("W000100".to_string());
        let bills = vec![
            sponsored_bill("W000100", "antitrust", date(2026, 2, 3)),
            cosponsored,
        ];
        let votes = vec![vote("W000100", "antitrust", date(2026, 2, 7))];

        let overview = aggregate_member(&m, &[], &bills, &votes, window());
        let entry = overview
            .topics
            .iter()
            .find(|t| t.topic == "antitrust")
            .expect("antitrust entry");

        assert_eq!(entry.sponsored_count, 1);
        assert_eq!(entry.cosponsored_count, 1);
        assert_eq!(entry.vote_count, 1);
        assert_eq!(entry.action_count, 3);
    }

    #[test]
    fn no_records_yields_all_no_data() {
        let m = member("W000100");
        let overview = aggregate_member(&m, &[], &[], &[], window());

        assert_eq!(overview.topics.len(), TAXONOMY.len());
        assert!(overview.topics.iter().all(|t| t.gap_label == GapLabel::NoData));
        assert!(overview.biggest_gaps.is_empty());
        assert!(overview.most_aligned.is_empty());
        assert_eq!(overview.total_attention, 0);
        assert_eq!(overview.overall_gap_score, 0.0);
        assert_eq!(overview.overall_gap_label, GapLabel::NoData);
    }

    #[test]
    fn overall_label_uses_summed_totals() {
        let m = member("W000100");
        // 4 statements on one topic, 4 votes on another: each topic is a
        // gap on its own, but the member overall is balanced.
        let statements: Vec<Statement> = (1..=4)
            .map(|day| statement("W000100", "data-privacy", date(2026, 2, day)))
            .collect();
        let votes: Vec<Vote> = (10..=13)
            .map(|day| vote("W000100", "semiconductors", date(2026, 2, day)))
            .collect();

        let overview = aggregate_member(&m, &statements, &[], &votes, window());
        assert_eq!(overview.total_attention, 4);
        assert_eq!(overview.total_action, 4);
        assert_eq!(overview.overall_gap_label, GapLabel::Aligned);
        assert_eq!(overview.biggest_gaps.len(), 2);
    }

    #[test]
    fn out_of_window_records_are_ignored() {
        let m = member("W000100");
        let statements = vec![statement("W000100", "cybersecurity", date(2025, 11, 1))];
        let overview = aggregate_member(&m, &statements, &[], &[], window());
        assert_eq!(overview.total_attention, 0);
    }
}
