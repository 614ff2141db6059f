use crate::evidence::{EvidenceFilter, RecordKind};
use crate::models::{DashboardGapReport, GapEntry, GapLabel, MemberOverview};
use crate::window::Window;

const TOP_GAPS: usize = 10;

/// Ranks the largest attention/action gaps across the whole legislature.
/// Flattens every (member, topic) pair that carries a real gap, sorts by
/// gap magnitude with a stable sort (ties keep input order), and keeps the
/// top ten. Evidence links carry the same window bounds as the counts they
/// sit next to.
pub fn rank_gaps(overviews: &[MemberOverview], window: Window) -> DashboardGapReport {
    let mut entries: Vec<GapEntry> = overviews
        .iter()
        .flat_map(|overview| {
            overview
                .topics
                .iter()
                .filter(|t| {
                    t.gap_label != GapLabel::Aligned && t.gap_label != GapLabel::NoData
                })
                .map(|t| GapEntry {
                    member_id: overview.member_id.clone(),
                    member_name: overview.member_name.clone(),
                    topic: t.topic.clone(),
                    attention_count: t.attention_count,
                    action_count: t.action_count,
                    gap_score: t.gap_score,
                    gap_label: t.gap_label,
                    evidence: EvidenceFilter::member_scoped(
                        RecordKind::All,
                        &t.topic,
                        &overview.member_id,
                        window,
                    )
                    .build(),
                })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.gap_score
            .abs()
            .partial_cmp(&a.gap_score.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(TOP_GAPS);

    DashboardGapReport {
        from: window.from,
        to: window.to,
        entries,
    }
}
