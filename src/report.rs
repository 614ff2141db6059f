use std::fmt::Write;

use crate::models::{DashboardGapReport, Member, MemberOverview, TopicAggregate, WeeklyCount};
use crate::taxonomy::topic_by_id;

fn topic_display_name(id: &str) -> &str {
    topic_by_id(id).map(|t| t.name).unwrap_or(id)
}

fn write_trend(output: &mut String, trend: &[WeeklyCount]) {
    if trend.is_empty() {
        let _ = writeln!(output, "No activity in this window.");
        return;
    }
    for week in trend {
        let _ = writeln!(output, "- week of {}: {}", week.week_start, week.count);
    }
}

pub fn build_topic_report(agg: &TopicAggregate) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {} — Words vs Actions", topic_display_name(&agg.topic));
    let _ = writeln!(output, "Window: {} to {}", agg.from, agg.to);
    let _ = writeln!(output);

    let _ = writeln!(output, "## Attention ({} statements)", agg.attention_count);
    let _ = writeln!(output, "Evidence: {}", agg.attention_evidence);
    write_trend(&mut output, &agg.attention_trend);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Action ({} bills and votes)", agg.action_count);
    let _ = writeln!(output, "Evidence: {}", agg.action_evidence);
    write_trend(&mut output, &agg.action_trend);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Voices");
    if agg.top_by_attention.is_empty() {
        let _ = writeln!(output, "No statements in this window.");
    } else {
        for contributor in &agg.top_by_attention {
            let _ = writeln!(
                output,
                "- {} ({}): {} statements",
                contributor.name, contributor.member_id, contributor.count
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Movers");
    if agg.top_by_action.is_empty() {
        let _ = writeln!(output, "No bill activity in this window.");
    } else {
        for contributor in &agg.top_by_action {
            let _ = writeln!(
                output,
                "- {} ({}): {} action points",
                contributor.name, contributor.member_id, contributor.count
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Statements");
    if agg.recent_statements.is_empty() {
        let _ = writeln!(output, "No statements in this window.");
    } else {
        for statement in &agg.recent_statements {
            let _ = writeln!(
                output,
                "- {} ({}, {}): {}",
                statement.title, statement.source_type, statement.published_at,
                if statement.matched_snippet.is_empty() {
                    &statement.url
                } else {
                    &statement.matched_snippet
                }
            );
        }
    }

    output
}

pub fn build_member_report(member: &Member, overview: &MemberOverview) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "# {} ({}, {}-{}, {}) — Words vs Actions",
        overview.member_name, overview.member_id, member.party, member.state, member.chamber
    );
    let _ = writeln!(output, "Window: {} to {}", overview.from, overview.to);
    let _ = writeln!(
        output,
        "Overall: {} statements vs {} actions — {} (score {:+.2})",
        overview.total_attention,
        overview.total_action,
        overview.overall_gap_label.as_str(),
        overview.overall_gap_score
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Biggest Gaps");
    if overview.biggest_gaps.is_empty() {
        let _ = writeln!(output, "No notable gaps in this window.");
    } else {
        for topic in &overview.biggest_gaps {
            let _ = writeln!(
                output,
                "- {}: {} statements vs {} actions — {} (score {:+.2})",
                topic_display_name(&topic.topic),
                topic.attention_count,
                topic.action_count,
                topic.gap_label.as_str(),
                topic.gap_score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Most Aligned");
    if overview.most_aligned.is_empty() {
        let _ = writeln!(output, "No aligned topics in this window.");
    } else {
        for topic in &overview.most_aligned {
            let _ = writeln!(
                output,
                "- {}: {} statements vs {} actions",
                topic_display_name(&topic.topic),
                topic.attention_count,
                topic.action_count
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Per-Topic Breakdown");
    for topic in &overview.topics {
        let _ = writeln!(
            output,
            "- {}: {} statements; {} sponsored, {} cosponsored, {} votes — {}",
            topic_display_name(&topic.topic),
            topic.attention_count,
            topic.sponsored_count,
            topic.cosponsored_count,
            topic.vote_count,
            topic.gap_label.as_str()
        );
    }

    output
}

pub fn build_dashboard_report(report: &DashboardGapReport) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Capitol Pulse — Largest Gaps");
    let _ = writeln!(output, "Window: {} to {}", report.from, report.to);
    let _ = writeln!(output);

    if report.entries.is_empty() {
        let _ = writeln!(output, "No gaps found in this window.");
        return output;
    }

    for (rank, entry) in report.entries.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. {} on {}: {} statements vs {} actions — {} (score {:+.2})",
            rank + 1,
            entry.member_name,
            topic_display_name(&entry.topic),
            entry.attention_count,
            entry.action_count,
            entry.gap_label.as_str(),
            entry.gap_score
        );
        let _ = writeln!(output, "   Evidence: {}", entry.evidence);
    }

    output
}
