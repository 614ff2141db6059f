use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

/// A public statement by a legislator. Attention-side record.
#[derive(Debug, Clone)]
pub struct Statement {
    pub id: Uuid,
    pub member_id: String,
    pub title: String,
    pub excerpt: String,
    pub source_type: String,
    pub url: String,
    pub published_at: NaiveDate,
    pub topics: Vec<String>,
    pub matched_snippet: String,
}

/// An introduced bill. Action-side record.
#[derive(Debug, Clone)]
pub struct Bill {
    pub id: String,
    pub congress: i32,
    pub title: String,
    pub summary: String,
    pub sponsor_id: String,
    pub cosponsor_ids: Vec<String>,
    pub introduced_at: NaiveDate,
    pub topics: Vec<String>,
}

/// One member's position on one roll call. Action-side record.
#[derive(Debug, Clone)]
pub struct Vote {
    pub id: Uuid,
    pub roll_call: i32,
    pub member_id: String,
    pub bill_id: Option<String>,
    pub question: String,
    pub position: String,
    pub voted_at: NaiveDate,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Member {
    pub bioguide_id: String,
    pub full_name: String,
    pub chamber: String,
    pub party: String,
    pub state: String,
}

/// One week's event count. A sorted sequence of these forms a trend;
/// weeks with zero events carry no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyCount {
    pub week_start: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Contributor {
    pub member_id: String,
    pub name: String,
    pub count: u32,
}

/// Newest raw evidence behind a topic's attention count, for display next
/// to the aggregate numbers.
#[derive(Debug, Clone, Serialize)]
pub struct RecentStatement {
    pub member_id: String,
    pub title: String,
    pub source_type: String,
    pub url: String,
    pub published_at: NaiveDate,
    pub matched_snippet: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicAggregate {
    pub topic: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub attention_count: u32,
    pub attention_trend: Vec<WeeklyCount>,
    pub attention_evidence: String,
    pub action_count: u32,
    pub action_trend: Vec<WeeklyCount>,
    pub action_evidence: String,
    pub top_by_attention: Vec<Contributor>,
    pub top_by_action: Vec<Contributor>,
    pub recent_statements: Vec<RecentStatement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapLabel {
    HighAttentionLowAction,
    LowAttentionHighAction,
    Aligned,
    NoData,
}

impl GapLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GapLabel::HighAttentionLowAction => "high attention, low action",
            GapLabel::LowAttentionHighAction => "low attention, high action",
            GapLabel::Aligned => "aligned",
            GapLabel::NoData => "no data",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberTopicAggregate {
    pub topic: String,
    pub attention_count: u32,
    pub attention_trend: Vec<WeeklyCount>,
    pub attention_evidence: String,
    pub sponsored_count: u32,
    pub cosponsored_count: u32,
    pub vote_count: u32,
    pub action_count: u32,
    pub gap_score: f64,
    pub gap_label: GapLabel,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberOverview {
    pub member_id: String,
    pub member_name: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub topics: Vec<MemberTopicAggregate>,
    pub biggest_gaps: Vec<MemberTopicAggregate>,
    pub most_aligned: Vec<MemberTopicAggregate>,
    pub total_attention: u32,
    pub total_action: u32,
    pub overall_gap_score: f64,
    pub overall_gap_label: GapLabel,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapEntry {
    pub member_id: String,
    pub member_name: String,
    pub topic: String,
    pub attention_count: u32,
    pub action_count: u32,
    pub gap_score: f64,
    pub gap_label: GapLabel,
    pub evidence: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardGapReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub entries: Vec<GapEntry>,
}
