use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::classify;
use crate::models::{Bill, Member, Statement, Vote};
use crate::taxonomy::CATCH_ALL_TOPIC;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Classifies a record at ingestion time. The persisted topic set is
/// trusted by aggregation from then on; taxonomy edits never retag old
/// rows. Unmatched records fall back to the catch-all topic.
fn classify_for_insert(text: &str, subjects: &[String]) -> (Vec<String>, String) {
    let result = classify::classify(text, subjects);
    if result.topics.is_empty() {
        (vec![CATCH_ALL_TOPIC.to_string()], result.matched_snippet)
    } else {
        (result.topics, result.matched_snippet)
    }
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let members = vec![
        ("A000360", "Lamar Alexander", "Senate", "R", "TN"),
        ("C001135", "Maria Cantwell", "Senate", "D", "WA"),
        ("K000389", "Ro Khanna", "House", "D", "CA"),
        ("O000175", "Jay Obernolte", "House", "R", "CA"),
    ];

    for (bioguide_id, full_name, chamber, party, state) in members {
        sqlx::query(
            r#"
            INSERT INTO capitol_pulse.members (bioguide_id, full_name, chamber, party, state)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (bioguide_id) DO UPDATE
            SET full_name = EXCLUDED.full_name, chamber = EXCLUDED.chamber,
                party = EXCLUDED.party, state = EXCLUDED.state
            "#,
        )
        .bind(bioguide_id)
        .bind(full_name)
        .bind(chamber)
        .bind(party)
        .bind(state)
        .execute(pool)
        .await?;
    }

    let statements = vec![
        (
            "seed-stmt-001",
            "K000389",
            "Khanna calls for guardrails on artificial intelligence in hiring",
            "We cannot let unaccountable algorithmic systems decide who gets a job.",
            "press release",
            NaiveDate::from_ymd_opt(2026, 2, 3).context("invalid date")?,
        ),
        (
            "seed-stmt-002",
            "C001135",
            "Cantwell statement on hospital ransomware attacks",
            "Ransomware gangs are targeting critical infrastructure and patients pay the price.",
            "floor speech",
            NaiveDate::from_ymd_opt(2026, 2, 10).context("invalid date")?,
        ),
        (
            "seed-stmt-003",
            "O000175",
            "Obernolte on semiconductor export controls",
            "Chip manufacturing at home is a national security question.",
            "op-ed",
            NaiveDate::from_ymd_opt(2026, 1, 28).context("invalid date")?,
        ),
    ];

    for (source_key, member_id, title, excerpt, source_type, published_at) in statements {
        let (topics, snippet) = classify_for_insert(&format!("{title} {excerpt}"), &[]);
        sqlx::query(
            r#"
            INSERT INTO capitol_pulse.statements
            (id, member_id, title, excerpt, source_type, url, published_at,
             topics, matched_snippet, source_key)
            VALUES ($1, $2, $3, $4, $5, '', $6, $7, $8, $9)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(member_id)
        .bind(title)
        .bind(excerpt)
        .bind(source_type)
        .bind(published_at)
        .bind(&topics)
        .bind(snippet)
        .bind(source_key)
        .execute(pool)
        .await?;
    }

    let bills = vec![
        (
            "hr-4521-119",
            "Algorithmic Accountability Act",
            "Requires impact assessments for automated decision systems.",
            "K000389",
            vec!["C001135".to_string()],
            vec!["artificial intelligence".to_string(), "consumer affairs".to_string()],
            NaiveDate::from_ymd_opt(2026, 2, 6).context("invalid date")?,
        ),
        (
            "s-1189-119",
            "Critical Infrastructure Cyber Defense Act",
            "Mandates breach reporting for operators of critical infrastructure.",
            "C001135",
            vec![],
            vec!["computer security".to_string()],
            NaiveDate::from_ymd_opt(2026, 2, 14).context("invalid date")?,
        ),
    ];

    for (id, title, summary, sponsor_id, cosponsor_ids, subjects, introduced_at) in bills {
        let (topics, _) = classify_for_insert(&format!("{title} {summary}"), &subjects);
        sqlx::query(
            r#"
            INSERT INTO capitol_pulse.bills
            (id, congress, title, summary, sponsor_id, cosponsor_ids, introduced_at, topics)
            VALUES ($1, 119, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(summary)
        .bind(sponsor_id)
        .bind(&cosponsor_ids)
        .bind(introduced_at)
        .bind(&topics)
        .execute(pool)
        .await?;
    }

    let votes = vec![
        (
            41,
            "C001135",
            Some("s-1189-119"),
            "On Passage of the Critical Infrastructure Cyber Defense Act",
            "Yea",
            NaiveDate::from_ymd_opt(2026, 2, 20).context("invalid date")?,
        ),
        (
            41,
            "A000360",
            Some("s-1189-119"),
            "On Passage of the Critical Infrastructure Cyber Defense Act",
            "Nay",
            NaiveDate::from_ymd_opt(2026, 2, 20).context("invalid date")?,
        ),
    ];

    for (roll_call, member_id, bill_id, question, position, voted_at) in votes {
        let (topics, _) = classify_for_insert(question, &[]);
        sqlx::query(
            r#"
            INSERT INTO capitol_pulse.votes
            (id, roll_call, member_id, bill_id, question, position, voted_at, topics)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (roll_call, member_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(roll_call)
        .bind(member_id)
        .bind(bill_id)
        .bind(question)
        .bind(position)
        .bind(voted_at)
        .bind(&topics)
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub async fn fetch_members(pool: &PgPool) -> anyhow::Result<Vec<Member>> {
    let rows = sqlx::query(
        "SELECT bioguide_id, full_name, chamber, party, state \
         FROM capitol_pulse.members ORDER BY bioguide_id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Member {
            bioguide_id: row.get("bioguide_id"),
            full_name: row.get("full_name"),
            chamber: row.get("chamber"),
            party: row.get("party"),
            state: row.get("state"),
        })
        .collect())
}

pub async fn fetch_statements(pool: &PgPool, since: NaiveDate) -> anyhow::Result<Vec<Statement>> {
    let rows = sqlx::query(
        "SELECT id, member_id, title, excerpt, source_type, url, published_at, \
         topics, matched_snippet \
         FROM capitol_pulse.statements WHERE published_at >= $1",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Statement {
            id: row.get("id"),
            member_id: row.get("member_id"),
            title: row.get("title"),
            excerpt: row.get("excerpt"),
            source_type: row.get("source_type"),
            url: row.get("url"),
            published_at: row.get("published_at"),
            topics: row.get("topics"),
            matched_snippet: row.get("matched_snippet"),
        })
        .collect())
}

pub async fn fetch_bills(pool: &PgPool, since: NaiveDate) -> anyhow::Result<Vec<Bill>> {
    let rows = sqlx::query(
        "SELECT id, congress, title, summary, sponsor_id, cosponsor_ids, introduced_at, topics \
         FROM capitol_pulse.bills WHERE introduced_at >= $1",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Bill {
            id: row.get("id"),
            congress: row.get("congress"),
            title: row.get("title"),
            summary: row.get("summary"),
            sponsor_id: row.get("sponsor_id"),
            cosponsor_ids: row.get("cosponsor_ids"),
            introduced_at: row.get("introduced_at"),
            topics: row.get("topics"),
        })
        .collect())
}

pub async fn fetch_votes(pool: &PgPool, since: NaiveDate) -> anyhow::Result<Vec<Vote>> {
    let rows = sqlx::query(
        "SELECT id, roll_call, member_id, bill_id, question, position, voted_at, topics \
         FROM capitol_pulse.votes WHERE voted_at >= $1",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Vote {
            id: row.get("id"),
            roll_call: row.get("roll_call"),
            member_id: row.get("member_id"),
            bill_id: row.get("bill_id"),
            question: row.get("question"),
            position: row.get("position"),
            voted_at: row.get("voted_at"),
            topics: row.get("topics"),
        })
        .collect())
}

pub async fn import_statements_csv(
    pool: &PgPool,
    csv_path: &std::path::Path,
) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        member_id: String,
        title: String,
        excerpt: String,
        source_type: String,
        url: String,
        published_at: NaiveDate,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("cannot open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        // Rows with malformed fields (a missing or unparseable date, most
        // often) are excluded rather than failing the whole import.
        let Ok(row) = result else { continue };

        let (topics, snippet) =
            classify_for_insert(&format!("{} {}", row.title, row.excerpt), &[]);
        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let result = sqlx::query(
            r#"
            INSERT INTO capitol_pulse.statements
            (id, member_id, title, excerpt, source_type, url, published_at,
             topics, matched_snippet, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&row.member_id)
        .bind(&row.title)
        .bind(&row.excerpt)
        .bind(&row.source_type)
        .bind(&row.url)
        .bind(row.published_at)
        .bind(&topics)
        .bind(snippet)
        .bind(source_key)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}

pub async fn import_bills_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        id: String,
        congress: i32,
        title: String,
        summary: String,
        sponsor_id: String,
        /// Semicolon-separated bioguide ids.
        cosponsor_ids: String,
        /// Semicolon-separated legislative subject tags.
        subjects: String,
        introduced_at: NaiveDate,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("cannot open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let Ok(row) = result else { continue };

        let cosponsors: Vec<String> = split_list(&row.cosponsor_ids);
        let subjects: Vec<String> = split_list(&row.subjects);
        let (topics, _) =
            classify_for_insert(&format!("{} {}", row.title, row.summary), &subjects);

        let result = sqlx::query(
            r#"
            INSERT INTO capitol_pulse.bills
            (id, congress, title, summary, sponsor_id, cosponsor_ids, introduced_at, topics)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&row.id)
        .bind(row.congress)
        .bind(&row.title)
        .bind(&row.summary)
        .bind(&row.sponsor_id)
        .bind(&cosponsors)
        .bind(row.introduced_at)
        .bind(&topics)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}

pub async fn import_votes_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        roll_call: i32,
        member_id: String,
        bill_id: Option<String>,
        question: String,
        position: String,
        voted_at: NaiveDate,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("cannot open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let Ok(row) = result else { continue };

        let (topics, _) = classify_for_insert(&row.question, &[]);

        let result = sqlx::query(
            r#"
            INSERT INTO capitol_pulse.votes
            (id, roll_call, member_id, bill_id, question, position, voted_at, topics)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (roll_call, member_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(row.roll_call)
        .bind(&row.member_id)
        .bind(&row.bill_id)
        .bind(&row.question)
        .bind(&row.position)
        .bind(row.voted_at)
        .bind(&topics)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
