use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::{
    models::{ProblemStat, Submission},
    session::Session,
};

/// Remote reads the archiver needs from the platform.
#[async_trait]
pub trait LeetCodeApi: Send + Sync {
    /// The full problem list, in whatever order the platform returns it.
    async fn problems(&self) -> Result<Vec<ProblemStat>>;
    /// Submissions for `slug`, most recent first.
    async fn submissions(&self, slug: &str) -> Result<Vec<Submission>>;
    /// Raw HTML of the problem page.
    async fn problem_page(&self, slug: &str) -> Result<String>;
}

pub struct HttpApi {
    session: Session,
}

#[derive(Debug, Deserialize)]
struct ProblemsResponse {
    stat_status_pairs: Vec<StatStatusPair>,
}

#[derive(Debug, Deserialize)]
struct StatStatusPair {
    stat: Stat,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Stat {
    question_id: u32,
    frontend_question_id: u32,
    #[serde(rename = "question__title_slug")]
    slug: String,
}

#[derive(Debug, Deserialize)]
struct SubmissionsResponse {
    submissions_dump: Vec<SubmissionRecord>,
}

#[derive(Debug, Deserialize)]
struct SubmissionRecord {
    status_display: String,
    code: String,
}

impl HttpApi {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self
            .session
            .client()
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        ensure_ok(response.status(), url.as_str())?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl LeetCodeApi for HttpApi {
    async fn problems(&self) -> Result<Vec<ProblemStat>> {
        let body = self.get_text(problems_url(self.session.base())?).await?;
        parse_problems(&body)
    }

    async fn submissions(&self, slug: &str) -> Result<Vec<Submission>> {
        let body = self
            .get_text(submissions_url(self.session.base(), slug)?)
            .await?;
        parse_submissions(slug, &body)
    }

    async fn problem_page(&self, slug: &str) -> Result<String> {
        self.get_text(problem_url(self.session.base(), slug)?).await
    }
}

fn problems_url(base: &Url) -> Result<Url> {
    Ok(base.join("/api/problems/all/")?)
}

fn submissions_url(base: &Url, slug: &str) -> Result<Url> {
    Ok(base.join(&format!("/api/submissions/{}", slug))?)
}

fn problem_url(base: &Url, slug: &str) -> Result<Url> {
    Ok(base.join(&format!("/problems/{}/", slug))?)
}

/// Any status other than 200 aborts the run.
pub fn ensure_ok(status: StatusCode, url: &str) -> Result<()> {
    if status != StatusCode::OK {
        bail!("request to {} failed with status {}", url, status.as_u16());
    }
    Ok(())
}

fn parse_problems(body: &str) -> Result<Vec<ProblemStat>> {
    let data: ProblemsResponse =
        serde_json::from_str(body).context("failed to decode problem list")?;

    Ok(data
        .stat_status_pairs
        .into_iter()
        .map(|pair| ProblemStat {
            id: pair.stat.frontend_question_id,
            question_id: pair.stat.question_id,
            slug: pair.stat.slug,
            solved: pair.status.as_deref() == Some("ac"),
        })
        .collect())
}

fn parse_submissions(slug: &str, body: &str) -> Result<Vec<Submission>> {
    let data: SubmissionsResponse = serde_json::from_str(body)
        .with_context(|| format!("failed to decode submissions for {}", slug))?;

    Ok(data
        .submissions_dump
        .into_iter()
        .map(|record| Submission {
            slug: slug.to_string(),
            code: record.code,
            status: record.status_display,
        })
        .collect())
}
