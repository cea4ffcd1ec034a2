use anyhow::{bail, Context, Result};
use askama::Template;
use derive_builder::Builder;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    api::LeetCodeApi,
    models::{self, Catalog, Difficulty, ProblemDescription, Submission},
    page::parse_problem_page,
};

pub const README_FILE: &str = "README.md";
pub const CODE_FILE: &str = "main.cpp";
pub const DEFAULT_PATH: &str = "./leetcode/";

/// Fetches accepted submissions and writes them under an output root.
///
/// The catalog is loaded once when the scraper is built and reused for every
/// id lookup afterwards.
pub struct SubmissionScraper<A> {
    api: A,
    catalog: Catalog,
}

#[derive(Debug, Clone, Builder)]
pub struct OutputOptions {
    #[builder(setter(into), default = "PathBuf::from(DEFAULT_PATH)")]
    path: PathBuf,
    #[builder(default)]
    update: bool,
}

/// Which problem to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(u32),
    Slug(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderState {
    Created,
    Incomplete,
    Complete,
}

#[derive(Debug, Template)]
#[template(path = "readme.md.j2", escape = "none")]
struct Readme<'a> {
    title: &'a str,
    difficulty: Difficulty,
    fragments: &'a [String],
}

impl<A: LeetCodeApi> SubmissionScraper<A> {
    pub async fn load(api: A) -> Result<Self> {
        let problems = api
            .problems()
            .await
            .context("failed to fetch problem data")?;
        log::info!("loaded {} problems", problems.len());
        Ok(Self {
            api,
            catalog: Catalog::new(problems),
        })
    }

    pub fn resolve_slug(&self, id: u32) -> Result<&str> {
        self.catalog.slug(id)
    }

    pub async fn latest_accepted(&self, slug: &str) -> Result<Option<Submission>> {
        log::debug!("fetching submissions for {}", slug);
        let submissions = self.api.submissions(slug).await?;
        Ok(models::latest_accepted(submissions))
    }

    pub async fn description(&self, slug: &str) -> Result<ProblemDescription> {
        log::debug!("fetching description for {}", slug);
        let html = self.api.problem_page(slug).await?;
        parse_problem_page(&html)
            .with_context(|| format!("page structure changed for problem {}", slug))
    }

    /// Writes the latest accepted submission for `target`.
    ///
    /// Returns `false` when there is no accepted submission or the folder is
    /// already complete and `update` is off.
    pub async fn write_one(&self, options: &OutputOptions, target: Target) -> Result<bool> {
        let slug = match target {
            Target::Id(id) => self.resolve_slug(id)?.to_string(),
            Target::Slug(slug) => slug,
        };

        let description = self.description(&slug).await?;
        let submission = match self.latest_accepted(&slug).await? {
            Some(submission) => submission,
            None => {
                log::info!("no accepted submission for {}", slug);
                return Ok(false);
            }
        };

        let state = prepare_folder(&options.path, &description.folder)?;
        if state == FolderState::Complete && !options.update {
            log::info!("{} is up to date, skipping", description.folder);
            return Ok(false);
        }

        let folder = options.path.join(&description.folder);
        fs::write(folder.join(README_FILE), render_readme(&description)?)?;
        fs::write(folder.join(CODE_FILE), &submission.code)?;
        log::info!("wrote {}", folder.display());

        Ok(true)
    }

    pub async fn write_many(&self, options: &OutputOptions, ids: &[u32]) -> Result<usize> {
        let mut written = 0;
        for id in ids {
            if self.write_one(options, Target::Id(*id)).await? {
                written += 1;
            }
        }
        Ok(written)
    }

    pub async fn write_all_solved(&self, options: &OutputOptions) -> Result<usize> {
        let ids = self.catalog.solved_ids();
        log::info!("{} solved problems in catalog", ids.len());
        self.write_many(options, &ids).await
    }
}

/// Makes sure `root/folder` exists and reports whether it holds a full write.
///
/// The root itself is never created. An empty README counts as missing; the
/// code file only has to exist since an accepted submission may be empty.
pub fn prepare_folder(root: &Path, folder: &str) -> Result<FolderState> {
    if !root.is_dir() {
        bail!("Path {} does not exist", root.display());
    }

    let dir = root.join(folder);
    if !dir.exists() {
        fs::create_dir(&dir)?;
        return Ok(FolderState::Created);
    }

    if has_content(&dir.join(README_FILE)) && dir.join(CODE_FILE).is_file() {
        Ok(FolderState::Complete)
    } else {
        Ok(FolderState::Incomplete)
    }
}

fn has_content(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}

pub fn render_readme(description: &ProblemDescription) -> Result<String> {
    let readme = Readme {
        title: &description.title,
        difficulty: description.difficulty,
        fragments: &description.fragments,
    };
    Ok(readme.render()?)
}
