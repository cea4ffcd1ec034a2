use anyhow::{bail, Result};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::archive::DEFAULT_PATH;

#[derive(Debug, Parser)]
#[command(name = "leetcode-archive")]
#[command(about = "Save your latest accepted LeetCode submissions", long_about = None)]
#[command(group(
    ArgGroup::new("selector")
        .required(true)
        .args(["id", "slug", "ids", "all"]),
))]
pub struct Args {
    /// Use the session cookies from the environment instead of logging in
    #[arg(short, long)]
    pub cookies: bool,

    /// Update a problem by its id
    #[arg(short, long, value_name = "ID")]
    pub id: Option<u32>,

    /// Update a problem by its slug
    #[arg(short, long, value_name = "SLUG")]
    pub slug: Option<String>,

    /// Update a list of problems by their ids
    #[arg(long, value_name = "ID", num_args = 1..)]
    pub ids: Option<Vec<u32>>,

    /// Update every solved problem
    #[arg(short, long)]
    pub all: bool,

    /// Rewrite problems that were already saved
    #[arg(short, long)]
    pub update: bool,

    /// Folder the problems are written to
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_PATH)]
    pub path: PathBuf,

    /// Print debug logs
    #[arg(short, long)]
    pub verbose: bool,
}

/// The one set of problems a run works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Id(u32),
    Slug(String),
    Ids(Vec<u32>),
    All,
}

impl Args {
    pub fn selection(&self) -> Result<Selection> {
        let selection = match (self.id, &self.slug, &self.ids, self.all) {
            (Some(id), None, None, false) => Selection::Id(id),
            (None, Some(slug), None, false) => Selection::Slug(slug.clone()),
            (None, None, Some(ids), false) => Selection::Ids(ids.clone()),
            (None, None, None, true) => Selection::All,
            // clap's required "selector" group already rejects these
            _ => bail!("use exactly one of --id, --slug, --ids or --all"),
        };
        Ok(selection)
    }
}
