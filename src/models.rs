use anyhow::{anyhow, Result};
use strum::{Display, EnumString};

/// One row of the problem catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemStat {
    /// Frontend id, the number shown on the site.
    pub id: u32,
    pub question_id: u32,
    pub slug: String,
    pub solved: bool,
}

/// All problems known to the platform, sorted by frontend id.
#[derive(Debug, Clone)]
pub struct Catalog {
    problems: Vec<ProblemStat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub slug: String,
    pub code: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDescription {
    pub title: String,
    pub difficulty: Difficulty,
    pub fragments: Vec<String>,
    pub folder: String,
}

impl Catalog {
    pub fn new(mut problems: Vec<ProblemStat>) -> Self {
        problems.sort_by_key(|p| p.id);
        Self { problems }
    }

    pub fn slug(&self, id: u32) -> Result<&str> {
        self.problems
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.slug.as_str())
            .ok_or_else(|| anyhow!("problem {} not found in catalog", id))
    }

    pub fn solved_ids(&self) -> Vec<u32> {
        self.problems
            .iter()
            .filter(|p| p.solved)
            .map(|p| p.id)
            .collect()
    }
}

impl Submission {
    pub const ACCEPTED: &'static str = "Accepted";

    pub fn is_accepted(&self) -> bool {
        self.status == Self::ACCEPTED
    }
}

/// Picks the most recent accepted entry from a most-recent-first list.
pub fn latest_accepted(submissions: Vec<Submission>) -> Option<Submission> {
    submissions.into_iter().find(Submission::is_accepted)
}

impl ProblemDescription {
    pub fn new(title: String, difficulty: Difficulty, fragments: Vec<String>) -> Self {
        let folder = folder_name(&title);
        Self {
            title,
            difficulty,
            fragments,
            folder,
        }
    }
}

fn folder_name(title: &str) -> String {
    title.replace(['/', '\\'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(id: u32, slug: &str, solved: bool) -> ProblemStat {
        ProblemStat {
            id,
            question_id: id,
            slug: slug.to_string(),
            solved,
        }
    }

    fn submission(status: &str, code: &str) -> Submission {
        Submission {
            slug: "two-sum".to_string(),
            code: code.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn catalog_should_sort_and_resolve() {
        let catalog = Catalog::new(vec![
            stat(3, "longest-substring", false),
            stat(1, "two-sum", true),
            stat(2, "add-two-numbers", true),
        ]);

        let ids: Vec<u32> = catalog.problems.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.slug(2).unwrap(), "add-two-numbers");
        assert_eq!(catalog.slug(2).unwrap(), catalog.slug(2).unwrap());
        assert_eq!(catalog.solved_ids(), vec![1, 2]);
        assert!(catalog.slug(42).is_err());
    }

    #[test]
    fn latest_accepted_should_pick_first_accepted() {
        let list = vec![
            submission("Wrong Answer", "a"),
            submission("Accepted", "b"),
            submission("Accepted", "c"),
        ];
        assert_eq!(latest_accepted(list).unwrap().code, "b");
        assert!(latest_accepted(vec![submission("Time Limit Exceeded", "x")]).is_none());
        assert!(latest_accepted(vec![]).is_none());
    }

    #[test]
    fn difficulty_should_parse_labels() {
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
        assert!("Impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn folder_name_should_not_contain_separators() {
        let desc = ProblemDescription::new("1. Two Sum".into(), Difficulty::Easy, vec![]);
        assert_eq!(desc.folder, "1. Two Sum");
        let desc = ProblemDescription::new("9. A/B Test".into(), Difficulty::Easy, vec![]);
        assert_eq!(desc.folder, "9. A-B Test");
    }
}
