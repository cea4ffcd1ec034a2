use anyhow::{anyhow, Context, Result};
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::OnceLock;

use crate::models::{Difficulty, ProblemDescription};

static SELECTOR_HEADER: OnceLock<Selector> = OnceLock::new();
static SELECTOR_TITLE: OnceLock<Selector> = OnceLock::new();
static SELECTOR_DIFFICULTY_ROW: OnceLock<Selector> = OnceLock::new();
static SELECTOR_DIV: OnceLock<Selector> = OnceLock::new();
static SELECTOR_DESCRIPTION: OnceLock<Selector> = OnceLock::new();

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).unwrap())
}

/// Extracts title, difficulty and description markup from a problem page.
///
/// The selectors follow the page layout at the time of writing; any element
/// that cannot be found is reported as an error rather than guessed at.
pub fn parse_problem_page(html: &str) -> Result<ProblemDescription> {
    let document = Html::parse_document(html);

    let header = document
        .select(selector(&SELECTOR_HEADER, "div.h-full"))
        .next()
        .ok_or_else(|| anyhow!("No header found"))?;
    let title = header
        .select(selector(&SELECTOR_TITLE, "span.mr-2"))
        .next()
        .map(text_of)
        .ok_or_else(|| anyhow!("No title found"))?;

    let label = document
        .select(selector(&SELECTOR_DIFFICULTY_ROW, "div.mt-3"))
        .next()
        .and_then(|row| row.select(selector(&SELECTOR_DIV, "div")).next())
        .map(text_of)
        .ok_or_else(|| anyhow!("No difficulty found"))?;
    let difficulty = label
        .parse::<Difficulty>()
        .with_context(|| format!("Unknown difficulty label {:?}", label))?;

    let description = document
        .select(selector(&SELECTOR_DESCRIPTION, "div._1l1MA"))
        .next()
        .ok_or_else(|| anyhow!("No description found"))?;

    Ok(ProblemDescription::new(
        title,
        difficulty,
        fragments(description),
    ))
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn fragments(parent: ElementRef) -> Vec<String> {
    parent
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(String::from(&**text)),
            Node::Element(_) => ElementRef::wrap(child).map(|el| el.html()),
            _ => None,
        })
        .filter(|fragment| fragment != "\n")
        .collect()
}
