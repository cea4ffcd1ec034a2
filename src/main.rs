use anyhow::Result;
use clap::Parser;
use leetcode_archive::{
    api::HttpApi,
    archive::{OutputOptionsBuilder, SubmissionScraper, Target},
    cli::{Args, Selection},
    config::Config,
    logging::init_logger,
    session::{base_url, Session},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let selection = args.selection()?;
    init_logger(args.verbose)?;

    let config = Config::from_env();
    let provider = config.cookie_provider(args.cookies)?;
    let session = Session::authenticate(base_url()?, provider.as_ref()).await?;
    let scraper = SubmissionScraper::load(HttpApi::new(session)).await?;

    let options = OutputOptionsBuilder::default()
        .path(args.path.clone())
        .update(args.update)
        .build()?;

    match selection {
        Selection::Id(id) => {
            if scraper.write_one(&options, Target::Id(id)).await? {
                println!("Latest accepted submission for problem {} updated successfully!", id);
            } else {
                println!("Accepted submission not found for problem {}.", id);
            }
        }
        Selection::Slug(slug) => {
            if scraper.write_one(&options, Target::Slug(slug.clone())).await? {
                println!("Latest accepted submission for problem [{}] updated successfully!", slug);
            } else {
                println!("Accepted submission not found for problem \"{}\".", slug);
            }
        }
        Selection::Ids(ids) => {
            let total = scraper.write_many(&options, &ids).await?;
            if total == 0 {
                println!("No submissions found");
            } else if total < ids.len() {
                println!("Only {} submissions found and updated successfully!", total);
            } else {
                println!("All {} submissions updated successfully!", total);
            }
        }
        Selection::All => {
            let total = scraper.write_all_solved(&options).await?;
            println!("{} accepted submissions found and updated successfully!", total);
        }
    }

    Ok(())
}
