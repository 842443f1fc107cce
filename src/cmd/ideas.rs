//! Idea list commands: `ezlo ideas [gen|clear]`.

use anyhow::Result;

use ezlo::generation::GenerationClient;
use ezlo::session::Session;
use ezlo::ui::Spinner;
use ezlo::ui::icons::IDEA;
use ezlo::workflow;

use super::super::IdeasAction;

pub async fn cmd_ideas(
    session: &mut Session,
    client: &dyn GenerationClient,
    action: Option<IdeasAction>,
) -> Result<()> {
    match action {
        Some(IdeasAction::Clear) => {
            session.clear_ideas()?;
            println!("All ideas cleared from the database.");
        }
        Some(IdeasAction::Gen) => {
            let spinner = Spinner::start("Fetching ideas...");
            match workflow::generate_ideas(session, client).await {
                Ok(ideas) => {
                    spinner.success(format!("{} ideas added to database.", ideas.len()));
                    for idea in ideas {
                        println!("  {}{}", IDEA, idea);
                    }
                }
                Err(e) => {
                    spinner.fail("Failed to generate ideas");
                    return Err(e.into());
                }
            }
        }
        None => {
            let entries = session.idea_entries()?;
            if entries.is_empty() {
                println!("No ideas found in the database.");
            } else {
                for (i, entry) in entries.iter().enumerate() {
                    println!("{}: {}", i, entry);
                }
            }
        }
    }
    Ok(())
}
