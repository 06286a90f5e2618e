use anyhow::Result;
use colored::Colorize;

use crate::{
    app::init_config,
    intake::{find_category, TopicCategory, KNOWLEDGE_BASE},
};

use super::Commands;

/// Handle CLI subcommands that need no session
///
/// Returns `true` when the command was fully handled.
pub async fn handle_command(command: &Commands) -> Result<bool> {
    match command {
        Commands::Init => {
            println!("Initializing ImmiGo configuration...");
            init_config()?;
            println!("Configuration initialized successfully!");
            Ok(true)
        }
        Commands::Topics { category } => {
            print_topics(category.as_deref())?;
            Ok(true)
        }
        Commands::Chat | Commands::Assess(_) => Ok(false),
    }
}

/// Print the knowledge base, or one category of it
pub fn print_topics(category: Option<&str>) -> Result<()> {
    match category {
        Some(key) => match find_category(key) {
            Some(category) => print_category(category),
            None => {
                let known: Vec<&str> = KNOWLEDGE_BASE.iter().map(|c| c.key).collect();
                anyhow::bail!(
                    "Unknown category '{}'. Choose one of: {}",
                    key,
                    known.join(", ")
                );
            }
        },
        None => KNOWLEDGE_BASE.iter().for_each(print_category),
    }
    Ok(())
}

fn print_category(category: &TopicCategory) {
    println!("{}", category.name.bold());
    for topic in category.topics {
        println!(
            "  {:<18} {}",
            topic.id.cyan(),
            topic.title
        );
        println!("  {:<18} {}", "", topic.question.dimmed());
    }
    println!();
}
