use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    cli::print_topics,
    intake::find_topic,
    models::{ChatMessage, MessageRole},
    session::{Session, SessionEvent},
};

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Help,
    History,
    Topics(Option<String>),
    Topic(String),
    Unknown(String),
    /// Free text; an empty line sends whatever is in the input buffer
    Send(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix('/') else {
            return ReplCommand::Send(line.to_string());
        };

        let mut parts = command.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts
            .next()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        match (name.as_str(), arg) {
            ("quit" | "exit" | "q", _) => ReplCommand::Quit,
            ("help" | "h", _) => ReplCommand::Help,
            ("history", _) => ReplCommand::History,
            ("topics", category) => ReplCommand::Topics(category),
            ("topic", Some(id)) => ReplCommand::Topic(id),
            _ => ReplCommand::Unknown(trimmed.to_string()),
        }
    }
}

/// Interactive chat loop on stdin/stdout
pub async fn run_repl(session: Session) -> Result<()> {
    println!("{}", "ImmiGo".bold().cyan());
    println!("Your New Zealand and Australia Immigration AI Consultant");
    println!("{}\n", "Type /help for commands".dimmed());

    for message in session.transcript() {
        println!("{}\n", format_message(&message));
    }

    session.subscribe(Arc::new(render_event));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Help => print_help(),
            ReplCommand::History => {
                for message in session.transcript() {
                    println!("{}\n", format_message(&message));
                }
            }
            ReplCommand::Topics(category) => {
                if let Err(e) = print_topics(category.as_deref()) {
                    println!("{}", e.to_string().red());
                }
            }
            ReplCommand::Topic(id) => match find_topic(&id) {
                Some(topic) => {
                    session.set_input(topic.question);
                    println!("{} {}", "Loaded:".cyan(), topic.question);
                    println!("{}", "Press Enter to send it, or type another question".dimmed());
                }
                None => println!("{} {}", "Unknown topic:".red(), id),
            },
            ReplCommand::Unknown(command) => {
                println!("{} {} (try /help)", "Unknown command:".red(), command)
            }
            ReplCommand::Send(text) => {
                if !text.trim().is_empty() {
                    session.set_input(text);
                }
                session.submit_input().await;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn render_event(event: &SessionEvent) {
    match event {
        SessionEvent::PendingChanged(true) => {
            println!("{}", "AI consultant is thinking...".dimmed().italic());
        }
        SessionEvent::MessageAppended(message) if message.role == MessageRole::Assistant => {
            println!("\n{}\n", format_message(message));
        }
        _ => {}
    }
}

pub fn format_message(message: &ChatMessage) -> String {
    match message.role {
        MessageRole::User => format!("{} {}", "You:".green().bold(), message.content),
        MessageRole::Assistant => format!("{} {}", "ImmiGo:".cyan().bold(), message.content),
        MessageRole::System => format!("{} {}", "System:".yellow(), message.content),
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  /topics [category]  List knowledge base topics");
    println!("  /topic <id>         Load a topic question into the input");
    println!("  /history            Show the conversation so far");
    println!("  /help               Show this help");
    println!("  /quit               Exit");
    println!("Anything else is sent to ImmiGo. An empty line sends the loaded topic.");
}
