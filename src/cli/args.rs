use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::intake::{
    EligibilityProfile, Education, EnglishLevel, TargetCountry, WorkExperience, MAX_AGE, MIN_AGE,
};

#[derive(Parser, Debug)]
#[command(name = "immigo")]
#[command(version)]
#[command(about = "ImmiGo - your New Zealand and Australia immigration AI consultant", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// API key for the chat-completion service
    #[arg(long, env = "IMMIGO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat-completion endpoint URL
    #[arg(long, env = "IMMIGO_API_URL")]
    pub api_url: Option<String>,

    /// Number of messages sent to the service per question
    #[arg(long)]
    pub max_history: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Ask a single question and exit
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Output format for single questions and assessments
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Start a chat session (default)
    Chat,
    /// Browse the immigration knowledge base
    Topics {
        /// Category to show (australia, newzealand, comparison)
        category: Option<String>,
    },
    /// Submit an immigration eligibility assessment
    Assess(AssessArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    /// Target country
    #[arg(long, value_enum, default_value_t = TargetCountry::Australia)]
    pub country: TargetCountry,

    /// Age (18-65)
    #[arg(long, value_parser = clap::value_parser!(u8).range(i64::from(MIN_AGE)..=i64::from(MAX_AGE)))]
    pub age: u8,

    /// Highest education
    #[arg(long, value_enum, default_value_t = Education::Bachelor)]
    pub education: Education,

    /// Relevant work experience
    #[arg(long, value_enum, default_value_t = WorkExperience::UpToTwo)]
    pub experience: WorkExperience,

    /// English level
    #[arg(long, value_enum, default_value_t = EnglishLevel::Competent)]
    pub english: EnglishLevel,

    /// Occupation, e.g. "Software Engineer"
    #[arg(long)]
    pub occupation: String,

    /// You have relatives in the target country
    #[arg(long)]
    pub family: bool,
}

impl AssessArgs {
    pub fn to_profile(&self) -> EligibilityProfile {
        EligibilityProfile {
            target_country: self.country,
            age: self.age,
            education: self.education,
            work_experience: self.experience,
            english_level: self.english,
            occupation: self.occupation.clone(),
            family_connections: self.family,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Text,
    /// JSON structured output
    Json,
}
