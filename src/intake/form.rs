use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::utils::ImmigoError;

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetCountry {
    Australia,
    #[value(name = "newzealand", alias = "nz")]
    NewZealand,
}

impl TargetCountry {
    pub fn label(&self) -> &'static str {
        match self {
            TargetCountry::Australia => "Australia",
            TargetCountry::NewZealand => "New Zealand",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Education {
    #[value(name = "highschool")]
    HighSchool,
    Diploma,
    Bachelor,
    Master,
    Phd,
}

impl Education {
    pub fn label(&self) -> &'static str {
        match self {
            Education::HighSchool => "High School",
            Education::Diploma => "Diploma/Certificate",
            Education::Bachelor => "Bachelor's Degree",
            Education::Master => "Master's Degree",
            Education::Phd => "PhD/Doctorate",
        }
    }
}

/// Years of relevant work experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum WorkExperience {
    #[value(name = "0-2")]
    UpToTwo,
    #[value(name = "3-5")]
    ThreeToFive,
    #[value(name = "6-8")]
    SixToEight,
    #[value(name = "8+")]
    MoreThanEight,
}

impl WorkExperience {
    pub fn label(&self) -> &'static str {
        match self {
            WorkExperience::UpToTwo => "0-2 years",
            WorkExperience::ThreeToFive => "3-5 years",
            WorkExperience::SixToEight => "6-8 years",
            WorkExperience::MoreThanEight => "8+ years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EnglishLevel {
    Basic,
    Competent,
    Proficient,
    Superior,
}

impl EnglishLevel {
    pub fn label(&self) -> &'static str {
        match self {
            EnglishLevel::Basic => "Basic (IELTS 4-5)",
            EnglishLevel::Competent => "Competent (IELTS 6-6.5)",
            EnglishLevel::Proficient => "Proficient (IELTS 7-7.5)",
            EnglishLevel::Superior => "Superior (IELTS 8+)",
        }
    }
}

/// Answers collected by the eligibility assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityProfile {
    pub target_country: TargetCountry,
    pub age: u8,
    pub education: Education,
    pub work_experience: WorkExperience,
    pub english_level: EnglishLevel,
    pub occupation: String,
    pub family_connections: bool,
}

impl EligibilityProfile {
    pub fn validate(&self) -> Result<(), ImmigoError> {
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(ImmigoError::ValidationError(format!(
                "age must be between {} and {}",
                MIN_AGE, MAX_AGE
            )));
        }
        if self.occupation.trim().is_empty() {
            return Err(ImmigoError::ValidationError(
                "occupation is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Natural-language question handed to the session
    pub fn to_question(&self) -> String {
        let country = self.target_country.label();
        let relatives = if self.family_connections { "Have" } else { "No" };

        format!(
            "Please assess my immigration eligibility based on the following information:\n\
             Target Country: {}\n\
             Age: {}\n\
             Education: {}\n\
             Work Experience: {}\n\
             English Level: {}\n\
             Occupation: {}\n\
             Family Connections: {} relatives in {}",
            country,
            self.age,
            self.education.label(),
            self.work_experience.label(),
            self.english_level.label(),
            self.occupation.trim(),
            relatives,
            country,
        )
    }
}
