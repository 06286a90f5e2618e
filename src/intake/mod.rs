// Gateway module for intake - follows the Train Station Pattern
// Producers of question text for the session

mod form;
mod topics;

pub use form::{
    EligibilityProfile, Education, EnglishLevel, TargetCountry, WorkExperience, MAX_AGE, MIN_AGE,
};
pub use topics::{find_category, find_topic, Topic, TopicCategory, KNOWLEDGE_BASE};
