/// Constants module to avoid magic numbers in the codebase

// Network Configuration
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

// Timeouts
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RESPONSE_TIMEOUT_SECS: u64 = 60;

// Default Model Configuration
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

// History
pub const DEFAULT_MAX_HISTORY: usize = 20;
/// Displayed transcript is allowed to grow to this many windows before pruning
pub const DISPLAY_HISTORY_FACTOR: usize = 2;

// Fixed behavioral directive sent ahead of every conversation
pub const SYSTEM_PROMPT: &str = "\
You are a professional immigration consultant for New Zealand and Australia named ImmiGo. \
You have comprehensive knowledge about immigration policies, visa types, application processes, \
and eligibility requirements for New Zealand and Australia.

Your responsibilities include:
1. Accurately answering questions about New Zealand and Australia immigration policies
2. Explaining different types of visas and their requirements
3. Providing guidance on visa application processes
4. Assessing immigration eligibility based on user-provided information
5. Recommending suitable immigration pathways for users' situations

Please note:
- Provide accurate and up-to-date information
- Clearly state that you are not a legal advisor and cannot provide legal advice
- Proactively ask questions when unsure or need more information
- Use simple and easy-to-understand language
- Respond to user questions in English";

// User-facing messages
pub const WELCOME_MESSAGE: &str = "Hello! I am ImmiGo, your New Zealand and Australia immigration AI consultant. \
I can answer questions about immigration policies, visa applications, eligibility requirements, and more. \
Please tell me what you would like to know?";

pub const CONFIG_ERROR_MESSAGE: &str =
    "System configuration error. Please contact administrator to set up AI API key.";

pub const APOLOGY_MESSAGE: &str =
    "Sorry, an error occurred while processing your request. Please try again later.";

pub const TIMEOUT_MESSAGE: &str =
    "Sorry, the AI consultant took too long to respond. Please try again later.";
