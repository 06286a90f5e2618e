/// A canned question from the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub id: &'static str,
    pub title: &'static str,
    pub question: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicCategory {
    pub key: &'static str,
    pub name: &'static str,
    pub topics: &'static [Topic],
}

pub const KNOWLEDGE_BASE: &[TopicCategory] = &[
    TopicCategory {
        key: "australia",
        name: "Australia Immigration",
        topics: &[
            Topic {
                id: "au-skilled",
                title: "Skilled Migration",
                question: "What categories of skilled migration are available in Australia?",
            },
            Topic {
                id: "au-family",
                title: "Family Reunion",
                question: "Can I apply for parent migration to Australia?",
            },
            Topic {
                id: "au-points",
                title: "Points System",
                question: "How is the Australian skilled migration points system calculated?",
            },
            Topic {
                id: "au-pr",
                title: "Permanent Residency",
                question: "How long after getting Australian PR can I apply for citizenship?",
            },
            Topic {
                id: "au-work",
                title: "Work Visa",
                question: "What are the conditions for a 482 work visa application?",
            },
        ],
    },
    TopicCategory {
        key: "newzealand",
        name: "New Zealand Immigration",
        topics: &[
            Topic {
                id: "nz-skilled",
                title: "Skilled Migration",
                question: "What are the requirements for New Zealand skilled migration?",
            },
            Topic {
                id: "nz-family",
                title: "Family Reunion",
                question: "How can I immigrate to New Zealand through family relationships?",
            },
            Topic {
                id: "nz-points",
                title: "Points System",
                question: "What are the scoring criteria for New Zealand skilled migration?",
            },
            Topic {
                id: "nz-work",
                title: "Work Visa",
                question: "What is the process for converting a New Zealand work visa to permanent residency?",
            },
            Topic {
                id: "nz-business",
                title: "Investment Migration",
                question: "How much investment is required for New Zealand investor migration?",
            },
        ],
    },
    TopicCategory {
        key: "comparison",
        name: "AU-NZ Comparison",
        topics: &[
            Topic {
                id: "comp-overview",
                title: "Policy Comparison",
                question: "What are the main differences between Australia and New Zealand immigration policies?",
            },
            Topic {
                id: "comp-requirements",
                title: "Requirements",
                question: "Is skilled migration to Australia or New Zealand easier to apply for?",
            },
            Topic {
                id: "comp-living",
                title: "Living Costs",
                question: "Which has higher living costs, Australia or New Zealand?",
            },
            Topic {
                id: "comp-job",
                title: "Job Opportunities",
                question: "Which country offers more job opportunities, Australia or New Zealand?",
            },
        ],
    },
];

/// Category by key, case-insensitive
pub fn find_category(key: &str) -> Option<&'static TopicCategory> {
    KNOWLEDGE_BASE
        .iter()
        .find(|c| c.key.eq_ignore_ascii_case(key.trim()))
}

/// Topic by id across all categories
pub fn find_topic(id: &str) -> Option<&'static Topic> {
    KNOWLEDGE_BASE
        .iter()
        .flat_map(|c| c.topics.iter())
        .find(|t| t.id.eq_ignore_ascii_case(id.trim()))
}
