//! Built-in quiz topics.

/// A topic the player can pick from the topic-selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name, also sent to the generator.
    pub name: &'static str,
    pub description: &'static str,
}

pub const TOPICS: &[Topic] = &[
    Topic {
        id: "wellness",
        name: "Wellness & Health",
        description: "Mental health, nutrition, fitness, and well-being practices",
    },
    Topic {
        id: "tech-trends",
        name: "Tech Trends",
        description: "Latest technology developments, AI, and digital innovation",
    },
    Topic {
        id: "science",
        name: "Science & Discovery",
        description: "Scientific breakthroughs, space exploration, and research",
    },
    Topic {
        id: "environment",
        name: "Environment & Climate",
        description: "Climate change, sustainability, and environmental science",
    },
    Topic {
        id: "creativity",
        name: "Creativity & Arts",
        description: "Creative processes, art history, and cultural trends",
    },
    Topic {
        id: "general-knowledge",
        name: "General Knowledge",
        description: "History, geography, culture, and interesting facts",
    },
];

/// Look up a built-in topic by id.
pub fn find(id: &str) -> Option<&'static Topic> {
    TOPICS.iter().find(|t| t.id == id)
}
