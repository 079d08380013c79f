//! Deterministic placeholder quests shown when the backend is unavailable.

use super::{Difficulty, Quest, QuestData, QuestId, QuestStatus};

struct Template {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    difficulty: Difficulty,
    status: QuestStatus,
    reward: u32,
    participants: u32,
    estimated_time: &'static str,
    planet: &'static str,
}

const TEMPLATES: [Template; 6] = [
    Template {
        title: "Getting Started with Rust",
        description: "Install the toolchain and write your first program.",
        category: "Programming",
        difficulty: Difficulty::Beginner,
        status: QuestStatus::ToDo,
        reward: 50,
        participants: 128,
        estimated_time: "30 min",
        planet: "Mercury",
    },
    Template {
        title: "Ownership and Borrowing",
        description: "Work through moves, borrows and lifetimes.",
        category: "Programming",
        difficulty: Difficulty::Intermediate,
        status: QuestStatus::InProgress,
        reward: 100,
        participants: 64,
        estimated_time: "2 hours",
        planet: "Venus",
    },
    Template {
        title: "Async Fundamentals",
        description: "Futures, executors and cooperative scheduling.",
        category: "Concurrency",
        difficulty: Difficulty::Advanced,
        status: QuestStatus::InReview,
        reward: 150,
        participants: 32,
        estimated_time: "3 hours",
        planet: "Earth",
    },
    Template {
        title: "Version Control Basics",
        description: "Commit, branch and merge with confidence.",
        category: "Tooling",
        difficulty: Difficulty::Beginner,
        status: QuestStatus::Done,
        reward: 50,
        participants: 256,
        estimated_time: "45 min",
        planet: "Mars",
    },
    Template {
        title: "Designing Data Pipelines",
        description: "Unlocks once the fundamentals are complete.",
        category: "Architecture",
        difficulty: Difficulty::Advanced,
        status: QuestStatus::Backlog,
        reward: 200,
        participants: 8,
        estimated_time: "1 day",
        planet: "Jupiter",
    },
    Template {
        title: "Testing Strategies",
        description: "Unit, integration and behaviour tests.",
        category: "Quality",
        difficulty: Difficulty::Intermediate,
        status: QuestStatus::Backlog,
        reward: 120,
        participants: 16,
        estimated_time: "4 hours",
        planet: "Saturn",
    },
];

/// Returns the fixed set of placeholder quests.
///
/// The set is identical on every call and already in board order. It covers
/// every presentation branch: locked backlog quests at 0%, partial progress,
/// and a completed quest.
#[must_use]
pub fn synthesize() -> Vec<Quest> {
    let mut quests: Vec<Quest> = (1_u16..)
        .zip(TEMPLATES.iter())
        .map(|(ordinal, template)| {
            Quest::from_data(QuestData {
                id: QuestId::synthetic(ordinal),
                title: template.title.to_owned(),
                description: template.description.to_owned(),
                category: template.category.to_owned(),
                difficulty: template.difficulty,
                status: template.status,
                reward: template.reward,
                participants: template.participants,
                estimated_time: template.estimated_time.to_owned(),
                planet: Some(template.planet.to_owned()),
                link: None,
                created_at: None,
            })
        })
        .collect();
    quests.sort_by(Quest::board_order);
    quests
}
