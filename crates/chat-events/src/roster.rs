//! The fixed set of participants and conversation topics.

use crate::error::EventError;
use std::collections::HashSet;

/// A named topic with the lines a participant may send about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCategory {
    pub name: String,
    pub lines: Vec<String>,
}

impl TopicCategory {
    pub fn new<S: Into<String>>(name: S, lines: &[&str]) -> Self {
        Self {
            name: name.into(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Users and topic content available to the generator.
///
/// Validated on construction: a roster always has at least two distinct users and
/// at least one topic category, and no category is empty. Categories keep
/// their insertion order so seeded generation is reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    users: Vec<String>,
    topics: Vec<TopicCategory>,
}

impl Roster {
    pub fn new(users: Vec<String>, topics: Vec<TopicCategory>) -> Result<Self, EventError> {
        let distinct = users.iter().collect::<HashSet<_>>().len();
        if distinct < 2 {
            return Err(EventError::RosterTooSmall(distinct));
        }
        if topics.is_empty() {
            return Err(EventError::NoTopics);
        }
        if let Some(empty) = topics.iter().find(|t| t.lines.is_empty()) {
            return Err(EventError::EmptyTopic(empty.name.clone()));
        }

        Ok(Self { users, topics })
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn topics(&self) -> &[TopicCategory] {
        &self.topics
    }

    pub fn contains_user(&self, user: &str) -> bool {
        self.users.iter().any(|u| u == user)
    }
}

impl Default for Roster {
    fn default() -> Self {
        let users = [
            "alice", "bob", "charlie", "diana", "eve", "frank", "grace", "henry",
        ]
        .iter()
        .map(|u| u.to_string())
        .collect();

        let topics = vec![
            TopicCategory::new(
                "work",
                &[
                    "Need to schedule a meeting for the project",
                    "Deadline for Q3 deliverables is approaching",
                    "Let's discuss the new feature implementation",
                    "Client presentation tomorrow at 2 PM",
                    "Code review session this afternoon",
                ],
            ),
            TopicCategory::new(
                "social",
                &[
                    "Anyone want to grab lunch later?",
                    "Great party last night! Thanks everyone",
                    "Check out this amazing restaurant I found",
                    "Weekend plans anyone?",
                    "Movie night at my place this Saturday",
                ],
            ),
            TopicCategory::new(
                "tech",
                &[
                    "Just tried the new Kafka version, amazing features!",
                    "Anyone working with Scala 3? Thoughts?",
                    "Kubernetes deployment strategies discussion",
                    "Machine learning model performance optimization",
                    "React vs Vue for new frontend project",
                ],
            ),
        ];

        Self { users, topics }
    }
}
