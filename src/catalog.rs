// src/catalog.rs

//! Static quiz tables: genre archetypes and the question bank.
//!
//! Both are validated once at startup and never mutated afterwards.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{
    personality::{GENRE_COUNT, Genre, TraitScore},
    question::{AnswerOption, Question},
};

/// A question needs at least this many options to be a choice.
pub const MIN_OPTIONS: usize = 2;

/// Fatal problems with the static tables. The service refuses to start.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("the archetype table is empty")]
    EmptyArchetypes,

    #[error("genre '{0}' has no archetype")]
    MissingGenre(Genre),

    #[error("genre '{0}' has more than one archetype")]
    DuplicateGenre(Genre),

    #[error("the question bank is empty")]
    EmptyQuestionBank,

    #[error("question {question} has {options} options, at least {min} are required", min = MIN_OPTIONS)]
    TooFewOptions { question: usize, options: usize },

    #[error("cannot sample {requested} questions from a bank of {available}")]
    InvalidQuestionCount { requested: usize, available: usize },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One archetype per genre, kept in evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeTable {
    entries: [(Genre, TraitScore); GENRE_COUNT],
}

impl ArchetypeTable {
    /// Builds the table, requiring every genre exactly once.
    /// The given order is the order the matcher evaluates genres in.
    pub fn new(
        entries: impl IntoIterator<Item = (Genre, TraitScore)>,
    ) -> Result<Self, ConfigurationError> {
        let entries: Vec<(Genre, TraitScore)> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(ConfigurationError::EmptyArchetypes);
        }

        for (i, (genre, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(seen, _)| seen == genre) {
                return Err(ConfigurationError::DuplicateGenre(*genre));
            }
        }
        for genre in Genre::ALL {
            if !entries.iter().any(|(g, _)| *g == genre) {
                return Err(ConfigurationError::MissingGenre(genre));
            }
        }

        // Every genre exactly once means the length is GENRE_COUNT.
        let entries = <[(Genre, TraitScore); GENRE_COUNT]>::try_from(entries)
            .map_err(|_| ConfigurationError::EmptyArchetypes)?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(Genre, TraitScore); GENRE_COUNT] {
        &self.entries
    }

    pub fn archetype(&self, genre: Genre) -> TraitScore {
        self.entries
            .iter()
            .find(|(g, _)| *g == genre)
            .map(|(_, score)| *score)
            .unwrap_or_default()
    }
}

/// Every question a respondent can be asked.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, ConfigurationError> {
        if questions.is_empty() {
            return Err(ConfigurationError::EmptyQuestionBank);
        }
        if let Some((question, q)) = questions
            .iter()
            .enumerate()
            .find(|(_, q)| q.options.len() < MIN_OPTIONS)
        {
            return Err(ConfigurationError::TooFewOptions {
                question,
                options: q.options.len(),
            });
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// Everything the scoring core reads: archetypes and question bank.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub archetypes: ArchetypeTable,
    pub bank: QuestionBank,
}

/// On-disk question bank. Archetypes may be overridden as well.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    questions: Vec<Question>,
    #[serde(default)]
    archetypes: Option<Vec<ArchetypeEntry>>,
}

#[derive(Debug, Deserialize)]
struct ArchetypeEntry {
    genre: Genre,
    score: TraitScore,
}

impl Catalog {
    pub fn builtin() -> Result<Self, ConfigurationError> {
        Ok(Self {
            archetypes: ArchetypeTable::new(builtin_archetypes())?,
            bank: QuestionBank::new(builtin_questions())?,
        })
    }

    /// Loads the catalog from a JSON file, or the built-in one when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let Some(path) = path else {
            return Self::builtin();
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigurationError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        let archetypes = match file.archetypes {
            Some(entries) => ArchetypeTable::new(entries.into_iter().map(|e| (e.genre, e.score)))?,
            None => ArchetypeTable::new(builtin_archetypes())?,
        };
        Ok(Self {
            archetypes,
            bank: QuestionBank::new(file.questions)?,
        })
    }

    /// Fails when a session of `count` questions cannot be drawn from the bank.
    pub fn ensure_can_sample(&self, count: usize) -> Result<(), ConfigurationError> {
        if count == 0 || count > self.bank.len() {
            return Err(ConfigurationError::InvalidQuestionCount {
                requested: count,
                available: self.bank.len(),
            });
        }
        Ok(())
    }
}

pub fn builtin_archetypes() -> Vec<(Genre, TraitScore)> {
    vec![
        (Genre::Business, TraitScore::new(8, 6, 7, 9, 5)),
        (Genre::History, TraitScore::new(7, 5, 6, 8, 4)),
        (Genre::Computers, TraitScore::new(9, 8, 7, 9, 6)),
        (Genre::Law, TraitScore::new(6, 7, 8, 6, 7)),
        (Genre::Art, TraitScore::new(9, 9, 8, 7, 8)),
    ]
}

fn opt(text: &str, personality: TraitScore) -> AnswerOption {
    AnswerOption {
        text: text.to_string(),
        personality,
    }
}

fn question(prompt: &str, options: Vec<AnswerOption>) -> Question {
    Question {
        prompt: prompt.to_string(),
        options,
    }
}

pub fn builtin_questions() -> Vec<Question> {
    vec![
        question(
            "You find yourself with an unexpected day off. How do you spend your time?",
            vec![
                opt("Reading a book and exploring creative hobbies.", TraitScore::new(8, 6, 4, 7, 5)),
                opt("Planning a solo adventure or trying a new activity.", TraitScore::new(5, 8, 6, 7, 4)),
                opt("Relaxing at home and enjoying a calm day.", TraitScore::new(3, 2, 5, 4, 6)),
            ],
        ),
        question(
            "In a group project, what role do you naturally take on?",
            vec![
                opt("Brainstorming and generating creative ideas.", TraitScore::new(9, 5, 7, 8, 6)),
                opt("Working independently on a specific task.", TraitScore::new(4, 8, 5, 6, 3)),
                opt("Leading and coordinating the team.", TraitScore::new(6, 4, 9, 7, 8)),
            ],
        ),
        question(
            "How do you handle a challenging problem at work or in your personal life?",
            vec![
                opt(
                    "Break it down into smaller parts and approach each step methodically.",
                    TraitScore::new(4, 5, 6, 9, 8),
                ),
                opt(
                    "Trust your instincts and take a bold, unconventional approach.",
                    TraitScore::new(8, 6, 9, 7, 4),
                ),
                opt(
                    "Seek advice from others and consider various perspectives.",
                    TraitScore::new(6, 4, 5, 8, 7),
                ),
            ],
        ),
        question(
            "What type of learning environment do you find most effective?",
            vec![
                opt("Engaging in hands-on and practical activities.", TraitScore::new(8, 5, 6, 7, 4)),
                opt("Exploring concepts independently through self-study.", TraitScore::new(4, 9, 5, 8, 7)),
                opt(
                    "Participating in group discussions and collaborative projects.",
                    TraitScore::new(3, 4, 6, 5, 7),
                ),
            ],
        ),
        question(
            "When faced with a decision, how do you typically make choices?",
            vec![
                opt(
                    "Analyzing all available information and considering pros and cons.",
                    TraitScore::new(4, 6, 7, 9, 8),
                ),
                opt("Following your intuition and gut feelings.", TraitScore::new(7, 5, 8, 6, 4)),
                opt(
                    "Seeking advice from others and considering their opinions.",
                    TraitScore::new(3, 4, 5, 6, 7),
                ),
            ],
        ),
        question(
            "How do you prefer to express yourself in a group setting?",
            vec![
                opt(
                    "Through well-thought-out and articulate verbal communication.",
                    TraitScore::new(5, 6, 8, 9, 7),
                ),
                opt("Through artistic or creative contributions.", TraitScore::new(9, 5, 7, 6, 4)),
                opt("Through leading by example and actions.", TraitScore::new(3, 4, 6, 5, 8)),
            ],
        ),
        question(
            "When facing a new challenge, what is your initial reaction?",
            vec![
                opt("Excitement and eagerness to try something new.", TraitScore::new(9, 6, 7, 5, 4)),
                opt("Calm and analytical assessment of the situation.", TraitScore::new(4, 5, 6, 8, 7)),
                opt("Confidence in your ability to adapt and overcome.", TraitScore::new(6, 4, 9, 7, 8)),
            ],
        ),
        question(
            "How do you handle criticism or feedback?",
            vec![
                opt("Reflect on it and use it to improve your skills.", TraitScore::new(4, 6, 7, 8, 9)),
                opt(
                    "Take it as a chance to express your unique perspective.",
                    TraitScore::new(8, 5, 6, 4, 7),
                ),
                opt(
                    "Engage in open dialogue to understand different viewpoints.",
                    TraitScore::new(6, 4, 5, 7, 8),
                ),
            ],
        ),
        question(
            "How do you approach time management?",
            vec![
                opt("Prioritize and plan tasks systematically.", TraitScore::new(4, 5, 6, 8, 7)),
                opt("Embrace flexibility and adapt to changing priorities.", TraitScore::new(7, 6, 5, 8, 4)),
                opt("Work independently at your own pace.", TraitScore::new(3, 8, 4, 5, 6)),
            ],
        ),
        question(
            "When faced with uncertainty, how do you respond?",
            vec![
                opt("Embrace the challenge with curiosity and adaptability.", TraitScore::new(8, 5, 7, 9, 6)),
                opt("Take a step back to analyze the situation thoroughly.", TraitScore::new(4, 6, 5, 8, 7)),
                opt("Seek guidance and input from others.", TraitScore::new(3, 4, 6, 5, 7)),
            ],
        ),
    ]
}
