use serde::{Deserialize, Serialize};

/// Option slot on a question. The platform serves exactly four per question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(OptionKey::A),
            'b' => Some(OptionKey::B),
            'c' => Some(OptionKey::C),
            'd' => Some(OptionKey::D),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OptionKey::A => 'a',
            OptionKey::B => 'b',
            OptionKey::C => 'c',
            OptionKey::D => 'd',
        }
    }
}

/// Difficulty drives both the time and the score delta of an answer.
/// The platform only distinguishes easy and medium explicitly; anything
/// else it serves is graded as hard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[serde(other)]
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "Image", default)]
    pub image: String,
    #[serde(rename = "Question")]
    pub prompt: String,
    #[serde(rename = "Answer")]
    pub answer: OptionKey,
    #[serde(rename = "Level")]
    pub level: Difficulty,
    #[serde(rename = "Option_a")]
    pub option_a: String,
    #[serde(rename = "Option_b")]
    pub option_b: String,
    #[serde(rename = "Option_c")]
    pub option_c: String,
    #[serde(rename = "Option_d")]
    pub option_d: String,
    #[serde(rename = "Explanation", default)]
    pub explanation: String,
}

impl Question {
    pub fn option_text(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::A => &self.option_a,
            OptionKey::B => &self.option_b,
            OptionKey::C => &self.option_c,
            OptionKey::D => &self.option_d,
        }
    }

    /// The platform serves an empty string when a question has no image.
    pub fn image_url(&self) -> Option<&str> {
        if self.image.is_empty() {
            None
        } else {
            Some(&self.image)
        }
    }
}

/// Payload of `GET /questions/{category}`: the stored question list plus
/// the presentation permutation deciding the order they are shown in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionBatch {
    #[serde(default)]
    pub data: Vec<Question>,
    #[serde(default)]
    pub numbers: Vec<usize>,
}

impl QuestionBatch {
    /// Apply the permutation. `numbers` is 1-based; the server owns the
    /// in-range invariant, so entries that fall outside `data` are skipped
    /// rather than aborting the quiz.
    pub fn ordered(&self) -> Vec<Question> {
        self.numbers
            .iter()
            .filter_map(|&n| n.checked_sub(1).and_then(|i| self.data.get(i)).cloned())
            .collect()
    }
}

/// Snapshot taken at the moment a question is answered. Append-only; the
/// summary screen renders these verbatim after the session finishes.
#[derive(Debug, Clone)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub image: String,
    pub prompt: String,
    pub chosen_key: OptionKey,
    pub chosen_text: String,
    pub correct_key: OptionKey,
    pub correct_text: String,
    pub explanation: String,
}

impl AnswerRecord {
    pub fn is_correct(&self) -> bool {
        self.chosen_key == self.correct_key
    }

    pub fn chosen_display(&self) -> String {
        format!("({}) {}", self.chosen_key.as_char(), self.chosen_text)
    }

    pub fn correct_display(&self) -> String {
        format!("({}) {}", self.correct_key.as_char(), self.correct_text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TallyBucket {
    pub correct: u32,
    pub incorrect: u32,
}

/// Per-difficulty correct/incorrect counts, bumped exactly once per
/// answered question and shipped to the platform when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTally {
    pub easy: TallyBucket,
    pub medium: TallyBucket,
    pub hard: TallyBucket,
}

impl ScoreTally {
    pub fn record(&mut self, level: Difficulty, correct: bool) {
        let bucket = self.bucket_mut(level);
        if correct {
            bucket.correct += 1;
        } else {
            bucket.incorrect += 1;
        }
    }

    pub fn bucket(&self, level: Difficulty) -> TallyBucket {
        match level {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn bucket_mut(&mut self, level: Difficulty) -> &mut TallyBucket {
        match level {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    pub fn answered(&self) -> u32 {
        [self.easy, self.medium, self.hard]
            .iter()
            .map(|b| b.correct + b.incorrect)
            .sum()
    }
}

/// Body of `POST /stats/`. `user_id` is only attached when an identity was
/// supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub category: String,
    pub easy_correct: u32,
    pub easy_incorrect: u32,
    pub medium_correct: u32,
    pub medium_incorrect: u32,
    pub hard_correct: u32,
    pub hard_incorrect: u32,
}

impl StatReport {
    pub fn new(category: &str, user_id: Option<String>, tally: ScoreTally) -> Self {
        Self {
            user_id,
            category: category.to_string(),
            easy_correct: tally.easy.correct,
            easy_incorrect: tally.easy.incorrect,
            medium_correct: tally.medium.correct,
            medium_incorrect: tally.medium.incorrect,
            hard_correct: tally.hard.correct,
            hard_incorrect: tally.hard.incorrect,
        }
    }
}

/// Aggregate statistics the platform returns after a score report. The
/// backend serves these as strings, decimals and all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStat {
    #[serde(rename = "Total_score")]
    pub total_score: String,
    #[serde(rename = "Highest_score")]
    pub highest_score: String,
    #[serde(rename = "Rank")]
    pub rank: String,
    #[serde(rename = "Count")]
    pub count: String,
}
