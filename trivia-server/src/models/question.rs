//! Question records and validated input for new questions

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Lowest accepted difficulty
pub const MIN_DIFFICULTY: i64 = 1;

/// Highest accepted difficulty
pub const MAX_DIFFICULTY: i64 = 5;

/// Question joined with its category.
///
/// This is the wire shape for every endpoint that returns questions:
/// `{id, question, answer, difficulty, category_id, category_name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category_id: i32,
    pub category_name: String,
}

/// Validated payload for inserting a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    question: String,
    answer: String,
    difficulty: i32,
    category: i32,
}

impl NewQuestion {
    /// Validate raw input.
    ///
    /// # Rules
    /// - `question` and `answer` are not blank; the text is kept as submitted,
    ///   so uniqueness compares exact strings
    /// - `difficulty` is within 1..=5
    /// - `category` is a positive id
    ///
    /// # Example
    /// ```
    /// use trivia_server::models::NewQuestion;
    ///
    /// assert!(NewQuestion::new("Where is Egypt?", "North-east Africa", 1, 3).is_ok());
    /// assert!(NewQuestion::new("   ", "x", 1, 3).is_err());
    /// assert!(NewQuestion::new("Where?", "x", 9, 3).is_err());
    /// ```
    pub fn new(
        question: &str,
        answer: &str,
        difficulty: i64,
        category: i64,
    ) -> Result<Self, ValidationError> {
        if question.trim().is_empty() {
            return Err(ValidationError::Empty { field: "question" });
        }

        if answer.trim().is_empty() {
            return Err(ValidationError::Empty { field: "answer" });
        }

        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(ValidationError::OutOfRange {
                field: "difficulty",
                min: MIN_DIFFICULTY,
                max: MAX_DIFFICULTY,
            });
        }

        let category = i32::try_from(category)
            .ok()
            .filter(|id| *id > 0)
            .ok_or(ValidationError::OutOfRange {
                field: "category",
                min: 1,
                max: i32::MAX as i64,
            })?;

        Ok(Self {
            question: question.to_owned(),
            answer: answer.to_owned(),
            // range-checked above
            difficulty: difficulty as i32,
            category,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    pub fn category(&self) -> i32 {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_text_as_submitted() {
        let q = NewQuestion::new("  Who painted the Mona Lisa? ", " Da Vinci ", 2, 2).unwrap();
        assert_eq!(q.question(), "  Who painted the Mona Lisa? ");
        assert_eq!(q.answer(), " Da Vinci ");
        assert_eq!(q.difficulty(), 2);
        assert_eq!(q.category(), 2);
    }

    #[test]
    fn rejects_blank_fields() {
        let err = NewQuestion::new("", "answer", 1, 1).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "question" });

        let err = NewQuestion::new("question", "  ", 1, 1).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "answer" });
    }

    #[test]
    fn difficulty_bounds() {
        assert!(NewQuestion::new("q", "a", 1, 1).is_ok());
        assert!(NewQuestion::new("q", "a", 5, 1).is_ok());

        let err = NewQuestion::new("q", "a", 0, 1).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "difficulty", .. }));
        assert!(NewQuestion::new("q", "a", 6, 1).is_err());
    }

    #[test]
    fn category_must_be_positive() {
        assert!(NewQuestion::new("q", "a", 1, 0).is_err());
        assert!(NewQuestion::new("q", "a", 1, -4).is_err());
        assert!(NewQuestion::new("q", "a", 1, i64::from(i32::MAX) + 1).is_err());
    }

    #[test]
    fn question_wire_shape() {
        let q = Question {
            id: 5,
            question: "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?".into(),
            answer: "Maya Angelou".into(),
            difficulty: 2,
            category_id: 4,
            category_name: "History".into(),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["category_id"], 4);
        assert_eq!(json["category_name"], "History");
        assert_eq!(json["difficulty"], 2);
    }
}
