//! Quiz question selection
//!
//! Picks one unseen question at random from a category pool. Category id 0
//! means every question.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::db::TriviaStore;
use crate::error::Result;
use crate::models::{Question, ValidationError};

/// Which questions a quiz draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    All,
    Only(i32),
}

impl QuizCategory {
    /// Interpret a client-supplied category id; 0 selects every category.
    pub fn from_id(id: i64) -> Result<Self, ValidationError> {
        match id {
            0 => Ok(Self::All),
            id => i32::try_from(id)
                .map(Self::Only)
                .map_err(|_| ValidationError::InvalidFormat {
                    field: "quiz_category.id",
                    reason: "category id out of range",
                }),
        }
    }
}

/// Outcome of a quiz draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    Next { question: Question, pool_size: usize },
    /// Every question in the pool has been asked
    Exhausted { pool_size: usize },
}

impl QuizOutcome {
    pub fn pool_size(&self) -> usize {
        match self {
            Self::Next { pool_size, .. } | Self::Exhausted { pool_size } => *pool_size,
        }
    }

    pub fn into_question(self) -> Option<Question> {
        match self {
            Self::Next { question, .. } => Some(question),
            Self::Exhausted { .. } => None,
        }
    }
}

/// Choose an unseen question from `pool`.
///
/// Exhausted when as many distinct ids were asked as the pool holds, or when
/// no candidate is left for any other reason (e.g. `previous` carries ids
/// from another category).
pub fn select<R>(pool: Vec<Question>, previous: &HashSet<i32>, rng: &mut R) -> QuizOutcome
where
    R: Rng + ?Sized,
{
    let pool_size = pool.len();
    if previous.len() == pool_size {
        return QuizOutcome::Exhausted { pool_size };
    }

    let candidates: Vec<Question> = pool
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    match candidates.choose(rng) {
        Some(question) => QuizOutcome::Next {
            question: question.clone(),
            pool_size,
        },
        None => QuizOutcome::Exhausted { pool_size },
    }
}

/// Load the pool for `category` and draw the next question.
pub async fn next_question(
    store: &dyn TriviaStore,
    category: QuizCategory,
    previous: &HashSet<i32>,
) -> Result<QuizOutcome> {
    let pool = match category {
        QuizCategory::All => store.questions().await?,
        QuizCategory::Only(id) => store.questions_in_category(id).await?,
    };

    let outcome = draw(pool, previous);
    tracing::debug!(
        ?category,
        asked = previous.len(),
        pool_size = outcome.pool_size(),
        exhausted = matches!(outcome, QuizOutcome::Exhausted { .. }),
        "quiz draw"
    );
    Ok(outcome)
}

fn draw(pool: Vec<Question>, previous: &HashSet<i32>) -> QuizOutcome {
    select(pool, previous, &mut rand::thread_rng())
}
