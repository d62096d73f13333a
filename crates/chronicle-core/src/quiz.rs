//! Year-guessing quiz generation.
//!
//! Each question shows an event and asks in which year it happened. The
//! correct year is mixed with up to three distractor years drawn from the
//! catalog's distinct-year index.
//!
//! # Randomness
//!
//! All sampling and shuffling goes through a caller-supplied
//! [`rand::Rng`]. Request handlers pass a thread-local generator; tests
//! pass a seeded [`SmallRng`](rand::rngs::SmallRng) so output is
//! reproducible.
//!
//! # Distractor Budget
//!
//! Distractor draws share one budget of [`MAX_DISTRACTOR_ATTEMPTS`] per
//! question. The counter is not reset between distractors, so a catalog
//! with fewer than four distinct years yields short option lists instead
//! of looping.

use chronicle_types::{NormalizedEvent, Question};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use tracing::debug;

use crate::catalog::Catalog;

/// Question count used when the requested count is missing or malformed.
pub const DEFAULT_QUESTIONS: usize = 5;

/// Smallest quiz that will be generated.
pub const MIN_QUESTIONS: usize = 1;

/// Largest quiz that will be generated.
pub const MAX_QUESTIONS: usize = 20;

/// Target number of wrong options per question.
pub const DISTRACTOR_COUNT: usize = 3;

/// Draws allowed per question while collecting distractors.
pub const MAX_DISTRACTOR_ATTEMPTS: usize = 50;

/// Parameters of one quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    /// Restrict questions to one `MM-DD` day when possible.
    pub day_key: Option<String>,
    /// Requested number of questions. Clamped to `[1, 20]`.
    pub count: usize,
}

impl QuizRequest {
    /// Build a request from unparsed client values.
    pub fn from_raw(day_key: Option<&str>, count: Option<&str>) -> Self {
        Self {
            day_key: day_key.filter(|d| !d.is_empty()).map(str::to_owned),
            count: clamp_count(count),
        }
    }
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self {
            day_key: None,
            count: DEFAULT_QUESTIONS,
        }
    }
}

/// Parse a requested question count, clamped to `[1, 20]`.
///
/// Missing or unparsable values yield [`DEFAULT_QUESTIONS`].
pub fn clamp_count(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map_or(DEFAULT_QUESTIONS, |requested| {
            usize::try_from(requested.max(1)).map_or(MAX_QUESTIONS, |n| n.min(MAX_QUESTIONS))
        })
}

/// Events eligible for questions.
///
/// Only events with a known year qualify. When `day_key` is given and no
/// event on that day qualifies, the whole catalog is used instead.
pub fn candidate_pool<'a>(catalog: &'a Catalog, day_key: Option<&str>) -> Vec<&'a NormalizedEvent> {
    let known = || catalog.events().iter().filter(|e| e.has_known_year());

    if let Some(day) = day_key.filter(|d| !d.is_empty()) {
        let pool: Vec<&NormalizedEvent> = known().filter(|e| e.day_key == day).collect();
        if !pool.is_empty() {
            return pool;
        }
        debug!(day_key = day, "No dated events for day, falling back to whole catalog");
    }

    known().collect()
}

/// Generate a quiz from the catalog.
///
/// Returns fewer questions than requested when the pool is smaller, and
/// none at all when no event has a known year.
pub fn generate_quiz<R: Rng + ?Sized>(
    catalog: &Catalog,
    request: &QuizRequest,
    rng: &mut R,
) -> Vec<Question> {
    let pool = candidate_pool(catalog, request.day_key.as_deref());
    let amount = request
        .count
        .clamp(MIN_QUESTIONS, MAX_QUESTIONS)
        .min(pool.len());

    let chosen = rand::seq::index::sample(rng, pool.len(), amount);

    let mut questions = Vec::with_capacity(amount);
    for index in chosen {
        let Some(event) = pool.get(index) else {
            continue;
        };
        let correct = event.year;
        let mut options =
            distractor_years(catalog.years(), correct, MAX_DISTRACTOR_ATTEMPTS, rng);
        options.push(correct);
        options.shuffle(rng);

        questions.push(Question {
            id: format!("q{}", questions.len().saturating_add(1)),
            question: format!("In which year did this happen? {}", event.title),
            description: event.description.clone(),
            correct,
            options,
        });
    }

    debug!(
        pool = pool.len(),
        requested = request.count,
        generated = questions.len(),
        "Quiz generated"
    );
    questions
}

/// Draw up to [`DISTRACTOR_COUNT`] distinct years other than `correct`.
///
/// `max_attempts` bounds the total number of draws for all distractors
/// together.
pub fn distractor_years<R: Rng + ?Sized>(
    years: &[i32],
    correct: i32,
    max_attempts: usize,
    rng: &mut R,
) -> Vec<i32> {
    let mut picked = Vec::with_capacity(DISTRACTOR_COUNT);
    let mut attempts = 0_usize;

    while picked.len() < DISTRACTOR_COUNT && attempts < max_attempts {
        let Some(&candidate) = years.choose(rng) else {
            break;
        };
        if candidate != correct && !picked.contains(&candidate) {
            picked.push(candidate);
        }
        attempts = attempts.saturating_add(1);
    }

    picked
}

#[cfg(test)]
mod tests {
    use chronicle_types::{LooseYear, RawEventRecord};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn dated(date: &str, title: &str) -> RawEventRecord {
        RawEventRecord {
            date: Some(date.to_owned()),
            title: Some(title.to_owned()),
            description: Some(format!("About {title}")),
            ..RawEventRecord::default()
        }
    }

    fn wide_catalog() -> Catalog {
        let mut records: Vec<RawEventRecord> = (0..30)
            .map(|i| dated(&format!("{}-03-01", 1900 + i), &format!("event {i}")))
            .collect();
        records.push(dated("1815-06-18", "Waterloo"));
        records.push(dated("1969-06-18", "Moon rock"));
        records.push(RawEventRecord {
            title: Some("Undated".to_owned()),
            ..RawEventRecord::default()
        });
        Catalog::from_records(records)
    }

    fn count_of(options: &[i32], year: i32) -> usize {
        options.iter().filter(|y| **y == year).count()
    }

    #[test]
    fn questions_have_four_unique_options_with_correct_once() {
        let catalog = wide_catalog();
        let mut rng = SmallRng::seed_from_u64(7);
        let quiz = generate_quiz(
            &catalog,
            &QuizRequest {
                day_key: None,
                count: 20,
            },
            &mut rng,
        );

        assert_eq!(quiz.len(), 20);
        for question in &quiz {
            assert_eq!(question.options.len(), 4);
            assert_eq!(count_of(&question.options, question.correct), 1);
            for option in &question.options {
                assert_eq!(count_of(&question.options, *option), 1);
                assert!(catalog.years().contains(option));
            }
            assert!(question.correct > 0);
        }
    }

    #[test]
    fn ids_are_sequential() {
        let catalog = wide_catalog();
        let mut rng = SmallRng::seed_from_u64(1);
        let quiz = generate_quiz(&catalog, &QuizRequest::default(), &mut rng);
        let ids: Vec<&str> = quiz.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["q1", "q2", "q3", "q4", "q5"]);
    }

    #[test]
    fn sampling_is_without_replacement() {
        let catalog = wide_catalog();
        let mut rng = SmallRng::seed_from_u64(3);
        let quiz = generate_quiz(
            &catalog,
            &QuizRequest {
                day_key: None,
                count: 20,
            },
            &mut rng,
        );
        let mut questions: Vec<&str> = quiz.iter().map(|q| q.question.as_str()).collect();
        questions.sort_unstable();
        questions.dedup();
        assert_eq!(questions.len(), 20);
    }

    #[test]
    fn question_references_event() {
        let catalog = Catalog::from_records(vec![
            dated("1815-06-18", "Waterloo"),
            dated("1805-10-21", "Trafalgar"),
        ]);
        let mut rng = SmallRng::seed_from_u64(9);
        let quiz = generate_quiz(
            &catalog,
            &QuizRequest {
                day_key: Some("06-18".to_owned()),
                count: 5,
            },
            &mut rng,
        );
        assert_eq!(quiz.len(), 1);
        let question = quiz.first();
        assert_eq!(
            question.map(|q| q.question.as_str()),
            Some("In which year did this happen? Waterloo")
        );
        assert_eq!(question.map(|q| q.description.as_str()), Some("About Waterloo"));
        assert_eq!(question.map(|q| q.correct), Some(1815));
    }

    #[test]
    fn same_seed_same_quiz() {
        let catalog = wide_catalog();
        let request = QuizRequest {
            day_key: None,
            count: 10,
        };
        let first = generate_quiz(&catalog, &request, &mut SmallRng::seed_from_u64(42));
        let second = generate_quiz(&catalog, &request, &mut SmallRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn day_restricted_pool() {
        let catalog = wide_catalog();
        let pool = candidate_pool(&catalog, Some("06-18"));
        let titles: Vec<&str> = pool.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Waterloo", "Moon rock"]);

        let mut rng = SmallRng::seed_from_u64(5);
        let quiz = generate_quiz(
            &catalog,
            &QuizRequest {
                day_key: Some("06-18".to_owned()),
                count: 10,
            },
            &mut rng,
        );
        assert_eq!(quiz.len(), 2);
        assert!(quiz.iter().all(|q| q.correct == 1815 || q.correct == 1969));
    }

    #[test]
    fn empty_day_falls_back_to_known_years() {
        let catalog = wide_catalog();
        let pool = candidate_pool(&catalog, Some("12-25"));
        assert_eq!(pool.len(), 32);
        assert!(pool.iter().all(|e| e.year > 0));
    }

    #[test]
    fn day_with_only_unknown_years_falls_back() {
        let catalog = Catalog::from_records(vec![
            RawEventRecord {
                mmdd: Some("01-01".to_owned()),
                title: Some("Yearless".to_owned()),
                ..RawEventRecord::default()
            },
            dated("1999-12-31", "Eve"),
        ]);
        let pool = candidate_pool(&catalog, Some("01-01"));
        let titles: Vec<&str> = pool.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Eve"]);
    }

    #[test]
    fn no_known_years_means_no_questions() {
        let catalog = Catalog::from_records(vec![RawEventRecord {
            title: Some("Undated".to_owned()),
            ..RawEventRecord::default()
        }]);
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(generate_quiz(&catalog, &QuizRequest::default(), &mut rng).is_empty());
    }

    #[test]
    fn few_distinct_years_degrade_option_count() {
        let catalog = Catalog::from_records(vec![
            dated("1900-01-01", "a"),
            dated("1900-02-01", "b"),
            dated("1950-01-01", "c"),
        ]);
        let mut rng = SmallRng::seed_from_u64(11);
        let quiz = generate_quiz(
            &catalog,
            &QuizRequest {
                day_key: None,
                count: 3,
            },
            &mut rng,
        );
        assert_eq!(quiz.len(), 3);
        for question in &quiz {
            assert!(question.options.len() <= 2);
            assert_eq!(count_of(&question.options, question.correct), 1);
        }
    }

    #[test]
    fn count_is_clamped() {
        let catalog = wide_catalog();
        let mut rng = SmallRng::seed_from_u64(2);

        let zero = generate_quiz(&catalog, &QuizRequest::from_raw(None, Some("0")), &mut rng);
        assert_eq!(zero.len(), 1);

        let negative = generate_quiz(&catalog, &QuizRequest::from_raw(None, Some("-4")), &mut rng);
        assert_eq!(negative.len(), 1);

        let huge = generate_quiz(&catalog, &QuizRequest::from_raw(None, Some("1000")), &mut rng);
        assert_eq!(huge.len(), 20);

        let direct = generate_quiz(
            &catalog,
            &QuizRequest {
                day_key: None,
                count: 0,
            },
            &mut rng,
        );
        assert_eq!(direct.len(), 1);
    }

    #[test]
    fn clamp_count_values() {
        assert_eq!(clamp_count(None), DEFAULT_QUESTIONS);
        assert_eq!(clamp_count(Some("abc")), DEFAULT_QUESTIONS);
        assert_eq!(clamp_count(Some("")), DEFAULT_QUESTIONS);
        assert_eq!(clamp_count(Some("12")), 12);
        assert_eq!(clamp_count(Some("0")), 1);
        assert_eq!(clamp_count(Some("-3")), 1);
        assert_eq!(clamp_count(Some("1000")), 20);
    }

    #[test]
    fn from_raw_drops_empty_day() {
        let request = QuizRequest::from_raw(Some(""), None);
        assert_eq!(request, QuizRequest::default());
    }

    #[test]
    fn distractors_exclude_correct_and_duplicates() {
        let years: Vec<i32> = (1900..1910).collect();
        let mut rng = SmallRng::seed_from_u64(13);
        for correct in [1900, 1905, 1909] {
            let picked = distractor_years(&years, correct, MAX_DISTRACTOR_ATTEMPTS, &mut rng);
            assert_eq!(picked.len(), DISTRACTOR_COUNT);
            assert!(!picked.contains(&correct));
            let mut unique = picked.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), DISTRACTOR_COUNT);
        }
    }

    #[test]
    fn distractor_budget_is_shared() {
        let years: Vec<i32> = (1..=1000).collect();
        let mut rng = SmallRng::seed_from_u64(17);
        // Two draws in total can never yield three distractors.
        let picked = distractor_years(&years, 500, 2, &mut rng);
        assert!(picked.len() <= 2);

        assert!(distractor_years(&years, 500, 0, &mut rng).is_empty());
    }

    #[test]
    fn single_year_catalog_has_no_distractors() {
        let mut rng = SmallRng::seed_from_u64(21);
        assert!(distractor_years(&[1947], 1947, MAX_DISTRACTOR_ATTEMPTS, &mut rng).is_empty());
        assert!(distractor_years(&[], 1947, MAX_DISTRACTOR_ATTEMPTS, &mut rng).is_empty());
    }

    #[test]
    fn year_only_records_are_quizzable() {
        let catalog = Catalog::from_records(vec![RawEventRecord {
            year: Some(LooseYear::from(1492)),
            title: Some("Voyage".to_owned()),
            ..RawEventRecord::default()
        }]);
        let mut rng = SmallRng::seed_from_u64(4);
        let quiz = generate_quiz(&catalog, &QuizRequest::default(), &mut rng);
        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.first().map(|q| q.options.clone()), Some(vec![1492]));
    }
}
