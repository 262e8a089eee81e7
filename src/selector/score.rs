//! Candidate resource scoring.
//!
//! Four signals per candidate: topical match against the skill and its
//! neighbors, difficulty fit against the learner's confidence, catalog
//! quality, and price. Each is z-score standardized across the skill's
//! candidate set before entering the selection objective, so no signal
//! dominates purely by scale.

use strsim::jaro_winkler;

use crate::models::CatalogResource;

/// Bonus for the skill name appearing verbatim in the title.
pub const EXACT_TITLE_BONUS: f64 = 2.0;
/// Bonus for a fuzzy near-match of the skill name in the title.
pub const FUZZY_TITLE_BONUS: f64 = 1.0;
/// Bonus per co-module skill present in title + description.
pub const RELATED_SKILL_BONUS: f64 = 0.5;
/// Bonus per prerequisite skill present in title + description.
pub const PREREQ_SKILL_BONUS: f64 = 0.5;
/// Certificate adjustment magnitude.
const CERTIFICATE_ADJUSTMENT: f64 = 2.0;
/// Confidence at which a certificate flips from penalty to bonus.
const CERTIFICATE_CONFIDENCE: f64 = 0.6;

/// Whether `phrase` appears in `text`, exactly or as a fuzzy near-match.
///
/// Exact: case-insensitive substring. Fuzzy: Jaro-Winkler similarity of
/// `phrase` against same-length word windows of `text` at or above
/// `threshold`.
pub fn text_match(text: &str, phrase: &str, threshold: f64) -> Option<bool> {
    let text = text.to_lowercase();
    let phrase = phrase.to_lowercase();
    if phrase.is_empty() {
        return None;
    }
    if text.contains(&phrase) {
        return Some(true);
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let span = phrase.split_whitespace().count().max(1);
    for window in words.windows(span) {
        if jaro_winkler(&window.join(" "), &phrase) >= threshold {
            return Some(false);
        }
    }
    None
}

/// Topical match score for one candidate.
///
/// Title hits on the skill itself weigh most; each co-module or
/// prerequisite skill found in the title or description adds a smaller
/// increment.
pub fn match_score(
    resource: &CatalogResource,
    skill: &str,
    co_module_skills: &[String],
    prerequisite_skills: &[String],
    fuzzy_threshold: f64,
) -> f64 {
    let mut score = match text_match(&resource.title, skill, fuzzy_threshold) {
        Some(true) => EXACT_TITLE_BONUS,
        Some(false) => FUZZY_TITLE_BONUS,
        None => 0.0,
    };

    let haystack = format!("{} {}", resource.title, resource.description);
    for other in co_module_skills {
        if text_match(&haystack, other, fuzzy_threshold).is_some() {
            score += RELATED_SKILL_BONUS;
        }
    }
    for prereq in prerequisite_skills {
        if text_match(&haystack, prereq, fuzzy_threshold).is_some() {
            score += PREREQ_SKILL_BONUS;
        }
    }

    score
}

/// Ideal resource difficulty for a confidence level.
///
/// Step function: near-zero confidence wants pre-beginner material,
/// expert confidence wants advanced material.
pub fn ideal_difficulty(confidence: f64) -> f64 {
    if confidence < 0.2 {
        0.0
    } else if confidence < 0.4 {
        1.0
    } else if confidence < 0.6 {
        1.5
    } else if confidence < 0.8 {
        2.0
    } else {
        3.0
    }
}

/// Difficulty-fit score: penalty proportional to the gap between the
/// resource's stated level and the ideal, plus a certificate adjustment
/// (bonus for confident learners, penalty otherwise).
pub fn difficulty_score(resource: &CatalogResource, confidence: f64) -> f64 {
    let mut score = -(resource.difficulty.level() - ideal_difficulty(confidence)).abs();
    if resource.certificate {
        if confidence >= CERTIFICATE_CONFIDENCE {
            score += CERTIFICATE_ADJUSTMENT;
        } else {
            score -= CERTIFICATE_ADJUSTMENT;
        }
    }
    score
}

/// Z-score standardization across a candidate set.
///
/// Degenerate sets (constant signal, or fewer than two values) map to
/// all zeros rather than dividing by a zero deviation.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return vec![0.0; values.len()];
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev < 1e-12 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - mean) / std_dev).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    #[test]
    fn test_text_match_exact() {
        assert_eq!(text_match("Learn SQL fast", "sql", 0.8), Some(true));
        assert_eq!(text_match("Advanced Python Patterns", "python", 0.8), Some(true));
    }

    #[test]
    fn test_text_match_fuzzy() {
        // Typo-distance near-match, not a substring.
        assert_eq!(text_match("kubernets in practice", "kubernetes", 0.8), Some(false));
    }

    #[test]
    fn test_text_match_miss() {
        assert_eq!(text_match("Watercolor painting", "sql", 0.8), None);
    }

    #[test]
    fn test_text_match_multiword_phrase() {
        assert_eq!(
            text_match("intro to machine learning models", "machine learning", 0.8),
            Some(true)
        );
    }

    #[test]
    fn test_match_score_exact_beats_fuzzy() {
        let exact = CatalogResource::new("sql", "SQL Bootcamp", 10.0);
        let fuzzy = CatalogResource::new("sql", "SQI Bootcamp", 10.0);
        let miss = CatalogResource::new("sql", "Cooking Basics", 10.0);

        let s_exact = match_score(&exact, "sql", &[], &[], 0.8);
        let s_fuzzy = match_score(&fuzzy, "sql", &[], &[], 0.8);
        let s_miss = match_score(&miss, "sql", &[], &[], 0.8);
        assert!(s_exact > s_fuzzy);
        assert!(s_fuzzy > s_miss);
        assert!((s_miss - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_match_score_related_skills() {
        let r = CatalogResource::new("sql", "SQL for Python developers", 10.0)
            .with_description("covers pandas pipelines");
        let base = match_score(&r, "sql", &[], &[], 0.8);
        let with_related = match_score(
            &r,
            "sql",
            &["python".into()],
            &["pandas".into()],
            0.8,
        );
        assert!((with_related - base - RELATED_SKILL_BONUS - PREREQ_SKILL_BONUS).abs() < 1e-10);
    }

    #[test]
    fn test_ideal_difficulty_steps() {
        assert!((ideal_difficulty(0.0) - 0.0).abs() < 1e-10);
        assert!((ideal_difficulty(0.3) - 1.0).abs() < 1e-10);
        assert!((ideal_difficulty(0.5) - 1.5).abs() < 1e-10);
        assert!((ideal_difficulty(0.7) - 2.0).abs() < 1e-10);
        assert!((ideal_difficulty(0.9) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_difficulty_score_prefers_matching_level() {
        let beginner = CatalogResource::new("sql", "a", 1.0).with_difficulty(Difficulty::Beginner);
        let advanced = CatalogResource::new("sql", "b", 1.0).with_difficulty(Difficulty::Advanced);
        // Low-confidence learner: beginner fits better.
        assert!(difficulty_score(&beginner, 0.25) > difficulty_score(&advanced, 0.25));
        // High-confidence learner: advanced fits better.
        assert!(difficulty_score(&advanced, 0.9) > difficulty_score(&beginner, 0.9));
    }

    #[test]
    fn test_certificate_adjustment() {
        let plain = CatalogResource::new("sql", "a", 1.0).with_difficulty(Difficulty::Advanced);
        let cert = plain.clone().with_certificate(true);
        assert!(difficulty_score(&cert, 0.9) > difficulty_score(&plain, 0.9));
        assert!(difficulty_score(&cert, 0.1) < difficulty_score(&plain, 0.1));
    }

    #[test]
    fn test_standardize() {
        let z = standardize(&[1.0, 2.0, 3.0]);
        assert!((z[1] - 0.0).abs() < 1e-10);
        assert!((z.iter().sum::<f64>() - 0.0).abs() < 1e-10);
        assert!(z[0] < 0.0 && z[2] > 0.0);
    }

    #[test]
    fn test_standardize_degenerate() {
        assert_eq!(standardize(&[5.0, 5.0, 5.0]), vec![0.0, 0.0, 0.0]);
        assert_eq!(standardize(&[5.0]), vec![0.0]);
        assert!(standardize(&[]).is_empty());
    }
}
