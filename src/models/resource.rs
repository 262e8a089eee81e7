//! Learning resource model.
//!
//! A catalog resource is one learning item (course, tutorial, project)
//! tagged with the skill it teaches. The catalog is read-only reference
//! data; the engine never mutates it, only selects from it.

use serde::{Deserialize, Serialize};

/// Stated difficulty of a learning resource.
///
/// Catalog vocabulary follows the scraped sources: Beginner,
/// Intermediate, Advanced, or Mixed (spans several levels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    /// Covers multiple levels; sits between beginner and intermediate
    /// for fit purposes.
    Mixed,
}

impl Difficulty {
    /// Ordinal level used for difficulty-fit scoring.
    pub fn level(self) -> f64 {
        match self {
            Difficulty::Beginner => 1.0,
            Difficulty::Mixed => 1.5,
            Difficulty::Intermediate => 2.0,
            Difficulty::Advanced => 3.0,
        }
    }
}

/// A catalog entry for one learning resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResource {
    /// Skill tag (matched case-insensitively against skill names).
    pub skill: String,
    /// Resource title.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Link to the resource.
    pub url: String,
    /// Optional preview image.
    pub thumbnail_url: Option<String>,
    /// Content length in hours (> 0).
    pub duration_hours: f64,
    /// Price in the catalog's currency (>= 0; 0 = free).
    pub price: f64,
    /// Review-derived quality signal in [0, 1] (Wilson score or similar).
    pub quality: f64,
    /// Stated difficulty level.
    pub difficulty: Difficulty,
    /// Whether completing the resource yields a certificate.
    pub certificate: bool,
}

impl CatalogResource {
    /// Creates a resource with the given skill tag, title, and duration.
    pub fn new(skill: impl Into<String>, title: impl Into<String>, duration_hours: f64) -> Self {
        Self {
            skill: skill.into(),
            title: title.into(),
            description: String::new(),
            url: String::new(),
            thumbnail_url: None,
            duration_hours,
            price: 0.0,
            quality: 0.0,
            difficulty: Difficulty::Mixed,
            certificate: false,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the resource link.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the preview image link.
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// Sets the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Sets the quality signal (clamped to [0, 1]).
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality.clamp(0.0, 1.0);
        self
    }

    /// Sets the difficulty level.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Marks the resource as certificate-bearing.
    pub fn with_certificate(mut self, certificate: bool) -> Self {
        self.certificate = certificate;
        self
    }

    /// Whether the resource is tagged with the given skill
    /// (case-insensitive exact match).
    pub fn matches_skill(&self, skill: &str) -> bool {
        self.skill.eq_ignore_ascii_case(skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_builder() {
        let r = CatalogResource::new("sql", "SQL for Data Analysis", 12.0)
            .with_description("Joins, window functions, query tuning")
            .with_url("https://example.com/sql")
            .with_thumbnail("https://example.com/sql.png")
            .with_price(29.99)
            .with_quality(0.87)
            .with_difficulty(Difficulty::Intermediate)
            .with_certificate(true);

        assert_eq!(r.skill, "sql");
        assert!((r.duration_hours - 12.0).abs() < 1e-10);
        assert!((r.quality - 0.87).abs() < 1e-10);
        assert_eq!(r.difficulty, Difficulty::Intermediate);
        assert!(r.certificate);
        assert_eq!(
            r.thumbnail_url.as_deref(),
            Some("https://example.com/sql.png")
        );
    }

    #[test]
    fn test_matches_skill_case_insensitive() {
        let r = CatalogResource::new("Python", "Intro", 5.0);
        assert!(r.matches_skill("python"));
        assert!(r.matches_skill("PYTHON"));
        assert!(!r.matches_skill("sql"));
    }

    #[test]
    fn test_difficulty_levels_ordered() {
        assert!(Difficulty::Beginner.level() < Difficulty::Mixed.level());
        assert!(Difficulty::Mixed.level() < Difficulty::Intermediate.level());
        assert!(Difficulty::Intermediate.level() < Difficulty::Advanced.level());
    }

    #[test]
    fn test_quality_clamped() {
        let r = CatalogResource::new("a", "t", 1.0).with_quality(1.4);
        assert!((r.quality - 1.0).abs() < 1e-10);
    }
}
