// SYNOID Shorts Theme Catalog
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::config::PromptVoice;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ThemeError {
    #[error("theme catalog has no pools")]
    Empty,
    #[error("theme pool '{0}' has no themes")]
    EmptyPool(String),
    #[error("theme pool weights are invalid: {0}")]
    Weights(String),
}

/// Topic chosen for one run. Only shapes the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub category: String,
}

impl Theme {
    pub fn new(name: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThemePool {
    pub category: String,
    /// Relative weight against the other pools.
    pub weight: f64,
    pub themes: Vec<String>,
}

impl ThemePool {
    pub fn new(category: &str, weight: f64, themes: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            weight,
            themes: themes.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Weighted set of theme pools.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    pools: Vec<ThemePool>,
    index: WeightedIndex<f64>,
}

impl ThemeCatalog {
    pub fn new(pools: Vec<ThemePool>) -> Result<Self, ThemeError> {
        if pools.is_empty() {
            return Err(ThemeError::Empty);
        }
        if let Some(pool) = pools.iter().find(|p| p.themes.is_empty()) {
            return Err(ThemeError::EmptyPool(pool.category.clone()));
        }
        let index = WeightedIndex::new(pools.iter().map(|p| p.weight))
            .map_err(|e| ThemeError::Weights(e.to_string()))?;
        Ok(Self { pools, index })
    }

    /// Catalog with one pool; every theme is equally likely.
    pub fn single(category: &str, themes: &[&str]) -> Result<Self, ThemeError> {
        Self::new(vec![ThemePool::new(category, 1.0, themes)])
    }

    /// 70% wealth and success, 30% dark truths and psychology.
    pub fn standard() -> Self {
        let pools = vec![
            ThemePool::new(
                "WEALTH",
                0.70,
                &[
                    "Escaping the 9-5 Matrix",
                    "Salary is a Trap",
                    "Poor vs Rich Mindset",
                    "Assets vs Liabilities",
                    "Inflation Steals Your Money",
                    "The Rule of the 1%",
                    "Why You Are Still Broke",
                    "Business vs Job",
                    "Financial Discipline",
                ],
            ),
            ThemePool::new(
                "TRUTH",
                0.30,
                &[
                    "Dark Psychology of Power",
                    "Why Being Nice Fails",
                    "Trust Nobody",
                    "Cold Stoicism",
                    "Female Nature (Red Pill)",
                    "Loneliness of Success",
                    "Control Your Emotions",
                ],
            ),
        ];
        Self::new(pools).unwrap_or_else(|e| unreachable!("standard theme catalog is valid: {}", e))
    }

    /// Single MINDSET pool used with the stoic voice.
    pub fn mindset() -> Self {
        Self::single(
            "MINDSET",
            &[
                "Discipline",
                "Silence is Power",
                "Nobody is Coming to Save You",
                "Pain Builds Character",
                "Control Your Emotions",
                "Memento Mori",
                "Focus on What You Control",
            ],
        )
        .unwrap_or_else(|e| unreachable!("mindset theme catalog is valid: {}", e))
    }

    pub fn for_voice(voice: PromptVoice) -> Self {
        match voice {
            PromptVoice::RuthlessMentor => Self::standard(),
            PromptVoice::StoicMentor => Self::mindset(),
        }
    }

    pub fn pools(&self) -> &[ThemePool] {
        &self.pools
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Theme {
        let pool = &self.pools[self.index.sample(rng)];
        let name = &pool.themes[rng.gen_range(0..pool.themes.len())];
        Theme::new(name, &pool.category)
    }

    /// Resolve a user-supplied theme name, keeping the category when it
    /// belongs to a pool.
    pub fn resolve(&self, name: &str) -> Theme {
        self.pools
            .iter()
            .find(|p| p.themes.iter().any(|t| t.eq_ignore_ascii_case(name)))
            .map(|p| Theme::new(name, &p.category))
            .unwrap_or_else(|| Theme::new(name, "CUSTOM"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_comes_from_declared_pool() {
        let catalog = ThemeCatalog::standard();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let theme = catalog.pick(&mut rng);
            let pool = catalog
                .pools()
                .iter()
                .find(|p| p.category == theme.category)
                .expect("category exists");
            assert!(pool.themes.contains(&theme.name));
        }
    }

    #[test]
    fn test_weights_bias_selection() {
        let catalog = ThemeCatalog::standard();
        let mut rng = StdRng::seed_from_u64(42);
        let wealth = (0..2000)
            .filter(|_| catalog.pick(&mut rng).category == "WEALTH")
            .count();
        // 70% expected; generous band for a seeded sample.
        assert!((1250..=1550).contains(&wealth), "wealth picks: {}", wealth);
    }

    #[test]
    fn test_zero_weight_pool_never_chosen() {
        let catalog = ThemeCatalog::new(vec![
            ThemePool::new("A", 1.0, &["only"]),
            ThemePool::new("B", 0.0, &["never"]),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(catalog.pick(&mut rng), Theme::new("only", "A"));
        }
    }

    #[test]
    fn test_voice_selects_catalog() {
        let stoic = ThemeCatalog::for_voice(PromptVoice::StoicMentor);
        assert_eq!(stoic.pools().len(), 1);
        assert_eq!(stoic.pools()[0].category, "MINDSET");
        assert_eq!(ThemeCatalog::for_voice(PromptVoice::RuthlessMentor).pools().len(), 2);
    }

    #[test]
    fn test_single_pool_variant() {
        let catalog = ThemeCatalog::single("MINDSET", &["Discipline", "Focus"]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(catalog.pick(&mut rng).category, "MINDSET");
    }

    #[test]
    fn test_invalid_catalogs_rejected() {
        assert_eq!(ThemeCatalog::new(vec![]).unwrap_err(), ThemeError::Empty);
        assert_eq!(
            ThemeCatalog::new(vec![ThemePool::new("X", 1.0, &[])]).unwrap_err(),
            ThemeError::EmptyPool("X".to_string())
        );
        assert!(matches!(
            ThemeCatalog::new(vec![ThemePool::new("X", 0.0, &["a"])]),
            Err(ThemeError::Weights(_))
        ));
    }

    #[test]
    fn test_resolve_known_and_custom() {
        let catalog = ThemeCatalog::standard();
        assert_eq!(catalog.resolve("Trust Nobody").category, "TRUTH");
        assert_eq!(catalog.resolve("Discipline").category, "CUSTOM");
    }
}
