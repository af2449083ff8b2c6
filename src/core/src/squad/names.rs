use crate::nation::Culture;
use crate::rng::DeterministicRng;
use serde::Deserialize;
use std::collections::HashMap;

/// Name material and naming-tradition knobs for one culture. The chances are
/// fixed data, not tunables: each special case (compound surnames, single-name
/// players, nickname substitution, patronymics) fires at its own rate.
#[derive(Debug, Clone, Deserialize)]
pub struct NamePool {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    #[serde(default)]
    pub nicknames: Vec<String>,
    #[serde(default)]
    pub compound_surname_chance: f64,
    #[serde(default)]
    pub single_name_chance: f64,
    #[serde(default)]
    pub nickname_chance: f64,
    #[serde(default)]
    pub patronymic_suffix: Option<String>,
    #[serde(default)]
    pub patronymic_chance: f64,
}

impl NamePool {
    fn pick<'p>(&self, names: &'p [String], rng: &mut DeterministicRng) -> &'p str {
        let index = rng.next_int(0, names.len() as i32 - 1) as usize;
        &names[index]
    }
}

/// All culture pools, with [`Culture::Default`] as the guaranteed fallback.
#[derive(Debug, Clone)]
pub struct NameDirectory {
    pools: HashMap<Culture, NamePool>,
}

impl NameDirectory {
    pub fn new(pools: HashMap<Culture, NamePool>) -> Self {
        let directory = NameDirectory { pools };
        let fallback = directory
            .pools
            .get(&Culture::Default)
            .expect("name directory requires a default culture pool");
        assert!(
            !fallback.first_names.is_empty() && !fallback.last_names.is_empty(),
            "default name pool must not be empty"
        );
        directory
    }

    pub fn pool(&self, culture: Culture) -> &NamePool {
        self.pools
            .get(&culture)
            .unwrap_or_else(|| &self.pools[&Culture::Default])
    }

    /// Draws a display name from the culture pool. Consumes a fixed number of
    /// rolls per branch, so callers get reproducible downstream streams.
    pub fn generate(&self, culture: Culture, rng: &mut DeterministicRng) -> String {
        let pool = self.pool(culture);

        // Single-name players (common in the Brazilian pool): a nickname or a
        // bare surname stands alone.
        if pool.single_name_chance > 0.0 && rng.next_bool(pool.single_name_chance) {
            if !pool.nicknames.is_empty() {
                return pool.pick(&pool.nicknames, rng).to_string();
            }
            return pool.pick(&pool.last_names, rng).to_string();
        }

        let first = pool.pick(&pool.first_names, rng).to_string();

        let mut last = if let Some(suffix) = &pool.patronymic_suffix {
            if rng.next_bool(pool.patronymic_chance) {
                // Patronymic built from a second given name
                format!("{}{}", pool.pick(&pool.first_names, rng), suffix)
            } else {
                pool.pick(&pool.last_names, rng).to_string()
            }
        } else {
            pool.pick(&pool.last_names, rng).to_string()
        };

        if pool.compound_surname_chance > 0.0 && rng.next_bool(pool.compound_surname_chance) {
            let second = pool.pick(&pool.last_names, rng);
            if second != last {
                last = format!("{} {}", last, second);
            }
        }

        if pool.nickname_chance > 0.0
            && !pool.nicknames.is_empty()
            && rng.next_bool(pool.nickname_chance)
        {
            return pool.pick(&pool.nicknames, rng).to_string();
        }

        format!("{} {}", first, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> NameDirectory {
        let mut pools = HashMap::new();
        pools.insert(
            Culture::Default,
            NamePool {
                first_names: vec!["Alex".into(), "Sam".into(), "Chris".into()],
                last_names: vec!["Miller".into(), "Stone".into(), "Reed".into()],
                nicknames: Vec::new(),
                compound_surname_chance: 0.0,
                single_name_chance: 0.0,
                nickname_chance: 0.0,
                patronymic_suffix: None,
                patronymic_chance: 0.0,
            },
        );
        pools.insert(
            Culture::Brazilian,
            NamePool {
                first_names: vec!["Gabriel".into(), "Lucas".into()],
                last_names: vec!["Silva".into(), "Santos".into()],
                nicknames: vec!["Juninho".into(), "Careca".into()],
                compound_surname_chance: 0.0,
                single_name_chance: 1.0,
                nickname_chance: 0.0,
                patronymic_suffix: None,
                patronymic_chance: 0.0,
            },
        );
        pools.insert(
            Culture::Nordic,
            NamePool {
                first_names: vec!["Erik".into(), "Lars".into()],
                last_names: vec!["Lindqvist".into()],
                nicknames: Vec::new(),
                compound_surname_chance: 0.0,
                single_name_chance: 0.0,
                nickname_chance: 0.0,
                patronymic_suffix: Some("sson".into()),
                patronymic_chance: 1.0,
            },
        );
        NameDirectory::new(pools)
    }

    #[test]
    fn test_unknown_culture_falls_back_to_default() {
        let directory = directory();
        let mut rng = DeterministicRng::new(1);

        let name = directory.generate(Culture::EastAsian, &mut rng);

        assert!(name.contains(' '));
    }

    #[test]
    fn test_single_name_culture_yields_one_token() {
        let directory = directory();
        let mut rng = DeterministicRng::new(2);

        for _ in 0..20 {
            let name = directory.generate(Culture::Brazilian, &mut rng);
            assert!(!name.contains(' '), "expected single name, got {}", name);
        }
    }

    #[test]
    fn test_patronymic_suffix_applies() {
        let directory = directory();
        let mut rng = DeterministicRng::new(3);

        for _ in 0..20 {
            let name = directory.generate(Culture::Nordic, &mut rng);
            assert!(name.ends_with("sson"), "expected patronymic, got {}", name);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let directory = directory();
        let mut a = DeterministicRng::new(10);
        let mut b = DeterministicRng::new(10);

        for _ in 0..50 {
            assert_eq!(
                directory.generate(Culture::Default, &mut a),
                directory.generate(Culture::Default, &mut b)
            );
        }
    }
}
