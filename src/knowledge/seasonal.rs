/// Season buckets for illness selection, keyed by visit month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }

    /// Weighted illness pool for the season.
    pub fn illness_pool(self) -> &'static [(&'static str, u32)] {
        match self {
            Season::Winter => WINTER_POOL,
            Season::Spring => SPRING_POOL,
            Season::Summer => SUMMER_POOL,
            Season::Fall => FALL_POOL,
        }
    }
}

static WINTER_POOL: &[(&str, u32)] = &[
    ("Influenza", 25),
    ("Upper Respiratory Infection", 20),
    ("Acute Otitis Media", 15),
    ("Bronchiolitis", 12),
    ("Viral Syndrome", 10),
    ("Croup", 8),
    ("Strep Pharyngitis", 6),
    ("Viral Gastroenteritis", 4),
];

static SPRING_POOL: &[(&str, u32)] = &[
    ("Upper Respiratory Infection", 22),
    ("Seasonal Allergies", 20),
    ("Viral Syndrome", 15),
    ("Acute Otitis Media", 12),
    ("Conjunctivitis", 10),
    ("Strep Pharyngitis", 10),
    ("Fever", 6),
    ("Viral Gastroenteritis", 5),
];

static SUMMER_POOL: &[(&str, u32)] = &[
    ("Swimmer's Ear", 20),
    ("Insect Bite Reaction", 18),
    ("Viral Gastroenteritis", 15),
    ("Rash", 13),
    ("Viral Syndrome", 12),
    ("Hand Foot Mouth Disease", 12),
    ("Fever", 10),
];

static FALL_POOL: &[(&str, u32)] = &[
    ("Upper Respiratory Infection", 25),
    ("Viral Syndrome", 18),
    ("Croup", 14),
    ("Acute Otitis Media", 14),
    ("Strep Pharyngitis", 10),
    ("Seasonal Allergies", 10),
    ("Fever", 9),
];

/// Pool for infants too young for everything in the seasonal pools.
pub static INFANT_ILLNESS_POOL: &[(&str, u32)] = &[
    ("Viral Syndrome", 30),
    ("Upper Respiratory Infection", 25),
    ("Bronchiolitis", 25),
    ("Fever", 15),
    ("Viral Gastroenteritis", 5),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_map_to_seasons() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(4), Season::Spring);
        assert_eq!(Season::from_month(7), Season::Summer);
        assert_eq!(Season::from_month(10), Season::Fall);
    }

    #[test]
    fn every_pool_has_weighted_entries() {
        for season in [Season::Winter, Season::Spring, Season::Summer, Season::Fall] {
            let pool = season.illness_pool();
            assert!(!pool.is_empty());
            assert!(pool.iter().all(|(_, w)| *w > 0));
        }
        assert!(!INFANT_ILLNESS_POOL.is_empty());
    }

    #[test]
    fn winter_is_respiratory_heavy() {
        let pool = Season::Winter.illness_pool();
        assert!(pool.iter().any(|(name, _)| *name == "Influenza"));
        assert!(pool.iter().any(|(name, _)| *name == "Bronchiolitis"));
    }
}
