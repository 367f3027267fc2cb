use std::ops::{Range, RangeInclusive};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::input::DEFAULT_SEED;
use crate::model::entity::Entity;

/// London local authorities with approximate centroids (lat, lon).
pub const LONDON_BOROUGHS: &[(&str, f64, f64)] = &[
    ("Barking and Dagenham", 51.5607, 0.1557),
    ("Barnet", 51.6252, -0.1517),
    ("Bexley", 51.4549, 0.1505),
    ("Brent", 51.5588, -0.2817),
    ("Bromley", 51.4039, 0.0198),
    ("Camden", 51.5290, -0.1255),
    ("City of London", 51.5155, -0.0922),
    ("Croydon", 51.3714, -0.0977),
    ("Ealing", 51.5130, -0.3089),
    ("Enfield", 51.6538, -0.0799),
    ("Greenwich", 51.4892, 0.0648),
    ("Hackney", 51.5450, -0.0553),
    ("Hammersmith and Fulham", 51.4927, -0.2339),
    ("Haringey", 51.6000, -0.1119),
    ("Harrow", 51.5898, -0.3346),
    ("Havering", 51.5812, 0.1837),
    ("Hillingdon", 51.5441, -0.4760),
    ("Hounslow", 51.4746, -0.3680),
    ("Islington", 51.5416, -0.1022),
    ("Kensington and Chelsea", 51.5020, -0.1947),
    ("Kingston upon Thames", 51.4085, -0.3064),
    ("Lambeth", 51.4607, -0.1163),
    ("Lewisham", 51.4452, -0.0209),
    ("Merton", 51.4014, -0.1958),
    ("Newham", 51.5077, 0.0469),
    ("Redbridge", 51.5590, 0.0741),
    ("Richmond upon Thames", 51.4479, -0.3260),
    ("Southwark", 51.5035, -0.0804),
    ("Sutton", 51.3618, -0.1945),
    ("Tower Hamlets", 51.5099, -0.0059),
    ("Waltham Forest", 51.5908, -0.0134),
    ("Wandsworth", 51.4567, -0.1910),
    ("Westminster", 51.4975, -0.1357),
];

#[derive(Debug, Clone)]
pub struct SyntheticParams {
    pub seed: u64,
    pub engagement: RangeInclusive<u32>,
    pub dwell_time: Range<f64>,
    pub personalization: Range<f64>,
    pub conversion_rate: Range<f64>,
}

impl SyntheticParams {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            engagement: 100..=1000,
            dwell_time: 30.0..300.0,
            personalization: 0.0..1.0,
            conversion_rate: 0.01..0.20,
        }
    }
}

pub fn generate_boroughs(params: &SyntheticParams) -> Vec<Entity> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    LONDON_BOROUGHS
        .iter()
        .map(|&(name, lat, lon)| {
            let engagement = rng.gen_range(params.engagement.clone()) as f64;
            let dwell_time = rng.gen_range(params.dwell_time.clone());
            let personalization = rng.gen_range(params.personalization.clone());
            let conversion_rate = rng.gen_range(params.conversion_rate.clone());
            Entity::new(
                name,
                engagement,
                dwell_time,
                personalization,
                conversion_rate,
            )
            .with_location(lat, lon)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/synthetic.rs"]
mod tests;
