//! Random movie discovery
//!
//! Each strategy turns into a randomized /discover/movie (or trending) request plus a sampling
//! policy applied after the fetch: shuffle the page, keep the first N.

use std::ops::RangeInclusive;

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::services::fetcher::{DiscoverParams, SearchCriteria};

const POPULARITY_DESC: &str = "popularity.desc";
const EARLIEST_DISCOVERY_YEAR: i32 = 1990;

/// TMDB movie genre ids
pub const GENRES: [u32; 19] = [
    28,    // Action
    12,    // Adventure
    16,    // Animation
    35,    // Comedy
    80,    // Crime
    99,    // Documentary
    18,    // Drama
    10751, // Family
    14,    // Fantasy
    36,    // History
    27,    // Horror
    10402, // Music
    9648,  // Mystery
    10749, // Romance
    878,   // Science Fiction
    10770, // TV Movie
    53,    // Thriller
    10752, // War
    37,    // Western
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryStrategy {
    /// Any well-rated popular movie
    Popular,
    /// Popular movies in one random genre
    Genre,
    /// Popular movies from one random release year
    Year,
    /// One of the three above, picked at random
    Surprise,
}

impl DiscoveryStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryStrategy::Popular => "popular",
            DiscoveryStrategy::Genre => "genre",
            DiscoveryStrategy::Year => "year",
            DiscoveryStrategy::Surprise => "surprise",
        }
    }

    /// Resolves `Surprise` to a concrete strategy; others return themselves
    pub fn resolve<R: Rng>(self, rng: &mut R) -> DiscoveryStrategy {
        match self {
            DiscoveryStrategy::Surprise => match rng.random_range(0..3) {
                0 => DiscoveryStrategy::Popular,
                1 => DiscoveryStrategy::Genre,
                _ => DiscoveryStrategy::Year,
            },
            other => other,
        }
    }

    /// Builds a randomized request for this strategy
    pub fn plan<R: Rng>(self, rng: &mut R, current_year: i32) -> DiscoveryPlan {
        match self.resolve(rng) {
            DiscoveryStrategy::Popular => DiscoveryPlan {
                strategy: DiscoveryStrategy::Popular,
                criteria: SearchCriteria::Discover(DiscoverParams {
                    page: rng.random_range(1..=500),
                    sort_by: POPULARITY_DESC.to_string(),
                    min_vote_count: 100,
                    min_vote_average: Some(6.0),
                    genre: None,
                    year: None,
                }),
                sample: SampleSize::Between(6, 12),
            },
            DiscoveryStrategy::Genre => DiscoveryPlan {
                strategy: DiscoveryStrategy::Genre,
                criteria: SearchCriteria::Discover(DiscoverParams {
                    page: rng.random_range(1..=50),
                    sort_by: POPULARITY_DESC.to_string(),
                    min_vote_count: 50,
                    min_vote_average: Some(5.5),
                    genre: Some(GENRES[rng.random_range(0..GENRES.len())]),
                    year: None,
                }),
                sample: SampleSize::Fixed(8),
            },
            DiscoveryStrategy::Year | DiscoveryStrategy::Surprise => DiscoveryPlan {
                strategy: DiscoveryStrategy::Year,
                criteria: SearchCriteria::Discover(DiscoverParams {
                    page: rng.random_range(1..=20),
                    sort_by: POPULARITY_DESC.to_string(),
                    min_vote_count: 100,
                    min_vote_average: None,
                    genre: None,
                    year: Some(rng.random_range(discovery_years(current_year))),
                }),
                sample: SampleSize::Fixed(10),
            },
        }
    }
}

fn discovery_years(current_year: i32) -> RangeInclusive<i32> {
    EARLIEST_DISCOVERY_YEAR..=current_year.max(EARLIEST_DISCOVERY_YEAR)
}

/// Weekly trending, shuffled down to a fixed sample
pub fn trending_plan() -> (SearchCriteria, SampleSize) {
    (SearchCriteria::Trending, SampleSize::Fixed(8))
}

/// A concrete, randomized request ready to hand to the fetcher
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryPlan {
    /// Concrete strategy (never `Surprise`)
    pub strategy: DiscoveryStrategy,
    pub criteria: SearchCriteria,
    pub sample: SampleSize,
}

/// How many records survive post-fetch sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSize {
    Fixed(usize),
    /// Uniform in `min..=max`
    Between(usize, usize),
}

impl SampleSize {
    pub fn pick<R: Rng>(self, rng: &mut R) -> usize {
        match self {
            SampleSize::Fixed(n) => n,
            SampleSize::Between(min, max) if min < max => rng.random_range(min..=max),
            SampleSize::Between(min, _) => min,
        }
    }
}

/// Shuffles `records` and keeps up to `sample` of them
pub fn sample<T, R: Rng>(mut records: Vec<T>, sample: SampleSize, rng: &mut R) -> Vec<T> {
    let size = sample.pick(rng);
    records.shuffle(rng);
    records.truncate(size);
    records
}
