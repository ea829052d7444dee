//! Keyword opportunity scoring and ranking

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Position that earns the full gain factor
pub const PEAK_POSITION: f64 = 8.0;
/// Width of the gain curve on the better-ranked side of the peak
const LEADING_SPREAD: f64 = 3.0;
/// Width of the gain curve on the deeper side of the peak
const TRAILING_SPREAD: f64 = 7.0;

/// Current ranking data for a keyword
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeywordStats {
    /// Search result position, 1 is the top
    pub current_position: u32,
    /// Monthly searches
    pub search_volume: u64,
    /// Ranking difficulty from 0 to 100
    pub difficulty: f64,
}

impl KeywordStats {
    pub fn new(current_position: u32, search_volume: u64, difficulty: f64) -> Self {
        Self {
            current_position,
            search_volume,
            difficulty,
        }
    }

    fn validate(&self, keyword: &str) -> Result<()> {
        if self.current_position == 0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Position for '{}' must be at least 1",
                keyword
            )));
        }
        if !(0.0..=100.0).contains(&self.difficulty) {
            return Err(ForecastError::InvalidParameter(format!(
                "Difficulty for '{}' must be between 0 and 100, got {}",
                keyword, self.difficulty
            )));
        }
        Ok(())
    }
}

/// A scored keyword
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    keyword: String,
    current_position: u32,
    search_volume: u64,
    difficulty: f64,
    potential_score: f64,
}

impl Opportunity {
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn current_position(&self) -> u32 {
        self.current_position
    }

    pub fn search_volume(&self) -> u64 {
        self.search_volume
    }

    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    /// Score from 0 to 100
    pub fn potential_score(&self) -> f64 {
        self.potential_score
    }

    /// Display order: score descending, then position ascending, then volume descending
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .potential_score
            .total_cmp(&self.potential_score)
            .then_with(|| self.current_position.cmp(&other.current_position))
            .then_with(|| other.search_volume.cmp(&self.search_volume))
            .then_with(|| self.keyword.cmp(&other.keyword))
    }
}

/// Weight for moving up from `position`
///
/// An asymmetric Gaussian bump equal to 1.0 at position 8. It rises from the
/// top result to the peak and falls off more slowly past it, so positions 4
/// to 15 all weigh more than the top three.
pub fn position_gain_factor(position: u32) -> f64 {
    let distance = position as f64 - PEAK_POSITION;
    let spread = if distance < 0.0 {
        LEADING_SPREAD
    } else {
        TRAILING_SPREAD
    };
    (-(distance * distance) / (2.0 * spread * spread)).exp()
}

/// Opportunities in rank order
///
/// Can be iterated any number of times; every pass yields the same order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct RankedOpportunities {
    items: Vec<Opportunity>,
}

impl RankedOpportunities {
    pub fn iter(&self) -> std::slice::Iter<'_, Opportunity> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Opportunity] {
        &self.items
    }

    /// The `n` best opportunities
    pub fn top(&self, n: usize) -> &[Opportunity] {
        &self.items[..n.min(self.items.len())]
    }
}

impl<'a> IntoIterator for &'a RankedOpportunities {
    type Item = &'a Opportunity;
    type IntoIter = std::slice::Iter<'a, Opportunity>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for RankedOpportunities {
    type Item = Opportunity;
    type IntoIter = std::vec::IntoIter<Opportunity>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Score and rank keywords
///
/// `potential = clamp(0, 100, 100 * volume / max_volume * (1 - difficulty / 100) * gain(position))`
pub fn rank_opportunities<K, I>(keyword_stats: I) -> Result<RankedOpportunities>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, KeywordStats)>,
{
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for (keyword, stats) in keyword_stats {
        let keyword = keyword.into();
        stats.validate(&keyword)?;
        if !seen.insert(keyword.clone()) {
            return Err(ForecastError::InvalidParameter(format!(
                "Duplicate keyword '{}'",
                keyword
            )));
        }
        entries.push((keyword, stats));
    }

    let max_volume = entries
        .iter()
        .map(|(_, stats)| stats.search_volume)
        .max()
        .unwrap_or(0);

    let mut items: Vec<Opportunity> = entries
        .into_iter()
        .map(|(keyword, stats)| {
            let volume_share = if max_volume > 0 {
                stats.search_volume as f64 / max_volume as f64
            } else {
                0.0
            };
            let score = 100.0
                * volume_share
                * (1.0 - stats.difficulty / 100.0)
                * position_gain_factor(stats.current_position);

            Opportunity {
                keyword,
                current_position: stats.current_position,
                search_volume: stats.search_volume,
                difficulty: stats.difficulty,
                potential_score: score.clamp(0.0, 100.0),
            }
        })
        .collect();

    items.sort_by(Opportunity::rank_cmp);
    debug!(keywords = items.len(), "ranked opportunities");

    Ok(RankedOpportunities { items })
}
