//! Investment score (0-10) and the verdict tier shown on plot cards.
//!
//! The score blends return potential with planning progress and adds a small
//! capped bonus for nearby amenities. The verdict reads the score either on
//! an absolute scale or, once enough peers exist, against the peer median.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rates::ZoningStage;
use crate::types::{round_pct, Percent};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const ROI_WEIGHT: Decimal = dec!(0.6);
const ZONING_WEIGHT: Decimal = dec!(0.4);
/// ROI percentage worth one score point.
const ROI_PER_POINT: Decimal = dec!(30);
const MAX_SCORE: Decimal = dec!(10);
const MAX_PROXIMITY_BONUS: Decimal = dec!(1.0);

/// Peers needed before the verdict switches to the relative scale.
pub const MIN_PEERS_FOR_RELATIVE: usize = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Distances in metres to amenities that lift residential demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proximity {
    pub sea_distance_m: Option<Decimal>,
    pub park_distance_m: Option<Decimal>,
    pub hospital_distance_m: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    /// Gross ROI at the target stage
    pub roi_pct: Percent,
    pub zoning_stage: ZoningStage,
    #[serde(default)]
    pub proximity: Proximity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictTier {
    Hot,
    Excellent,
    Good,
    Fair,
    Poor,
}

impl VerdictTier {
    pub fn label(self) -> &'static str {
        match self {
            VerdictTier::Hot => "Hot deal",
            VerdictTier::Excellent => "Excellent",
            VerdictTier::Good => "Good",
            VerdictTier::Fair => "Fair",
            VerdictTier::Poor => "Poor",
        }
    }
}

impl fmt::Display for VerdictTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentVerdict {
    pub tier: VerdictTier,
    pub label: String,
    pub description: String,
    pub score: Decimal,
    /// Set when the verdict was relative to peers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_median: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// 0.6 x ROI component + 0.4 x zoning component + proximity bonus, on 0-10.
pub fn calc_investment_score(input: &ScoreInput) -> Decimal {
    let roi_component = clamp_score(input.roi_pct / ROI_PER_POINT);
    let zoning_component = input.zoning_stage.progress() * MAX_SCORE;
    let base = ROI_WEIGHT * roi_component + ZONING_WEIGHT * zoning_component;

    round_pct(clamp_score(base + proximity_bonus(&input.proximity)))
}

fn proximity_bonus(p: &Proximity) -> Decimal {
    let sea = tiered_bonus(p.sea_distance_m, [(dec!(1000), dec!(0.5)), (dec!(3000), dec!(0.25))]);
    let park = tiered_bonus(p.park_distance_m, [(dec!(500), dec!(0.3)), (dec!(1500), dec!(0.15))]);
    let hospital = tiered_bonus(
        p.hospital_distance_m,
        [(dec!(3000), dec!(0.3)), (dec!(8000), dec!(0.15))],
    );
    (sea + park + hospital).min(MAX_PROXIMITY_BONUS)
}

/// First tier whose distance bound is met; negative distances count as unknown.
fn tiered_bonus(distance: Option<Decimal>, tiers: [(Decimal, Decimal); 2]) -> Decimal {
    match distance {
        Some(d) if d >= Decimal::ZERO => tiers
            .iter()
            .find(|(bound, _)| d <= *bound)
            .map(|(_, bonus)| *bonus)
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn clamp_score(v: Decimal) -> Decimal {
    v.max(Decimal::ZERO).min(MAX_SCORE)
}

/// Letter grade for a score.
pub fn score_label(score: Decimal) -> &'static str {
    if score >= dec!(9) {
        "A+"
    } else if score >= dec!(8) {
        "A"
    } else if score >= dec!(7) {
        "B+"
    } else if score >= dec!(6) {
        "B"
    } else if score >= dec!(5) {
        "C+"
    } else if score >= dec!(4) {
        "C"
    } else {
        "D"
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Verdict tier for `score`.
///
/// With fewer than [`MIN_PEERS_FOR_RELATIVE`] peer scores the tier comes from
/// absolute cutoffs; otherwise from the distance to the peer median. Peer
/// order does not matter.
pub fn investment_verdict(score: Decimal, peer_scores: &[Decimal]) -> InvestmentVerdict {
    if peer_scores.len() < MIN_PEERS_FOR_RELATIVE {
        let tier = if score >= dec!(8.5) {
            VerdictTier::Hot
        } else if score >= dec!(7) {
            VerdictTier::Excellent
        } else if score >= dec!(5.5) {
            VerdictTier::Good
        } else if score >= dec!(4) {
            VerdictTier::Fair
        } else {
            VerdictTier::Poor
        };
        return InvestmentVerdict {
            tier,
            label: tier.label().to_string(),
            description: absolute_description(tier).to_string(),
            score,
            peer_median: None,
        };
    }

    let peer_median = median(peer_scores);
    let delta = score - peer_median;
    let tier = if delta >= dec!(2.5) {
        VerdictTier::Hot
    } else if delta >= dec!(1.25) {
        VerdictTier::Excellent
    } else if delta >= Decimal::ZERO {
        VerdictTier::Good
    } else if delta >= dec!(-1.25) {
        VerdictTier::Fair
    } else {
        VerdictTier::Poor
    };

    InvestmentVerdict {
        tier,
        label: tier.label().to_string(),
        description: format!(
            "Score {score} vs. peer median {} ({:+} points)",
            round_pct(peer_median),
            round_pct(delta)
        ),
        score,
        peer_median: Some(peer_median),
    }
}

fn absolute_description(tier: VerdictTier) -> &'static str {
    match tier {
        VerdictTier::Hot => "Exceptional return and planning profile",
        VerdictTier::Excellent => "Strong return with solid planning progress",
        VerdictTier::Good => "Reasonable opportunity",
        VerdictTier::Fair => "Marginal; returns depend on rezoning going to plan",
        VerdictTier::Poor => "Weak return for the planning risk",
    }
}

pub(crate) fn median(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let mut sorted = values.to_vec();
    sorted.sort();
    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        (sorted[mid - 1] + sorted[mid]) / dec!(2)
    } else {
        sorted[mid]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
