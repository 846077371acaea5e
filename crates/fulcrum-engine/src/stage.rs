//! Crisis stage assessment.
//!
//! A stateless, rule-based classifier. Stages 1-4 are evaluated
//! independently against the snapshot - not sequentially gated, since
//! inputs may be partial and a later stage can be visible while an earlier
//! one is not. Among the stages that fire, the highest wins and carries
//! its own trigger list and confidence. If nothing fires, Stage 0 counts
//! pre-crisis concerns into a risk label.
//!
//! Calling the classifier twice with the same snapshot yields an identical
//! result; there are no internal counters or timestamps.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{Stage0Config, StageTriggerConfig};
use crate::snapshot::IndicatorSnapshot;

/// Discrete crisis stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisStage {
    /// Stage 0: no stage triggers met.
    PreCrisis,
    /// Stage 1: traditional market crisis.
    TraditionalCrisis,
    /// Stage 2: policy intervention.
    Intervention,
    /// Stage 3: credibility crisis.
    CredibilityCrisis,
    /// Stage 4: monetary regime transition.
    RegimeTransition,
}

impl CrisisStage {
    /// Stage number 0-4.
    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            CrisisStage::PreCrisis => 0,
            CrisisStage::TraditionalCrisis => 1,
            CrisisStage::Intervention => 2,
            CrisisStage::CredibilityCrisis => 3,
            CrisisStage::RegimeTransition => 4,
        }
    }

    /// Human-readable stage name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CrisisStage::PreCrisis => "Pre-Crisis",
            CrisisStage::TraditionalCrisis => "Traditional Crisis",
            CrisisStage::Intervention => "Intervention",
            CrisisStage::CredibilityCrisis => "Credibility Crisis",
            CrisisStage::RegimeTransition => "Regime Transition",
        }
    }
}

impl fmt::Display for CrisisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stage {}: {}", self.number(), self.name())
    }
}

/// Stage 0 risk sub-classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No pre-crisis concerns.
    Low,
    /// One or two concerns.
    Moderate,
    /// Three or more concerns.
    Elevated,
}

/// One stage that fired, with its own triggers and confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredStage {
    /// The stage that fired.
    pub stage: CrisisStage,
    /// Which conditions fired, in evaluation order.
    pub triggers: Vec<String>,
    /// Confidence 0-100 for this stage alone.
    pub confidence: u8,
}

/// The overall assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageAssessment {
    /// The winning (highest-numbered fired) stage, or Stage 0.
    pub stage: CrisisStage,
    /// Human-readable name of the winning stage.
    pub stage_name: String,
    /// Confidence 0-100, from the winning stage alone (never blended).
    pub confidence: u8,
    /// The winning stage's triggers (for Stage 0: the concern list).
    pub triggers: Vec<String>,
    /// Every stage that fired, lowest to highest.
    pub all_triggered_stages: Vec<TriggeredStage>,
    /// Risk sub-classification, present only at Stage 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

fn confidence(base: u32, step: u32, count: usize) -> u8 {
    (base + step * count as u32).min(100) as u8
}

fn stage1(s: &IndicatorSnapshot, cfg: &StageTriggerConfig) -> Option<TriggeredStage> {
    let t = &cfg.stage1;
    let mut triggers = Vec::new();
    if let Some(vix) = s.vix.filter(|v| *v > t.vix_extreme) {
        triggers.push(format!("VIX {vix:.1} above {:.0}", t.vix_extreme));
    }
    if let Some(hy) = s.high_yield_spread_bps.filter(|v| *v > t.high_yield_spread_bps) {
        triggers.push(format!(
            "high-yield spread {hy:.0}bps above {:.0}bps",
            t.high_yield_spread_bps
        ));
    }
    if let Some(tail) = s.auction_tail_bps.filter(|v| *v > t.auction_tail_bps) {
        triggers.push(format!(
            "auction tail {tail:.1}bps above {:.0}bps",
            t.auction_tail_bps
        ));
    }
    if let Some(spread) = s.hedging_spread_bps.filter(|v| *v < t.hedging_spread_bps) {
        triggers.push(format!(
            "hedging spread {spread:.0}bps below {:.0}bps",
            t.hedging_spread_bps
        ));
    }
    if let (Some(dollar), Some(vix)) = (s.dollar_index_change_pct, s.vix) {
        if dollar < 0.0 && vix > t.dollar_weakness_vix {
            triggers.push(format!(
                "dollar weakening {dollar:.1}% with VIX {vix:.1} above {:.0}",
                t.dollar_weakness_vix
            ));
        }
    }
    fired(CrisisStage::TraditionalCrisis, triggers, t.min_triggers, 50, 10)
}

fn stage2(s: &IndicatorSnapshot, cfg: &StageTriggerConfig) -> Option<TriggeredStage> {
    let t = &cfg.stage2;
    let mut triggers = Vec::new();
    if let Some(growth) = s
        .fed_balance_sheet_change_tn
        .filter(|v| *v > t.balance_sheet_growth_tn)
    {
        triggers.push(format!(
            "Fed balance sheet grew ${growth:.1}T, above ${:.0}T",
            t.balance_sheet_growth_tn
        ));
    }
    if let Some(be) = s.inflation_breakeven_pct.filter(|v| *v > t.breakeven_pct) {
        triggers.push(format!(
            "inflation breakeven {be:.1}% above {:.0}%",
            t.breakeven_pct
        ));
    }
    if let Some(dollar) = s
        .dollar_index_change_pct
        .filter(|v| *v < -t.dollar_decline_pct)
    {
        triggers.push(format!(
            "dollar down {:.1}%, beyond {:.0}%",
            -dollar, t.dollar_decline_pct
        ));
    }
    if let Some(gold) = s.gold_change_pct.filter(|v| *v > t.gold_surge_pct) {
        triggers.push(format!("gold up {gold:.1}%, above {:.0}%", t.gold_surge_pct));
    }
    fired(CrisisStage::Intervention, triggers, t.min_triggers, 50, 15)
}

fn stage3(s: &IndicatorSnapshot, cfg: &StageTriggerConfig) -> Option<TriggeredStage> {
    let t = &cfg.stage3;
    let mut triggers = Vec::new();
    if let Some(dollar) = s
        .dollar_index_change_pct
        .filter(|v| *v < -t.dollar_decline_pct)
    {
        triggers.push(format!(
            "sustained dollar weakness {:.1}%, beyond {:.0}%",
            -dollar, t.dollar_decline_pct
        ));
    }
    if let Some(gold) = s.gold_change_pct.filter(|v| *v > t.gold_acceleration_pct) {
        triggers.push(format!(
            "gold acceleration {gold:.1}%, above {:.0}%",
            t.gold_acceleration_pct
        ));
    }
    if let Some(holdings) = s
        .foreign_holdings_change_pct
        .filter(|v| *v < -t.foreign_selling_pct)
    {
        triggers.push(format!(
            "foreign holdings selling {:.1}%, beyond {:.0}%",
            -holdings, t.foreign_selling_pct
        ));
    }
    fired(CrisisStage::CredibilityCrisis, triggers, t.min_triggers, 50, 15)
}

fn stage4(s: &IndicatorSnapshot, cfg: &StageTriggerConfig) -> Option<TriggeredStage> {
    let t = &cfg.stage4;
    let mut triggers = Vec::new();
    if let Some(cpi) = s.cpi_annualized_pct.filter(|v| *v > t.cpi_annualized_pct) {
        triggers.push(format!(
            "CPI annualized {cpi:.1}% above {:.0}%",
            t.cpi_annualized_pct
        ));
    }
    fired(CrisisStage::RegimeTransition, triggers, t.min_triggers, 40, 30)
}

fn fired(
    stage: CrisisStage,
    triggers: Vec<String>,
    min_triggers: usize,
    base: u32,
    step: u32,
) -> Option<TriggeredStage> {
    if triggers.len() < min_triggers.max(1) {
        return None;
    }
    let count = triggers.len();
    Some(TriggeredStage {
        stage,
        triggers,
        confidence: confidence(base, step, count),
    })
}

fn stage0(s: &IndicatorSnapshot, cfg: &Stage0Config) -> (Vec<String>, RiskLevel, u8) {
    let mut concerns = Vec::new();
    if let Some(spread) = s.hedging_spread_bps.filter(|v| *v < cfg.hedging_spread_bps) {
        concerns.push(format!("hedging spread negative ({spread:.0}bps)"));
    }
    if let Some(tail) = s.auction_tail_bps.filter(|v| *v > cfg.auction_tail_bps) {
        concerns.push(format!(
            "auction tails running {tail:.1}bps, above {:.0}bps",
            cfg.auction_tail_bps
        ));
    }
    if let Some(ratio) = s.interest_expense_ratio.filter(|v| *v > cfg.interest_ratio) {
        concerns.push(format!(
            "interest expense at {:.1}% of receipts, above {:.0}%",
            ratio * 100.0,
            cfg.interest_ratio * 100.0
        ));
    }
    if let Some(basis) = s.basis_swap_bps.filter(|v| *v > cfg.basis_swap_bps) {
        concerns.push(format!(
            "basis swap narrowing ({basis:.0}bps, above {:.0}bps)",
            cfg.basis_swap_bps
        ));
    }
    if let Some(roc) = s.gold_treasury_roc.filter(|v| *v > cfg.gold_roc) {
        concerns.push(format!(
            "gold/Treasury ratio up {:.1}%, above {:.0}%",
            roc * 100.0,
            cfg.gold_roc * 100.0
        ));
    }
    let level = if concerns.len() >= cfg.elevated_min {
        RiskLevel::Elevated
    } else if concerns.is_empty() {
        RiskLevel::Low
    } else {
        RiskLevel::Moderate
    };
    let conf = confidence(50, 8, concerns.len());
    (concerns, level, conf)
}

/// Assesses the crisis stage from a snapshot of current indicator values.
///
/// Pure and deterministic; any missing input simply fails its trigger
/// conditions.
#[must_use]
pub fn assess_stage(
    snapshot: &IndicatorSnapshot,
    stages: &StageTriggerConfig,
    stage0_cfg: &Stage0Config,
) -> StageAssessment {
    let all_triggered: Vec<TriggeredStage> = [
        stage1(snapshot, stages),
        stage2(snapshot, stages),
        stage3(snapshot, stages),
        stage4(snapshot, stages),
    ]
    .into_iter()
    .flatten()
    .collect();

    // Highest-numbered fired stage wins, carrying its own triggers and
    // confidence rather than a blend.
    if let Some(winner) = all_triggered.last().cloned() {
        return StageAssessment {
            stage: winner.stage,
            stage_name: winner.stage.name().to_string(),
            confidence: winner.confidence,
            triggers: winner.triggers,
            all_triggered_stages: all_triggered,
            risk_level: None,
        };
    }

    let (concerns, level, conf) = stage0(snapshot, stage0_cfg);
    StageAssessment {
        stage: CrisisStage::PreCrisis,
        stage_name: CrisisStage::PreCrisis.name().to_string(),
        confidence: conf,
        triggers: concerns,
        all_triggered_stages: Vec::new(),
        risk_level: Some(level),
    }
}
