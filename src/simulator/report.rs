//! Simulation report generation.

use crate::combat::{BattleReport, BattleResult, DecisionTally, DifficultyTier};
use serde::Serialize;

/// What the simulator keeps from each battle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleRecord {
    pub result: BattleResult,
    pub tier: DifficultyTier,
    pub difficulty: f64,
    pub risk: f64,
    pub ticks: u64,
    pub player_moves: u32,
    pub opponent_moves: u32,
    pub decisions: DecisionTally,
}

impl BattleRecord {
    pub fn from_report(report: &BattleReport) -> Self {
        Self {
            result: report.result,
            tier: DifficultyTier::from_difficulty(report.difficulty),
            difficulty: report.difficulty,
            risk: report.risk,
            ticks: report.ticks,
            player_moves: report.player_moves,
            opponent_moves: report.opponent_moves,
            decisions: report.decisions,
        }
    }
}

/// Results against one difficulty tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierStats {
    pub tier: DifficultyTier,
    pub battles: u32,
    pub player_wins: u32,
    pub win_rate: f64,
    pub avg_ticks: f64,
}

/// Aggregated results from multiple battles.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub player_wins: u32,
    pub opponent_wins: u32,
    pub stalled: u32,

    // Aggregated stats
    pub win_rate: f64,
    pub avg_ticks: f64,
    pub avg_player_moves: f64,
    pub avg_opponent_moves: f64,

    pub tiers: Vec<TierStats>,
    pub decisions: DecisionTally,

    // Individual battles for detailed analysis
    #[serde(skip)]
    pub runs: Vec<BattleRecord>,
}

fn average<'a>(
    runs: impl IntoIterator<Item = &'a BattleRecord>,
    value: impl Fn(&BattleRecord) -> f64,
) -> f64 {
    let (sum, count) = runs
        .into_iter()
        .fold((0.0, 0u32), |(sum, count), run| (sum + value(run), count + 1));
    sum / count.max(1) as f64
}

fn count_result(runs: &[BattleRecord], result: BattleResult) -> u32 {
    runs.iter().filter(|r| r.result == result).count() as u32
}

impl SimReport {
    /// Create a new report from finished battles.
    pub fn from_battles(runs: Vec<BattleRecord>) -> Self {
        let num_runs = runs.len() as u32;
        let player_wins = count_result(&runs, BattleResult::PlayerWon);
        let opponent_wins = count_result(&runs, BattleResult::OpponentWon);
        let stalled = count_result(&runs, BattleResult::Stalled);

        let tiers = DifficultyTier::all()
            .into_iter()
            .map(|tier| {
                let in_tier: Vec<&BattleRecord> = runs.iter().filter(|r| r.tier == tier).collect();
                let battles = in_tier.len() as u32;
                let wins = in_tier
                    .iter()
                    .filter(|r| r.result == BattleResult::PlayerWon)
                    .count() as u32;
                TierStats {
                    tier,
                    battles,
                    player_wins: wins,
                    win_rate: wins as f64 / battles.max(1) as f64,
                    avg_ticks: average(in_tier.iter().copied(), |r| r.ticks as f64),
                }
            })
            .collect();

        let mut decisions = DecisionTally::default();
        for run in &runs {
            decisions.merge(&run.decisions);
        }

        Self {
            num_runs,
            player_wins,
            opponent_wins,
            stalled,
            win_rate: player_wins as f64 / num_runs.max(1) as f64,
            avg_ticks: average(&runs, |r| r.ticks as f64),
            avg_player_moves: average(&runs, |r| r.player_moves as f64),
            avg_opponent_moves: average(&runs, |r| r.opponent_moves as f64),
            tiers,
            decisions,
            runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("              (Autopilot vs Opponent Engine)\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Battles: {} total, {} won, {} lost, {} stalled\n\n",
            self.num_runs, self.player_wins, self.opponent_wins, self.stalled
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Player Win Rate:     {:.1}%\n",
            self.win_rate * 100.0
        ));
        report.push_str(&format!("  Avg Ticks:           {:.1}\n", self.avg_ticks));
        report.push_str(&format!(
            "  Avg Player Moves:    {:.1}\n",
            self.avg_player_moves
        ));
        report.push_str(&format!(
            "  Avg Opponent Moves:  {:.1}\n\n",
            self.avg_opponent_moves
        ));

        report.push_str("── PER-TIER BREAKDOWN ───────────────────────────────────────────\n");
        report.push_str("  Tier     Battles   Wins   Win Rate   Avg Ticks\n");
        report.push_str("  ────     ───────   ────   ────────   ─────────\n");
        for tier in &self.tiers {
            if tier.battles > 0 {
                report.push_str(&format!(
                    "  {:<8} {:7}   {:4}   {:7.1}%   {:9.1}\n",
                    tier.tier.name(),
                    tier.battles,
                    tier.player_wins,
                    tier.win_rate * 100.0,
                    tier.avg_ticks
                ));
            }
        }
        report.push('\n');

        report.push_str("── OPPONENT DECISIONS ───────────────────────────────────────────\n");
        let total = self.decisions.total().max(1) as f64;
        for (label, count) in [
            ("Lethal", self.decisions.lethal),
            ("Survive", self.decisions.survive),
            ("Attack", self.decisions.attack),
            ("Heal", self.decisions.heal),
        ] {
            let pct = count as f64 / total * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<8} {:>7} {:>5.1}% {}\n", label, count, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.win_rate > 0.7 {
            "TOO EASY - Opponents rarely win"
        } else if self.win_rate > 0.4 {
            "GOOD - Challenging but fair"
        } else if self.win_rate > 0.2 {
            "HARD - Opponents win most fights"
        } else {
            "TOO HARD - Player almost never wins"
        };
        report.push_str(&format!("  Rating: {}\n", rating));

        if self.stalled > 0 {
            report.push_str(&format!(
                "  ⚠️  {} battles stalled - healing outpaces damage?\n",
                self.stalled
            ));
        }
        let easy = self.tiers.iter().find(|t| t.tier == DifficultyTier::Easy);
        let hard = self.tiers.iter().find(|t| t.tier == DifficultyTier::Hard);
        if let (Some(easy), Some(hard)) = (easy, hard) {
            if easy.battles > 0 && hard.battles > 0 && hard.win_rate > easy.win_rate {
                report.push_str("  ⚠️  Hard opponents lose more often than easy ones\n");
            }
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
