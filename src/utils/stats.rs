//! 打撃成績の派生値計算

use crate::models::Player;

const TOLERANCE: f64 = 1e-9;

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// 打率
pub fn batting_average(hits: u32, at_bat: u32) -> f64 {
    ratio(hits as f64, at_bat as f64)
}

/// 出塁率（四球のみ考慮）
pub fn on_base_percent(hits: u32, walks: u32, at_bat: u32) -> f64 {
    ratio(hits as f64 + walks as f64, at_bat as f64 + walks as f64)
}

/// 単打数
pub fn singles(hits: u32, doubles: u32, triples: u32, home_runs: u32) -> u32 {
    hits.saturating_sub(doubles)
        .saturating_sub(triples)
        .saturating_sub(home_runs)
}

/// 長打率
pub fn slugging_percent(hits: u32, doubles: u32, triples: u32, home_runs: u32, at_bat: u32) -> f64 {
    let total_bases = singles(hits, doubles, triples, home_runs) as f64
        + 2.0 * doubles as f64
        + 3.0 * triples as f64
        + 4.0 * home_runs as f64;
    ratio(total_bases, at_bat as f64)
}

pub fn hits_per_game(hits: u32, games: u32) -> f64 {
    ratio(hits as f64, games as f64)
}

/// 小数3桁表示（0.300）
pub fn format_rate(value: f64) -> String {
    format!("{:.3}", value)
}

/// 再計算で値が変わった項目の件数
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatCorrections {
    pub batting_average: usize,
    pub on_base_percent: usize,
    pub slugging_percent: usize,
    pub on_base_plus_slugging: usize,
}

impl StatCorrections {
    pub fn total(&self) -> usize {
        self.batting_average + self.on_base_percent + self.slugging_percent + self.on_base_plus_slugging
    }

    pub fn merge(&mut self, other: StatCorrections) {
        self.batting_average += other.batting_average;
        self.on_base_percent += other.on_base_percent;
        self.slugging_percent += other.slugging_percent;
        self.on_base_plus_slugging += other.on_base_plus_slugging;
    }

    pub fn report(&self) -> String {
        format!(
            "stat corrections: AVG {}, OBP {}, SLG {}, OPS {}",
            self.batting_average, self.on_base_percent, self.slugging_percent, self.on_base_plus_slugging
        )
    }
}

fn correct(slot: &mut f64, value: f64) -> usize {
    if (*slot - value).abs() > TOLERANCE {
        *slot = value;
        1
    } else {
        0
    }
}

/// 保存されている率系の値を計数値から計算し直す
pub fn recompute(player: &mut Player) -> StatCorrections {
    let avg = batting_average(player.hits, player.at_bat);
    let obp = on_base_percent(player.hits, player.walks, player.at_bat);
    let slg = slugging_percent(
        player.hits,
        player.doubles,
        player.triples,
        player.home_runs,
        player.at_bat,
    );

    StatCorrections {
        batting_average: correct(&mut player.batting_average, avg),
        on_base_percent: correct(&mut player.on_base_percent, obp),
        slugging_percent: correct(&mut player.slugging_percent, slg),
        on_base_plus_slugging: correct(&mut player.on_base_plus_slugging, obp + slg),
    }
}

/// 一覧全体を再計算して件数を集計
pub fn recompute_all(players: &mut [Player]) -> StatCorrections {
    let mut corrections = StatCorrections::default();
    for player in players.iter_mut() {
        corrections.merge(recompute(player));
    }
    corrections
}
