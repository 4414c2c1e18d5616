//! 選手一覧のキャッシュ（LocalStorage）

use crate::models::Player;
use crate::utils::stats::recompute_all;
use crate::utils::{read_json, remove_item, write_json};

const CACHE_KEY: &str = "fraction_players_cache";

pub fn save_to_cache(players: &[Player]) {
    write_json(CACHE_KEY, players);
}

/// 率系の値は計算し直してから返す。空のキャッシュはNone
pub fn load_from_cache() -> Option<Vec<Player>> {
    read_json::<Vec<Player>>(CACHE_KEY).and_then(normalize_cached)
}

pub fn clear_cache() {
    remove_item(CACHE_KEY);
}

fn normalize_cached(mut players: Vec<Player>) -> Option<Vec<Player>> {
    if players.is_empty() {
        return None;
    }
    recompute_all(&mut players);
    Some(players)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cached() {
        assert_eq!(normalize_cached(Vec::new()), None);

        let cached = vec![Player { id: 5, hits: 3, at_bat: 10, ..Default::default() }];
        let players = normalize_cached(cached).unwrap();
        assert_eq!(players[0].batting_average, 0.3);
    }
}
