//! Statistics and partitioning over item pools.
//!
//! Everything here works on index lists into a pool so callers can rank and
//! narrow items without reordering or mutating the pool itself. Where several
//! items tie, the one appearing first in the candidate list wins.

use super::types::Item;
use crate::error::{BattleError, Result};

/// Total units in a pool, counting each item once per remaining copy.
pub fn total_units(items: &[Item]) -> u64 {
    items.iter().map(|item| u64::from(item.count)).sum()
}

/// Total units among the given candidates.
pub fn units_of(items: &[Item], candidates: &[usize]) -> u64 {
    candidates.iter().map(|&i| u64::from(items[i].count)).sum()
}

/// Pulls `n` units off the front of `order`, each item contributing up to
/// its count. The result holds one index per unit, so an item with two
/// copies can appear twice.
pub fn take_units(items: &[Item], order: &[usize], n: u64) -> Result<Vec<usize>> {
    let available = units_of(items, order);
    if n > available {
        return Err(BattleError::PoolCapacity {
            requested: n,
            available,
        });
    }

    let mut taken = Vec::with_capacity(n as usize);
    for &index in order {
        if taken.len() as u64 == n {
            break;
        }
        let wanted = n - taken.len() as u64;
        let from_item = u64::from(items[index].count).min(wanted);
        taken.extend(std::iter::repeat(index).take(from_item as usize));
    }
    Ok(taken)
}

/// Candidates whose `key` equals the largest value of `key`.
pub fn filter_max(items: &[Item], candidates: &[usize], key: impl Fn(&Item) -> f64) -> Vec<usize> {
    let Some(best) = candidates
        .iter()
        .map(|&i| key(&items[i]))
        .max_by(f64::total_cmp)
    else {
        return Vec::new();
    };
    candidates
        .iter()
        .copied()
        .filter(|&i| key(&items[i]) == best)
        .collect()
}

/// Candidates whose `key` equals the smallest value of `key`.
pub fn filter_min(items: &[Item], candidates: &[usize], key: impl Fn(&Item) -> f64) -> Vec<usize> {
    filter_max(items, candidates, |item| -key(item))
}

/// First candidate with the smallest `key`.
pub fn first_min_by(
    items: &[Item],
    candidates: &[usize],
    key: impl Fn(&Item) -> f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &i in candidates {
        let value = key(&items[i]);
        match best {
            Some((_, current)) if value >= current => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}

/// Candidates sharing the magnitude average closest to `target`.
pub fn closest_average(items: &[Item], candidates: &[usize], target: f64) -> Vec<usize> {
    let Some(closest) = first_min_by(items, candidates, |item| {
        (item.magnitude_average() - target).abs()
    }) else {
        return Vec::new();
    };
    let average = items[closest].magnitude_average();
    candidates
        .iter()
        .copied()
        .filter(|&i| items[i].magnitude_average() == average)
        .collect()
}

/// Items most likely to roll close to `required`: the ones whose average is
/// nearest to it, narrowed to the tightest magnitude range.
pub fn find_likely_to_roll(items: &[Item], candidates: &[usize], required: f64) -> Vec<usize> {
    let nearest = closest_average(items, candidates, required);
    filter_min(items, &nearest, |item| item.magnitude_width() as f64)
}

/// Stable sort of `order` by `key`, descending when `descending` is set.
/// Equal keys keep their relative order either way.
pub fn sort_indices(
    items: &[Item],
    order: &mut [usize],
    descending: bool,
    key: impl Fn(&Item) -> f64,
) {
    order.sort_by(|&a, &b| {
        let ord = key(&items[a]).total_cmp(&key(&items[b]));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

/// Leading `fraction` of `list`, rounded up, never fewer than one entry
/// when the list is non-empty.
pub fn top_fraction(list: &[usize], fraction: f64) -> &[usize] {
    let wanted = (list.len() as f64 * fraction).ceil() as usize;
    let wanted = wanted.clamp(1.min(list.len()), list.len());
    &list[..wanted]
}

/// Every index of a pool, in pool order.
pub fn all_indices(items: &[Item]) -> Vec<usize> {
    (0..items.len()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::RollRange;

    fn item(name: &str, count: u32, min: u32, max: u32, cd_min: u32, cd_max: u32) -> Item {
        Item::new(
            0,
            name,
            count,
            RollRange::new(min, max).unwrap(),
            RollRange::new(cd_min, cd_max).unwrap(),
        )
    }

    #[test]
    fn test_total_units_counts_copies() {
        let pool = vec![item("a", 2, 1, 2, 0, 0), item("b", 3, 1, 2, 0, 0)];
        assert_eq!(total_units(&pool), 5);
        assert_eq!(units_of(&pool, &[1]), 3);
    }

    #[test]
    fn test_unit_totals_do_not_overflow() {
        let pool = vec![
            item("hoard", u32::MAX, 1, 2, 0, 0),
            item("stash", u32::MAX, 1, 2, 0, 0),
        ];
        assert_eq!(total_units(&pool), 2 * u64::from(u32::MAX));
        assert_eq!(units_of(&pool, &[0, 1]), total_units(&pool));
        assert_eq!(take_units(&pool, &[1, 0], 2).unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_take_units_respects_counts() {
        let pool = vec![item("a", 2, 1, 2, 0, 0), item("b", 1, 1, 2, 0, 0)];
        let order = all_indices(&pool);
        assert_eq!(take_units(&pool, &order, 1).unwrap(), vec![0]);
        assert_eq!(take_units(&pool, &order, 2).unwrap(), vec![0, 0]);
        assert_eq!(take_units(&pool, &order, 3).unwrap(), vec![0, 0, 1]);
    }

    #[test]
    fn test_take_units_over_capacity_fails() {
        let pool = vec![item("a", 1, 1, 2, 0, 0)];
        let err = take_units(&pool, &[0], 2).unwrap_err();
        assert!(matches!(
            err,
            BattleError::PoolCapacity {
                requested: 2,
                available: 1
            }
        ));
    }

    #[test]
    fn test_take_units_zero_is_empty() {
        let pool = vec![item("a", 1, 1, 2, 0, 0)];
        assert!(take_units(&pool, &[0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_filter_max_keeps_ties_in_order() {
        let pool = vec![
            item("a", 1, 1, 9, 0, 0),
            item("b", 1, 4, 6, 0, 0),
            item("c", 1, 2, 8, 0, 0),
        ];
        let all = all_indices(&pool);
        assert_eq!(filter_max(&pool, &all, |i| i.magnitude_average()), vec![0, 1, 2]);
        assert_eq!(filter_max(&pool, &all, |i| i.magnitude_width() as f64), vec![0]);
        assert_eq!(filter_min(&pool, &all, |i| i.magnitude_width() as f64), vec![1]);
    }

    #[test]
    fn test_filter_on_empty_candidates() {
        let pool = vec![item("a", 1, 1, 9, 0, 0)];
        assert!(filter_max(&pool, &[], |i| i.magnitude_average()).is_empty());
        assert!(closest_average(&pool, &[], 3.0).is_empty());
    }

    #[test]
    fn test_closest_average_prefers_first_on_equal_distance() {
        // averages 4 and 6 are both 1 away from 5; the first one wins
        let pool = vec![item("low", 1, 4, 4, 0, 0), item("high", 1, 6, 6, 0, 0)];
        assert_eq!(closest_average(&pool, &all_indices(&pool), 5.0), vec![0]);
    }

    #[test]
    fn test_find_likely_to_roll_narrows_to_tightest_range() {
        let pool = vec![
            item("wide", 1, 0, 20, 0, 0),
            item("tight", 1, 9, 11, 0, 0),
            item("far", 1, 30, 30, 0, 0),
        ];
        assert_eq!(find_likely_to_roll(&pool, &all_indices(&pool), 10.0), vec![1]);
    }

    #[test]
    fn test_sort_indices_is_stable_both_ways() {
        let pool = vec![
            item("a", 1, 2, 2, 0, 0),
            item("b", 1, 5, 5, 0, 0),
            item("c", 1, 2, 2, 0, 0),
        ];
        let mut order = all_indices(&pool);
        sort_indices(&pool, &mut order, true, |i| i.magnitude_average());
        assert_eq!(order, vec![1, 0, 2]);
        sort_indices(&pool, &mut order, false, |i| i.magnitude_average());
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_top_fraction_rounds_up_and_keeps_one() {
        let list = [0, 1, 2, 3, 4];
        assert_eq!(top_fraction(&list, 0.5), &[0, 1, 2]);
        assert_eq!(top_fraction(&list, 0.01), &[0]);
        assert_eq!(top_fraction(&list, 1.0), &list);
        assert!(top_fraction(&[], 0.5).is_empty());
    }
}
