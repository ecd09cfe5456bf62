//! Stock ledger reduction.
//!
//! An item's `current_stock` is a materialized view over its movement log:
//! the running sum of IN and ADJUST quantities minus OUT quantities, in
//! creation order. TRANSFER relocates units without changing the total.
//! These functions are pure; the movement recorder applies them inside the
//! insert transaction.

use crate::entities::{ItemStatus, MovementType};

/// Stock delta contributed by a single movement.
///
/// ADJUST is additive, the same as IN. A set-to-absolute-value correction
/// semantic was considered and rejected; see DESIGN.md.
pub fn stock_delta(movement_type: MovementType, quantity: i32) -> i32 {
    match movement_type {
        MovementType::In | MovementType::Adjust => quantity,
        MovementType::Out => -quantity,
        MovementType::Transfer => 0,
    }
}

/// Stock after applying one movement to the current level.
pub fn next_stock(current_stock: i32, movement_type: MovementType, quantity: i32) -> i32 {
    current_stock + stock_delta(movement_type, quantity)
}

/// Status derived from a post-movement stock level, in priority order:
/// out of stock beats low, low beats ok. `Maintenance` is operator-set and
/// never produced here.
pub fn derive_status(stock: i32, min_stock_threshold: i32) -> ItemStatus {
    if stock <= 0 {
        ItemStatus::Unavailable
    } else if stock <= min_stock_threshold {
        ItemStatus::Low
    } else {
        ItemStatus::Ok
    }
}

/// Reduce a full movement history to a stock level, oldest first.
/// Used by reconciliation checks; the hot path applies deltas incrementally.
pub fn reduce<I>(movements: I) -> i32
where
    I: IntoIterator<Item = (MovementType, i32)>,
{
    movements
        .into_iter()
        .fold(0, |stock, (kind, quantity)| next_stock(stock, kind, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(MovementType::In, 5, 5)]
    #[case(MovementType::Out, 5, -5)]
    #[case(MovementType::Transfer, 5, 0)]
    #[case(MovementType::Adjust, 5, 5)]
    fn delta_per_movement_type(
        #[case] kind: MovementType,
        #[case] quantity: i32,
        #[case] expected: i32,
    ) {
        assert_eq!(stock_delta(kind, quantity), expected);
    }

    #[rstest]
    #[case(0, 2, ItemStatus::Unavailable)]
    #[case(-1, 2, ItemStatus::Unavailable)]
    #[case(1, 2, ItemStatus::Low)]
    #[case(2, 2, ItemStatus::Low)]
    #[case(3, 2, ItemStatus::Ok)]
    // stock 0 is unavailable regardless of threshold
    #[case(0, 0, ItemStatus::Unavailable)]
    fn status_priority(#[case] stock: i32, #[case] min: i32, #[case] expected: ItemStatus) {
        assert_eq!(derive_status(stock, min), expected);
    }

    #[test]
    fn out_then_out_reaches_unavailable() {
        // minStockThreshold=2, stock 5: OUT 4 -> 1 (LOW), OUT 1 -> 0 (UNAVAILABLE)
        let after_first = next_stock(5, MovementType::Out, 4);
        assert_eq!(after_first, 1);
        assert_eq!(derive_status(after_first, 2), ItemStatus::Low);

        let after_second = next_stock(after_first, MovementType::Out, 1);
        assert_eq!(after_second, 0);
        assert_eq!(derive_status(after_second, 2), ItemStatus::Unavailable);
    }

    #[test]
    fn transfer_never_changes_stock() {
        assert_eq!(next_stock(7, MovementType::Transfer, 100), 7);
    }

    proptest! {
        // The incremental application equals the full reduction: stock is a
        // pure function of the log.
        #[test]
        fn incremental_matches_full_reduction(
            movements in prop::collection::vec(
                (prop_oneof![
                    Just(MovementType::In),
                    Just(MovementType::Out),
                    Just(MovementType::Transfer),
                    Just(MovementType::Adjust),
                ], 1..500i32),
                0..50,
            )
        ) {
            let incremental = movements
                .iter()
                .fold(0, |stock, &(kind, q)| next_stock(stock, kind, q));
            prop_assert_eq!(incremental, reduce(movements));
        }

        #[test]
        fn ins_and_adjusts_minus_outs(
            ins in 0..1000i32,
            outs in 0..1000i32,
            adjusts in 0..1000i32,
            transfers in 0..1000i32,
        ) {
            let log = [
                (MovementType::In, ins),
                (MovementType::Out, outs),
                (MovementType::Adjust, adjusts),
                (MovementType::Transfer, transfers),
            ];
            let live: Vec<_> = log.iter().copied().filter(|&(_, q)| q > 0).collect();
            prop_assert_eq!(reduce(live), ins + adjusts - outs);
        }
    }
}
