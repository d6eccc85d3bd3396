//! Property-based tests for the paginator.
//!
//! - Pages partition the input in order
//! - Only single-item pages may exceed capacity
//! - The last page leaves room for the summary unless it holds one item

use proptest::prelude::*;

use super::paginator::Paginator;

/// Item heights, occasionally taller than a whole page.
fn heights() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(prop_oneof![9 => 1u32..400, 1 => 400u32..2_000], 0..40)
}

fn own(item: &u32) -> u32 {
    *item
}

proptest! {
    #[test]
    fn test_pages_partition_items_in_order(
        items in heights(),
        capacity in 100u32..1_200,
        reserve_pct in 0u32..100,
    ) {
        let paginator = Paginator::new(capacity, capacity * reserve_pct / 100, own);
        let pages = paginator.paginate(&items);

        let flattened: Vec<u32> = pages.entries().copied().collect();
        prop_assert_eq!(&flattened, &items);

        let mut next = 0;
        for (index, page) in pages.iter().enumerate() {
            prop_assert!(!page.entries().is_empty());
            prop_assert_eq!(page.start(), next);
            prop_assert_eq!(page.number(), index + 1);
            prop_assert_eq!(page.height(), page.entries().iter().sum::<u32>());
            prop_assert_eq!(page.is_last(), index + 1 == pages.total_pages());
            next += page.entries().len();
        }
        prop_assert_eq!(pages.is_empty(), items.is_empty());
    }

    #[test]
    fn test_pages_respect_capacity(
        items in heights(),
        capacity in 100u32..1_200,
        reserve_pct in 0u32..100,
    ) {
        let paginator = Paginator::new(capacity, capacity * reserve_pct / 100, own);
        let pages = paginator.paginate(&items);

        for page in &pages {
            if page.entries().len() > 1 {
                prop_assert!(page.height() <= paginator.capacity());
            }
        }
        if let Some(last) = pages.last() {
            prop_assert!(
                last.entries().len() == 1 || last.height() <= paginator.last_page_capacity()
            );
        }
    }

    #[test]
    fn test_pagination_is_deterministic(items in heights(), capacity in 100u32..1_200) {
        let paginator = Paginator::new(capacity, capacity / 4, own);
        let first: Vec<(usize, usize)> = paginator
            .paginate(&items)
            .iter()
            .map(|page| (page.start(), page.entries().len()))
            .collect();
        let second: Vec<(usize, usize)> = paginator
            .paginate(&items)
            .iter()
            .map(|page| (page.start(), page.entries().len()))
            .collect();
        prop_assert_eq!(first, second);
    }
}
