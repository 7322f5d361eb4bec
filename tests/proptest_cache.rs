//! 快取行為的性質測試

use matcache::*;
use proptest::prelude::*;

/// 對角優勢矩陣必定可逆
fn diagonally_dominant() -> impl Strategy<Value = Matrix> {
    (1usize..=5).prop_flat_map(|n| {
        (
            prop::collection::vec(-9i64..=9, n * n),
            prop::collection::vec(1i64..=10, n),
        )
            .prop_map(move |(entries, margins)| {
                let rows = (0..n)
                    .map(|r| {
                        let row = &entries[r * n..(r + 1) * n];
                        let off_diagonal: i64 = row
                            .iter()
                            .enumerate()
                            .filter(|(c, _)| *c != r)
                            .map(|(_, v)| v.abs())
                            .sum();
                        row.iter()
                            .enumerate()
                            .map(|(c, v)| if c == r { off_diagonal + margins[r] } else { *v })
                            .collect()
                    })
                    .collect();
                Matrix::from_rows::<i64>(rows).unwrap()
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn repeated_inverse_computes_once(source in diagonally_dominant(), calls in 1usize..8) {
        let mut cache = InverseCache::new(source);
        let options = InvertOptions::default();

        let first = cache.inverse(&options).unwrap().clone();
        for _ in 1..calls {
            prop_assert_eq!(cache.inverse(&options).unwrap(), &first);
        }

        prop_assert_eq!(cache.computation_count(), 1);
    }

    #[test]
    fn inverse_times_source_is_identity(source in diagonally_dominant()) {
        let mut cache = InverseCache::new(source.clone());

        let inverse = cache.inverse(&InvertOptions::default()).unwrap();
        let residual = identity_residual(&source, inverse).unwrap();

        prop_assert!(residual <= Decimal::new(1, 15), "residual {}", residual);
    }

    #[test]
    fn set_source_resets_and_recomputes(a in diagonally_dominant(), b in diagonally_dominant()) {
        let mut cache = InverseCache::new(a);
        let options = InvertOptions::default();
        cache.inverse(&options).unwrap();

        cache.set_source(b.clone());
        prop_assert_eq!(cache.computation_count(), 0);
        prop_assert!(!cache.is_cached());

        let recomputed = cache.inverse(&options).unwrap().clone();
        prop_assert_eq!(recomputed, invert(&b, &options).unwrap());
        prop_assert_eq!(cache.computation_count(), 1);
    }

    #[test]
    fn overwrite_is_returned_verbatim(source in diagonally_dominant(), value in -1000i64..1000) {
        let mut cache = InverseCache::new(source);
        let options = InvertOptions::default();
        let overwrite = Matrix::from_rows(vec![vec![value]]).unwrap();

        cache.set_inverse_unchecked(overwrite.clone());

        prop_assert_eq!(cache.inverse(&options).unwrap(), &overwrite);
        prop_assert_eq!(cache.computation_count(), 0);
    }
}
