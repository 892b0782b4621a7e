//! Properties of the archive selection window.

use chessbi_ingest::{ArchiveRef, MonthKey, select_window};
use proptest::prelude::*;

fn archive(year: u16, month: u8) -> ArchiveRef {
    ArchiveRef::new(format!("https://api.chess.com/pub/player/p/games/{year:04}/{month:02}"))
}

fn archives() -> impl Strategy<Value = Vec<ArchiveRef>> {
    prop::collection::vec((2007u16..2030, 1u8..=12), 0..40)
        .prop_map(|months| months.into_iter().map(|(y, m)| archive(y, m)).collect())
}

fn since() -> impl Strategy<Value = Option<MonthKey>> {
    prop::option::of((2007u16..2030, 1u8..=12))
        .prop_map(|key| key.map(|(y, m)| format!("{y:04}-{m:02}").parse().unwrap()))
}

proptest! {
    #[test]
    fn test_window_is_bounded(refs in archives(), since in since(), max in 0usize..10) {
        let window = select_window(refs, since.as_ref(), max);
        prop_assert!(window.len() <= max);
    }

    #[test]
    fn test_window_is_sorted(refs in archives(), since in since(), max in 0usize..10) {
        let window = select_window(refs, since.as_ref(), max);
        prop_assert!(window.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_window_respects_since(refs in archives(), since in since(), max in 0usize..10) {
        let window = select_window(refs, since.as_ref(), max);
        if let Some(since) = since {
            for archive in &window {
                let month = archive.month_key().unwrap();
                prop_assert!(month >= since);
            }
        }
    }

    #[test]
    fn test_window_is_most_recent_suffix(refs in archives(), since in since(), max in 0usize..10) {
        let mut eligible: Vec<ArchiveRef> = refs
            .iter()
            .filter(|a| since.as_ref().is_none_or(|s| a.month_key().is_some_and(|m| &m >= s)))
            .cloned()
            .collect();
        eligible.sort();
        let expected = eligible[eligible.len().saturating_sub(max)..].to_vec();

        prop_assert_eq!(select_window(refs, since.as_ref(), max), expected);
    }
}
