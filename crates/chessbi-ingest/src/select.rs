use crate::archive::{ArchiveRef, MonthKey};

/// Narrow discovered archives to the ones processed in a run.
///
/// 1. Sort ascending (archive URLs end in `/YYYY/MM`, so this is chronological).
/// 2. With `since`, keep archives whose month is `>= since`; archives without
///    a recognisable month are dropped.
/// 3. Keep at most the `max_months` most recent entries.
///
/// Without `since`, archives lacking a month survive selection; the
/// orchestrator skips them later.
pub fn select_window(
    mut archives: Vec<ArchiveRef>,
    since: Option<&MonthKey>,
    max_months: usize,
) -> Vec<ArchiveRef> {
    archives.sort();

    if let Some(since) = since {
        archives.retain(|archive| archive.month_key().is_some_and(|month| &month >= since));
    }

    if archives.len() > max_months {
        let excess = archives.len() - max_months;
        archives.drain(..excess);
    }

    archives
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(months: &[&str]) -> Vec<ArchiveRef> {
        months
            .iter()
            .map(|m| ArchiveRef::new(format!("https://api.chess.com/pub/player/p/games/{m}")))
            .collect()
    }

    #[test]
    fn test_keeps_most_recent_suffix() {
        let archives = refs(&["2024/01", "2024/02", "2024/03", "2024/04", "2024/05"]);
        let window = select_window(archives.clone(), None, 3);
        assert_eq!(window, archives[2..].to_vec());
    }

    #[test]
    fn test_sorts_before_truncating() {
        let archives = refs(&["2024/05", "2023/11", "2024/01"]);
        let window = select_window(archives, None, 2);
        assert_eq!(window, refs(&["2024/01", "2024/05"]));
    }

    #[test]
    fn test_since_is_inclusive() {
        let archives = refs(&["2023/12", "2024/01", "2024/02"]);
        let since: MonthKey = "2024-01".parse().unwrap();
        let window = select_window(archives, Some(&since), 10);
        assert_eq!(window, refs(&["2024/01", "2024/02"]));
    }

    #[test]
    fn test_since_drops_unparsable() {
        let mut archives = refs(&["2024/01", "2024/02"]);
        archives.push(ArchiveRef::new("https://api.chess.com/pub/player/p/games/latest"));
        let since: MonthKey = "2000-01".parse().unwrap();
        let window = select_window(archives, Some(&since), 10);
        assert_eq!(window, refs(&["2024/01", "2024/02"]));
    }

    #[test]
    fn test_zero_budget_selects_nothing() {
        assert!(select_window(refs(&["2024/01"]), None, 0).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(select_window(Vec::new(), None, 3).is_empty());
    }
}
