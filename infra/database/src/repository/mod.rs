mod conferences;
mod profiles;
mod registrations;
mod sessions;

use fxhash::FxHashMap;

/// Reorders `records` to follow `keys`, dropping keys without a record.
pub(crate) fn in_key_order<T>(
    keys: &[String],
    records: Vec<T>,
    key_of: impl Fn(&T) -> &str,
) -> Vec<T> {
    let mut by_key: FxHashMap<String, T> =
        records.into_iter().map(|record| (key_of(&record).to_owned(), record)).collect();
    keys.iter().filter_map(|key| by_key.remove(key)).collect()
}

#[cfg(test)]
mod tests {
    use super::in_key_order;

    #[test]
    fn test_in_key_order_follows_requested_keys() {
        let keys = vec!["b".to_owned(), "missing".to_owned(), "a".to_owned()];
        let records = vec![("a", 1), ("b", 2)];

        let ordered = in_key_order(&keys, records, |r| r.0);
        assert_eq!(ordered, vec![("b", 2), ("a", 1)]);
    }
}
