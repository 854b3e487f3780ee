use serde::{Serialize, Serializer};
use serde::ser::SerializeMap;

/// Serialize `(key, count)` pairs as a map, keeping the pair order.
pub fn serialize_counts_as_map<K, S>(counts: &[(K, u64)], serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize,
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for (k, v) in counts {
        map.serialize_entry(k, v)?;
    }
    map.end()
}
