use std::cmp::Reverse;

use anmeldung_storage::RegistrationRecord;

use crate::collation::CollationKey;
use crate::types::{SortOrder, SortSpec};

/// Sort records in place by the requested field.
///
/// The sort is stable in both directions: records with equal keys keep
/// their insertion order.
pub fn sort_records(records: &mut [RegistrationRecord], spec: &SortSpec) {
    let key = |record: &RegistrationRecord| CollationKey::new(&record.value_by_name(&spec.field));

    match spec.order {
        SortOrder::Ascending => records.sort_by_cached_key(key),
        SortOrder::Descending => records.sort_by_cached_key(|record| Reverse(key(record))),
    }
}
