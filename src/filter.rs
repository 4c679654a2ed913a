use crate::models::CreatorRecord;

/// Account types kept in the output
pub const ALLOWED_ACCOUNT_TYPES: [&str; 2] = ["Affiliate", "Seller operated"];

/// Minimum normalized revenue kept in the output; unknown revenue counts as 0
pub const MIN_REVENUE: f64 = 100.0;

/// Normalize the revenue of one record
pub fn normalize(mut record: CreatorRecord) -> CreatorRecord {
    record.revenue = record.revenue.normalized();
    record
}

/// Inclusion predicate over a normalized record
pub fn is_included(record: &CreatorRecord) -> bool {
    ALLOWED_ACCOUNT_TYPES.contains(&record.account_type.as_str())
        && record.revenue.value().unwrap_or(0.0) >= MIN_REVENUE
}

/// Normalize revenue and drop records outside the allow-set or below the threshold
pub fn filter_records(records: Vec<CreatorRecord>) -> Vec<CreatorRecord> {
    records
        .into_iter()
        .map(normalize)
        .filter(is_included)
        .collect()
}
