//! Column names of the refund record schema.

/// Feature columns, in the order the classifier sees them.
pub const FEATURE_COLUMNS: [&str; 3] = [
    "purchase_amount",
    "return_reason_code",
    "customer_return_rate",
];

/// Number of features per record.
pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// Label column: present in historical data, produced for new requests.
pub const LABEL_COLUMN: &str = "refund_approved";
