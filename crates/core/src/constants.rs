use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Sales tax applied to every document line (ISV, 15%)
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.15);

/// Days between issue date and due date of a new document
pub const DEFAULT_DUE_DAYS: i64 = 7;

/// Largest accepted due-day offset (ten years)
pub const MAX_DUE_DAYS: i64 = 3650;

/// Prefix of generated document numbers
pub const DEFAULT_DOCUMENT_NUMBER_PREFIX: &str = "INV-";

/// Number of trailing timestamp digits kept in a generated document number
pub const DOCUMENT_NUMBER_DIGITS: usize = 6;

/// Currency assumed when a customer record does not carry one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Status of a freshly assembled document
pub const DOCUMENT_STATUS_DRAFT: &str = "draft";

/// Board card fallback when an opportunity has no customer name
pub const UNKNOWN_CUSTOMER_LABEL: &str = "Unknown customer";

/// Board card fallback when an opportunity has no activity note
pub const NO_ACTIVITY_LABEL: &str = "No recent activity";

/// Board card fallback for the owner avatar
pub const UNKNOWN_OWNER_INITIAL: char = '?';
