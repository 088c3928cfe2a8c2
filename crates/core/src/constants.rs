/// Decimal scale used for cash amounts (balances, transactions).
pub const CASH_SCALE: u32 = 2;
/// Decimal scale used for instrument/metal quantities.
pub const QUANTITY_SCALE: u32 = 10;
/// Decimal scale used for prices and average cost.
pub const PRICE_SCALE: u32 = 8;

/// Below this quantity a position is treated as closed, mirroring the
/// teacher's `QUANTITY_THRESHOLD` guard against residual floating dust.
pub const QUANTITY_THRESHOLD: &str = "0.0000000001";

/// Grams per troy ounce, used by the metal valuator (spec §4.3).
pub const GRAMS_PER_TROY_OUNCE: &str = "31.1034768";

/// Default wallet base currency when none is configured.
pub const DEFAULT_BASE_CURRENCY: &str = "PLN";

/// Maximum age of an HMAC request stamp before it's rejected as expired,
/// mirroring the original's `VALID_HMAC` setting (spec §2.2).
pub const HMAC_STAMP_MAX_AGE_SECS: i64 = 300;

/// A quote older than this relative to the valuation's `now` counts toward
/// `Health::stale_quotes` instead of `missing_quotes` (spec §4.5 step 6).
pub const QUOTE_STALE_THRESHOLD_HOURS: i64 = 24;

/// Relative drift between a brokerage account's live total and its most
/// recent frozen snapshot total beyond which `Health::projection_mismatch`
/// is raised (spec §4.5 step 6).
pub const PROJECTION_MISMATCH_TOLERANCE_PCT: &str = "0.01";
