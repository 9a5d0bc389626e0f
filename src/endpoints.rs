//! The API endpoint URIs.

/// The route for listing and searching transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the sales statistics of one month.
pub const STATISTICS: &str = "/statistics/{month}";
/// The route for the price-range histogram of one month.
pub const BAR_CHART: &str = "/bar-chart/{month}";
/// The route for the per-category counts of one month.
pub const PIE_CHART: &str = "/pie-chart/{month}";
/// The route merging the list, statistics, and chart results for one month.
pub const COMBINED_DATA: &str = "/combined-data/{month}";
