/// Endpoint and display constants shared across the pipeline and the board

// Live data source
pub const HMRC_API_URL: &str = "https://www.api.gov.uk/hmrc/individual-benefits/individual-benefits";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Number of ranked rows rendered
pub const TOP_LIMIT: usize = 50;

// Configuration file and environment overrides
pub const CONFIG_PATH: &str = "config.toml";
pub const ENV_API_URL: &str = "BENEFITS_API_URL";
pub const ENV_TOP_LIMIT: &str = "BENEFITS_TOP_LIMIT";
pub const ENV_TIMEOUT_SECS: &str = "BENEFITS_TIMEOUT_SECS";

// Placeholders
pub const DIRECTOR_PLACEHOLDER: &str = "Director";
pub const MISSING_VALUE: &str = "–";

// Field keys of the merged record view
pub const DISPLAY_NAME_FIELD: &str = "displayName";
pub const TAX_NUMBER_FIELD: &str = "taxNumber";
pub const EMPLOYEE_NUMBER_FIELD: &str = "employeeNumber";
pub const SALARY_FIELD: &str = "salary";
pub const ALLOWANCES_FIELD: &str = "allowances";
pub const TOTAL_BENEFITS_FIELD: &str = "totalBenefits";
pub const IS_DIRECTOR_FIELD: &str = "isDirector";
pub const TOTAL_BENEFITS_LABEL: &str = "Total benefits";

/// Keys starting with this prefix are never offered as dimensions
pub const RESERVED_FIELD_PREFIX: &str = "_";

// Status banner text
pub const STATUS_LOADING: &str = "Loading data from HMRC...";
pub const STATUS_REFRESHING: &str = "Refreshing data from HMRC...";
pub const STATUS_FALLBACK: &str =
    "Unable to fetch live HMRC data. Showing a recent example dataset so you can explore the interface.";

/// Status line shown after a successful live load
pub fn live_status(fetched_at: &str) -> String {
    format!("Showing live HMRC data fetched at {fetched_at}.")
}
