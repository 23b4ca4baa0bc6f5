//! Fixed configuration for the vPIC API.
//!
//! The base URL is the only value a caller normally changes, either by
//! passing it to `VpicClient::new` or through the `VPIC_BASE_URL`
//! environment variable. Everything else mirrors limits enforced by the
//! API itself.

/// Production endpoint of the vPIC vehicles API.
pub const DEFAULT_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";

/// Environment variable consulted by `VpicClient::from_env`.
pub const BASE_URL_ENV: &str = "VPIC_BASE_URL";

/// Earliest model year the API knows about.
pub const EARLIEST_MODEL_YEAR: i32 = 1953;

/// Length of a full VIN. Partial VINs are shorter.
pub const MAX_VIN_LEN: usize = 17;

/// A WMI is either 3 characters, or 6 for manufacturers building fewer than
/// 1000 vehicles a year.
pub const WMI_LENGTHS: [usize; 2] = [3, 6];

/// Number of elements a `Results` renders before eliding the rest.
pub const MAX_DISPLAY: usize = 5;

/// Resolve the base URL, preferring `VPIC_BASE_URL` when set and non-empty.
pub fn base_url_from_env() -> String {
    std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
