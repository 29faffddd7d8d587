pub mod emoji;

/// Probe URL used by the generated url-test group
pub const URL_TEST_PROBE: &str = "http://www.gstatic.com/generate_204";

/// Probe interval of the url-test group, in seconds
pub const URL_TEST_INTERVAL: u32 = 300;
