//! Client configuration
//!
//! Connection settings are captured once per process from CLI flags and
//! handed to the SDK adapter at construction time. There is no config file
//! and no process-wide singleton.

/// The region that must not carry an explicit location constraint in
/// bucket-creation requests. Also the default when no region is given.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Settings for building the S3 client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// AWS region the client signs requests for
    pub region: String,

    /// Custom endpoint for S3-compatible stores (MinIO, RustFS)
    pub endpoint_url: Option<String>,

    /// Use path-style addressing instead of virtual-hosted style
    pub force_path_style: bool,
}

impl ClientConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
            force_path_style: false,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}
