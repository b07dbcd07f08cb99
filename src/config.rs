//! Configuration management for the relay.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables (a `.env` file is loaded by the binary at startup)
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use s3_tms_relay::config::Config;
//!
//! // Parse from command line and environment
//! let config = Config::parse();
//!
//! println!("Listening on {}", config.bind_address());
//! println!("S3 bucket: {}", config.s3_bucket);
//! ```
//!
//! # Environment Variables
//!
//! - `HOST` - Server bind address (default: 0.0.0.0)
//! - `PORT` - Server port (default: 8080)
//! - `API_TOKEN` - Bearer token callers must present (required)
//! - `AWS_REGION` - AWS region (default: us-east-1)
//! - `AWS_ACCESS_KEY` / `AWS_SECRET_KEY` - Static S3 credentials (required)
//! - `AWS_S3_BUCKET` - Bucket holding the images (required)
//! - `AWS_S3_ENDPOINT` - Custom endpoint for S3-compatible services
//! - `AWS_S3_TIMEOUT` - Store read timeout in seconds (default: 30)
//! - `MCLEOD_BASE_URL` - TMS web service root
//! - `MCLEOD_COMPANY_ID` - TMS company identifier (required)
//! - `MCLEOD_API_KEY` - Optional TMS bearer key
//! - `MCLEOD_ROW_TYPE` / `MCLEOD_DOCUMENT_TYPE` - Document classification (default: o / 3)
//! - `MCLEOD_UPLOAD_TIMEOUT` - Upload timeout in seconds (default: 60)
//! - `CORS_ORIGINS` - Allowed CORS origins (comma-separated)

use std::time::Duration;

use clap::Parser;

use crate::tms::{DEFAULT_DOCUMENT_TYPE, DEFAULT_ROW_TYPE};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default McLeod web service root.
pub const DEFAULT_MCLEOD_BASE_URL: &str = "https://tms-syfn.loadtracking.com/ws";

/// Default upload timeout in seconds.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;

/// Default store read timeout in seconds.
pub const DEFAULT_S3_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// CLI Arguments
// =============================================================================

/// S3 to McLeod TMS image relay.
///
/// Fetches JPEG images from an S3 bucket and attaches them to McLeod orders
/// through the TMS document-upload endpoint.
#[derive(Parser, Debug, Clone)]
#[command(name = "s3-tms-relay")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Bearer token that callers must present.
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    // =========================================================================
    // S3 Configuration
    // =========================================================================
    /// AWS region for S3.
    #[arg(long, default_value = DEFAULT_REGION, env = "AWS_REGION")]
    pub aws_region: String,

    /// AWS access key id.
    #[arg(long, env = "AWS_ACCESS_KEY", hide_env_values = true)]
    pub aws_access_key: String,

    /// AWS secret access key.
    #[arg(long, env = "AWS_SECRET_KEY", hide_env_values = true)]
    pub aws_secret_key: String,

    /// S3 bucket name containing the images.
    #[arg(long, env = "AWS_S3_BUCKET")]
    pub s3_bucket: String,

    /// Custom S3 endpoint URL for S3-compatible services (MinIO, etc.).
    ///
    /// If not specified, uses the default AWS S3 endpoint.
    #[arg(long, env = "AWS_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Timeout for a single S3 read, in seconds.
    #[arg(long, default_value_t = DEFAULT_S3_TIMEOUT_SECS, env = "AWS_S3_TIMEOUT")]
    pub s3_timeout: u64,

    // =========================================================================
    // McLeod Configuration
    // =========================================================================
    /// McLeod web service root (e.g. https://tms.example.com/ws).
    #[arg(long, default_value = DEFAULT_MCLEOD_BASE_URL, env = "MCLEOD_BASE_URL")]
    pub mcleod_base_url: String,

    /// McLeod company identifier sent with every upload.
    #[arg(long, env = "MCLEOD_COMPANY_ID")]
    pub mcleod_company_id: String,

    /// Optional McLeod API key, sent as a bearer token when present.
    #[arg(long, env = "MCLEOD_API_KEY", hide_env_values = true)]
    pub mcleod_api_key: Option<String>,

    /// Row type segment of the document URL.
    #[arg(long, default_value = DEFAULT_ROW_TYPE, env = "MCLEOD_ROW_TYPE")]
    pub mcleod_row_type: String,

    /// Document type segment of the document URL.
    #[arg(long, default_value = DEFAULT_DOCUMENT_TYPE, env = "MCLEOD_DOCUMENT_TYPE")]
    pub mcleod_document_type: String,

    /// Timeout for a single upload, in seconds.
    #[arg(long, default_value_t = DEFAULT_UPLOAD_TIMEOUT_SECS, env = "MCLEOD_UPLOAD_TIMEOUT")]
    pub upload_timeout: u64,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_token.is_empty() {
            return Err("API token is required. Set --api-token or API_TOKEN".to_string());
        }

        if self.s3_bucket.is_empty() {
            return Err("S3 bucket name is required. Set --s3-bucket or AWS_S3_BUCKET".to_string());
        }

        if self.aws_access_key.is_empty() || self.aws_secret_key.is_empty() {
            return Err(
                "AWS credentials are required. Set AWS_ACCESS_KEY and AWS_SECRET_KEY".to_string(),
            );
        }

        if self.mcleod_company_id.is_empty() {
            return Err(
                "McLeod company id is required. Set --mcleod-company-id or MCLEOD_COMPANY_ID"
                    .to_string(),
            );
        }

        if let Err(e) = url::Url::parse(&self.mcleod_base_url) {
            return Err(format!(
                "Invalid McLeod base URL '{}': {}",
                self.mcleod_base_url, e
            ));
        }

        if self.mcleod_row_type.is_empty() || self.mcleod_document_type.is_empty() {
            return Err("McLeod row type and document type must not be empty".to_string());
        }

        if self.upload_timeout == 0 {
            return Err("upload_timeout must be greater than 0".to_string());
        }
        if self.s3_timeout == 0 {
            return Err("s3_timeout must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upload timeout as a [`Duration`].
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout)
    }

    /// Store read timeout as a [`Duration`].
    pub fn s3_timeout(&self) -> Duration {
        Duration::from_secs(self.s3_timeout)
    }

    /// The McLeod API key, treating an empty value as absent.
    pub fn mcleod_api_key(&self) -> Option<&str> {
        self.mcleod_api_key.as_deref().filter(|k| !k.is_empty())
    }
}

// =============================================================================
// Tests
// =============================================================================
