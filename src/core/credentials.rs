//! Google Ads credential bundle.
//!
//! The bundle is a `google-ads.yaml` file produced by the OAuth setup flow:
//!
//! ```yaml
//! developer_token: ...
//! client_id: ...
//! client_secret: ...
//! refresh_token: ...
//! login_customer_id: 123-456-7890   # optional, manager account
//! ```
//!
//! Locations are searched in order: the explicit path (`GOOGLE_ADS_CREDENTIALS`),
//! `./google-ads.yaml`, then `~/google-ads.yaml`.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;
use serde_yaml::Value as YamlValue;
use tracing::{debug, info};

use super::error::{Error, Result};
use crate::domains::ads::types::CustomerId;

/// File name looked up in the working and home directories.
pub const CREDENTIALS_FILE: &str = "google-ads.yaml";

/// Static OAuth credentials for the Google Ads API.
///
/// Secret fields only leave their wrapper through `expose_secret()`, which the
/// REST client calls when building a request. `Debug` output redacts them.
#[derive(Debug)]
pub struct Credentials {
    pub developer_token: SecretString,
    pub client_id: String,
    pub client_secret: SecretString,
    pub refresh_token: SecretString,
    /// Manager account the requests are made through, digits only.
    pub login_customer_id: Option<String>,
}

/// File layout; unknown keys (e.g. `use_proto_plus`) are ignored.
#[derive(Deserialize)]
struct CredentialFile {
    developer_token: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    refresh_token: Option<String>,
    login_customer_id: Option<YamlValue>,
}

/// `<FILL_ME_IN>`-style values left over from the example file.
fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || (value.starts_with('<') && value.ends_with('>'))
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !is_placeholder(&v) => Ok(v.trim().to_string()),
        Some(_) => Err(Error::config(format!(
            "credential '{field}' is not filled in"
        ))),
        None => Err(Error::config(format!("credential '{field}' is missing"))),
    }
}

fn login_customer_id(value: Option<YamlValue>) -> Result<Option<String>> {
    let text = match value {
        None | Some(YamlValue::Null) => return Ok(None),
        Some(YamlValue::String(s)) => s,
        Some(YamlValue::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(Error::config(format!(
                "login_customer_id must be a string or number, got {other:?}"
            )));
        }
    };
    if is_placeholder(&text) {
        return Ok(None);
    }
    CustomerId::parse(&text)
        .map(|id| Some(id.to_string()))
        .map_err(|e| Error::config(format!("login_customer_id: {e}")))
}

impl Credentials {
    /// Parse a YAML bundle.
    pub fn from_yaml(source: &str) -> Result<Self> {
        let file: CredentialFile = serde_yaml::from_str(source)?;
        Ok(Self {
            developer_token: SecretString::new(required("developer_token", file.developer_token)?),
            client_id: required("client_id", file.client_id)?,
            client_secret: SecretString::new(required("client_secret", file.client_secret)?),
            refresh_token: SecretString::new(required("refresh_token", file.refresh_token)?),
            login_customer_id: login_customer_id(file.login_customer_id)?,
        })
    }

    /// Read and parse a YAML bundle from disk.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|e| {
            Error::config(format!("{}: {}", path.display(), e))
        })
    }

    /// Locations searched by [`discover`](Self::discover), in order.
    pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(3);
        if let Some(path) = explicit {
            paths.push(path.to_path_buf());
        }
        paths.push(PathBuf::from(CREDENTIALS_FILE));
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(CREDENTIALS_FILE));
        }
        paths
    }

    /// Load the first bundle that exists.
    ///
    /// A file that exists but is malformed is an error; the search does not
    /// continue past it.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        for path in Self::candidate_paths(explicit) {
            if !path.is_file() {
                debug!("No credentials at {}", path.display());
                continue;
            }
            let credentials = Self::load_from_path(&path)?;
            info!("Loaded Google Ads credentials from {}", path.display());
            return Ok((credentials, path));
        }

        Err(Error::config(format!(
            "No {CREDENTIALS_FILE} found. Set GOOGLE_ADS_CREDENTIALS or copy \
             {CREDENTIALS_FILE}.example to {CREDENTIALS_FILE} and fill in your credentials."
        )))
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            developer_token: SecretString::new("dev-token".to_string()),
            client_id: "client.apps.googleusercontent.com".to_string(),
            client_secret: SecretString::new("secret".to_string()),
            refresh_token: SecretString::new("refresh".to_string()),
            login_customer_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID: &str = "\
developer_token: abc123
client_id: 42.apps.googleusercontent.com
client_secret: shh
refresh_token: 1//refresh
login_customer_id: 123-456-7890
use_proto_plus: true
";

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_bundle() {
        let file = write_temp(VALID);
        let credentials = Credentials::load_from_path(file.path()).unwrap();
        assert_eq!(credentials.developer_token.expose_secret(), "abc123");
        assert_eq!(credentials.client_secret.expose_secret(), "shh");
        assert_eq!(credentials.refresh_token.expose_secret(), "1//refresh");
        assert_eq!(credentials.login_customer_id.as_deref(), Some("1234567890"));
    }

    #[test]
    fn test_numeric_login_customer_id() {
        let yaml = VALID.replace("123-456-7890", "9876543210");
        let credentials = Credentials::from_yaml(&yaml).unwrap();
        assert_eq!(credentials.login_customer_id.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_placeholders_are_rejected() {
        let yaml = VALID.replace("abc123", "<YOUR_DEVELOPER_TOKEN>");
        let err = Credentials::from_yaml(&yaml).unwrap_err();
        assert!(err.to_string().contains("developer_token"));

        let yaml = VALID.replace("123-456-7890", "<MANAGER_ID>");
        let credentials = Credentials::from_yaml(&yaml).unwrap();
        assert_eq!(credentials.login_customer_id, None);
    }

    #[test]
    fn test_missing_field() {
        let yaml = VALID.replace("client_secret: shh\n", "");
        let err = Credentials::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("client_secret"));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Credentials::from_yaml("developer_token: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::from_yaml(VALID).unwrap();
        let debug_str = format!("{:?}", credentials);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("abc123"));
        assert!(!debug_str.contains("shh"));
        assert!(!debug_str.contains("1//refresh"));
        assert!(debug_str.contains("42.apps.googleusercontent.com"));
    }

    #[test]
    fn test_secret_fields_redacted_individually() {
        let credentials = Credentials::from_yaml(VALID).unwrap();
        for secret in [
            &credentials.developer_token,
            &credentials.client_secret,
            &credentials.refresh_token,
        ] {
            let rendered = format!("{secret:?}");
            assert!(rendered.contains("REDACTED"), "{rendered}");
        }
        assert!(!format!("{:?}", credentials.developer_token).contains("abc123"));
    }

    #[test]
    fn test_discover_prefers_explicit_path() {
        let file = write_temp(VALID);
        let (credentials, path) = Credentials::discover(Some(file.path())).unwrap();
        assert_eq!(path, file.path());
        assert_eq!(credentials.client_id, "42.apps.googleusercontent.com");
    }

    #[test]
    fn test_candidate_order() {
        let explicit = Path::new("/etc/ads/creds.yaml");
        let paths = Credentials::candidate_paths(Some(explicit));
        assert_eq!(paths[0], explicit);
        assert_eq!(paths[1], PathBuf::from(CREDENTIALS_FILE));
        assert!(paths.len() <= 3);
    }
}
