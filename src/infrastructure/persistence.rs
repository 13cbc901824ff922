use crate::domain::Catalog;
use crate::infrastructure::relay::RelayConfig;
use std::fs;

pub struct ConfigRepository;

impl ConfigRepository {
    pub fn load_catalog(filename: &str) -> Result<Catalog, String> {
        match fs::read_to_string(filename) {
            Ok(content) => match serde_json::from_str::<Catalog>(&content) {
                Ok(catalog) if catalog.is_empty() => {
                    Err(format!("{} contains no products", filename))
                }
                Ok(catalog) => Ok(catalog),
                Err(e) => Err(format!("Invalid catalog file - {}", e)),
            },
            Err(e) => Err(e.to_string()),
        }
    }

    pub fn load_relay_config(filename: &str) -> Result<RelayConfig, String> {
        match fs::read_to_string(filename) {
            Ok(content) => match serde_json::from_str::<RelayConfig>(&content) {
                Ok(config) => Ok(config),
                Err(e) => Err(format!("Invalid relay config file - {}", e)),
            },
            Err(e) => Err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_catalog_round_trip() {
        let catalog = Catalog::sample();
        let json = serde_json::to_string_pretty(&catalog).unwrap();

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = ConfigRepository::load_catalog(file.path().to_str().unwrap()).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.get(0).unwrap().id, "smores-hershey");
        assert_eq!(loaded.find("red-velvet-oreo").unwrap().reviews, vec![5, 5, 5]);
    }

    #[test]
    fn test_load_catalog_rejects_empty() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"products": []}"#).unwrap();

        let result = ConfigRepository::load_catalog(file.path().to_str().unwrap());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let result = ConfigRepository::load_catalog("/no/such/menu.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_relay_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"service_id": "svc", "template_id": "tpl", "public_key": "key"}"#,
        )
        .unwrap();

        let config = ConfigRepository::load_relay_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.service_id, "svc");
        assert_eq!(config.template_id, "tpl");
        assert_eq!(config.public_key, "key");
        // Endpoint falls back to the EmailJS default when omitted
        assert!(config.endpoint.starts_with("https://api.emailjs.com"));
    }

    #[test]
    fn test_load_relay_config_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let result = ConfigRepository::load_relay_config(file.path().to_str().unwrap());
        assert!(result.is_err());
    }
}
