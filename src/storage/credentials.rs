use super::Result;
use std::env;

#[cfg(not(test))]
use keyring::Entry;

const API_KEY_ENV: &str = "RATECARD_API_KEY";

/// API key resolution for a profile. The environment variable takes
/// priority; the OS keyring is the persistent fallback.
#[derive(Debug, Clone)]
pub struct Credentials {
    api_key: Option<String>,
    pub profile_name: String,
}

impl Credentials {
    pub fn new(profile_name: String) -> Self {
        Self {
            api_key: None,
            profile_name,
        }
    }

    pub fn load(profile_name: &str) -> Result<Self> {
        let mut credentials = Self::new(profile_name.to_string());
        credentials.api_key = match env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Some(key),
            _ => credentials.load_keyring_entry()?,
        };
        Ok(credentials)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Masked rendering for status output; never print the raw key.
    /// Indexed by chars, not bytes: the env path accepts arbitrary UTF-8.
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let chars: Vec<char> = key.chars().collect();
            if chars.len() > 8 {
                let head: String = chars[..4].iter().collect();
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("{}...{}", head, tail)
            } else {
                "*****".to_string()
            }
        })
    }

    pub fn save_api_key_for_profile(profile_name: &str, api_key: &str) -> Result<()> {
        let mut credentials = Self::new(profile_name.to_string());
        credentials.api_key = Some(api_key.to_string());
        credentials.save_keyring_entry()?;
        Ok(())
    }

    pub fn clear_api_key_for_profile(profile_name: &str) -> Result<()> {
        let credentials = Self::new(profile_name.to_string());
        credentials.delete_keyring_entry()?;
        Ok(())
    }

    #[cfg(not(test))]
    fn load_keyring_entry(&self) -> Result<Option<String>> {
        let entry = Entry::new("ratecard-cli", &format!("api-key-{}", self.profile_name))
            .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

        match entry.get_password() {
            Ok(v) => Ok(Some(v)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(crate::error::StorageError::KeyringError(e.to_string())),
        }
    }

    #[cfg(not(test))]
    fn save_keyring_entry(&self) -> Result<()> {
        if let Some(key) = &self.api_key {
            let entry = Entry::new("ratecard-cli", &format!("api-key-{}", self.profile_name))
                .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

            entry
                .set_password(key)
                .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;
        }

        Ok(())
    }

    #[cfg(not(test))]
    fn delete_keyring_entry(&self) -> Result<()> {
        let entry = Entry::new("ratecard-cli", &format!("api-key-{}", self.profile_name))
            .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

        match entry.delete_credential() {
            Ok(_) => Ok(()),
            // Entry doesn't exist, which is fine for a clear
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(crate::error::StorageError::KeyringError(e.to_string())),
        }
    }

    #[cfg(test)]
    fn load_keyring_entry(&self) -> Result<Option<String>> {
        println!("MOCK: Loading api key for profile {}", self.profile_name);
        Ok(None)
    }

    #[cfg(test)]
    fn save_keyring_entry(&self) -> Result<()> {
        println!("MOCK: Saving api key for profile {}", self.profile_name);
        Ok(())
    }

    #[cfg(test)]
    fn delete_keyring_entry(&self) -> Result<()> {
        println!("MOCK: Deleting api key for profile {}", self.profile_name);
        Ok(())
    }
}
