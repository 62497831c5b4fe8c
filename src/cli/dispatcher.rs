use crate::api::client::RateCardClient;
use crate::cli::main_types::Commands;
use crate::error::AppError;
use crate::storage::config::Config;
use crate::storage::credentials::Credentials;
use crate::utils::logging::VerboseLogger;
use crate::utils::validation::validate_url;

pub struct Dispatcher {
    pub(super) config: Config,
    pub(super) config_path: Option<std::path::PathBuf>,
    pub(super) credentials: Credentials,
    pub(super) logger: VerboseLogger,
    pub(super) api_key: Option<String>,
}

impl Dispatcher {
    pub fn new(
        config: Config,
        config_path: Option<std::path::PathBuf>,
        credentials: Credentials,
        verbose: bool,
        api_key: Option<String>,
    ) -> Self {
        Self {
            config,
            config_path,
            credentials,
            logger: VerboseLogger::new(verbose),
            api_key,
        }
    }

    pub(super) fn log_verbose(&self, msg: &str) {
        self.logger.log(msg);
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Generate {
                quote_id,
                quote_date,
                e2e_tier,
                cod_tier,
                lm_tier,
                lm_solution,
                set,
            } => {
                self.handle_generate(
                    quote_id,
                    quote_date,
                    e2e_tier,
                    cod_tier,
                    lm_tier,
                    lm_solution,
                    set,
                )
                .await
            }
            Commands::Options { quote_id } => self.handle_options(quote_id).await,
            Commands::Auth { command } => self.handle_auth_command(command).await,
            Commands::Config { command } => self.handle_config_command(command).await,
        }
    }

    /// Build the HTTP client for the active profile. The `--api-key` flag
    /// (or env) takes priority over the keyring-stored key.
    pub(super) fn build_client(&self) -> Result<RateCardClient, AppError> {
        let service_url = self
            .config
            .get_profile(&self.credentials.profile_name)
            .map(|p| p.service_url.clone())
            .unwrap_or_else(|| "http://localhost:3000".to_string());
        validate_url(&service_url)?;

        let api_key = self
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| self.credentials.api_key().map(str::to_string));

        let client = match api_key {
            Some(key) => RateCardClient::with_api_key(service_url, key)?,
            None => RateCardClient::new(service_url)?,
        };
        Ok(client)
    }
}
