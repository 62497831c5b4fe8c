//! Subcommand handlers for the dispatcher.

use crate::cli::dispatcher::Dispatcher;
use crate::cli::main_types::{AuthCommands, ConfigCommands};
use crate::core::form::{FieldName, FormSession, QueryState, SubmitOutcome};
use crate::core::services::{PicklistSource, RateLookup, RecordSource, SolutionLookup};
use crate::display::TableDisplay;
use crate::error::{AppError, CliError, FormError};
use crate::storage::config::Profile;
use crate::storage::credentials::Credentials;
use crate::utils::logging::log_warning;
use crate::utils::validation::{
    parse_field_override, validate_api_key, validate_quote_date, validate_url,
};
use std::sync::Arc;

impl Dispatcher {
    fn build_session(&self) -> Result<FormSession, AppError> {
        let client = Arc::new(self.build_client()?);
        Ok(FormSession::new(
            Arc::clone(&client) as Arc<dyn RecordSource>,
            Arc::clone(&client) as Arc<dyn PicklistSource>,
            Arc::clone(&client) as Arc<dyn SolutionLookup>,
            client as Arc<dyn RateLookup>,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) async fn handle_generate(
        &mut self,
        quote_id: String,
        quote_date: Option<String>,
        e2e_tier: Option<String>,
        cod_tier: Option<String>,
        lm_tier: Option<String>,
        lm_solution: Option<String>,
        set: Vec<String>,
    ) -> Result<(), AppError> {
        self.log_verbose(&format!("Generating rate cards for quote {}", quote_id));

        let mut session = self.build_session()?;
        session.load(&quote_id).await;

        if let Some(date) = quote_date {
            validate_quote_date(&date)?;
            session.set_input("quoteDate", &date).await;
        }
        if let Some(value) = e2e_tier {
            session.set_input("e2eRateTier", &value).await;
        }
        if let Some(value) = cod_tier {
            session.set_input("codRateTier", &value).await;
        }
        if let Some(value) = lm_tier {
            session.set_input("lmRateTier", &value).await;
        }
        if let Some(value) = lm_solution {
            session.set_input("lmSolution", &value).await;
        }
        for raw in set {
            let (name, value) = parse_field_override(&raw)?;
            if FieldName::from_input_name(&name).is_none() {
                log_warning(&format!("Unknown filter field '{}', ignored", name));
            }
            session.set_input(&name, &value).await;
        }

        let display = TableDisplay::new();
        println!("Quote filters:");
        println!("{}", display.render_filter_values(session.bindings()));

        match session.submit().await {
            SubmitOutcome::Rejected(outcome) => {
                // Feedback for every failing field, not only the first one.
                for validity in outcome.fields.iter().filter(|f| !f.valid) {
                    eprintln!(
                        "❌ {}: {}",
                        validity.field.label(),
                        validity.message.as_deref().unwrap_or("required")
                    );
                }
                return Err(FormError::Validation {
                    missing: outcome.missing_fields(),
                }
                .into());
            }
            SubmitOutcome::Completed(QueryState::Failed(e)) => {
                return Err(FormError::Query(e.clone()).into());
            }
            SubmitOutcome::Completed(_) => {}
        }

        println!("{}", display.render_rate_rows(session.view().rows())?);
        println!("{} rate card(s) found", session.view().len());
        Ok(())
    }

    pub(super) async fn handle_options(&mut self, quote_id: String) -> Result<(), AppError> {
        self.log_verbose(&format!("Listing filter options for quote {}", quote_id));

        let mut session = self.build_session()?;
        session.load(&quote_id).await;

        let display = TableDisplay::new();
        println!("Quote filters:");
        println!("{}", display.render_filter_values(session.bindings()));

        for field in [
            FieldName::E2eRateTier,
            FieldName::LmRateTier,
            FieldName::CodRateTier,
        ] {
            println!(
                "{}",
                display.render_option_set(field.label(), session.options().static_options(field))
            );
        }
        println!(
            "{}",
            display.render_option_set(
                FieldName::LmSolution.label(),
                session.options().solution_options()
            )
        );
        Ok(())
    }

    pub(super) async fn handle_auth_command(
        &mut self,
        commands: AuthCommands,
    ) -> Result<(), AppError> {
        match commands {
            AuthCommands::SetKey { key } => {
                self.log_verbose("Attempting auth set-key command");
                validate_api_key(&key)?;
                Credentials::save_api_key_for_profile(&self.credentials.profile_name, &key)?;
                println!(
                    "✅ API key stored for profile: {}",
                    self.credentials.profile_name
                );
                Ok(())
            }
            AuthCommands::Clear => {
                self.log_verbose("Attempting auth clear command");
                Credentials::clear_api_key_for_profile(&self.credentials.profile_name)?;
                println!(
                    "✅ API key cleared for profile: {}",
                    self.credentials.profile_name
                );
                Ok(())
            }
            AuthCommands::Status => {
                self.log_verbose("Attempting auth status command");

                println!("Authentication Status:");
                println!("=====================");

                match self
                    .api_key
                    .as_deref()
                    .filter(|key| !key.is_empty())
                    .map(str::to_string)
                    .or_else(|| self.credentials.masked_api_key())
                {
                    Some(_) => {
                        let masked = self
                            .credentials
                            .masked_api_key()
                            .unwrap_or_else(|| "(from --api-key / env)".to_string());
                        println!("API Key: {}", masked);
                    }
                    None => println!("API Key: (not set)"),
                }

                println!("\nActive Profile: {}", self.credentials.profile_name);
                Ok(())
            }
        }
    }

    pub(super) async fn handle_config_command(
        &mut self,
        commands: ConfigCommands,
    ) -> Result<(), AppError> {
        match commands {
            ConfigCommands::Show => {
                self.log_verbose("Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");

                if let Some(default_profile) = &self.config.default_profile {
                    println!("Default Profile: {}", default_profile);
                } else {
                    println!("Default Profile: (not set)");
                }

                println!("\nProfiles:");
                if self.config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    for (name, profile) in &self.config.profiles {
                        println!("  [{}]", name);
                        println!("    Service URL: {}", profile.service_url);
                        if let Some(timeout) = profile.timeout_seconds {
                            println!("    Timeout: {} seconds", timeout);
                        }
                    }
                }

                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                self.log_verbose(&format!(
                    "Attempting config set - key: {}, value: {}",
                    key, value
                ));

                match key.as_str() {
                    "default_profile" => {
                        self.config.default_profile = Some(value.clone());
                    }
                    "service_url" => {
                        validate_url(&value)?;
                        let profile_name = self.credentials.profile_name.clone();
                        match self.config.profiles.get_mut(&profile_name) {
                            Some(profile) => profile.service_url = value.clone(),
                            None => self.config.set_profile(
                                profile_name,
                                Profile {
                                    service_url: value.clone(),
                                    timeout_seconds: None,
                                },
                            ),
                        }
                    }
                    "timeout_seconds" => {
                        let timeout: u64 = value.parse().map_err(|_| {
                            CliError::InvalidArguments(format!(
                                "Invalid timeout '{}': expected a number of seconds",
                                value
                            ))
                        })?;
                        let profile_name = self.credentials.profile_name.clone();
                        match self.config.profiles.get_mut(&profile_name) {
                            Some(profile) => profile.timeout_seconds = Some(timeout),
                            None => self.config.set_profile(
                                profile_name,
                                Profile {
                                    service_url: "http://localhost:3000".to_string(),
                                    timeout_seconds: Some(timeout),
                                },
                            ),
                        }
                    }
                    _ => {
                        return Err(CliError::InvalidArguments(format!(
                            "Unknown configuration key '{}'. Valid keys: default_profile, service_url, timeout_seconds",
                            key
                        ))
                        .into());
                    }
                }

                self.config.save(self.config_path.clone())?;
                println!("✅ Set {} = {}", key, value);
                Ok(())
            }
        }
    }
}
