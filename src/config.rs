use anyhow::Result;
use serde::Deserialize;

use crate::permission::{PermissionStatus, RequestVerdict};
use crate::recognition::{LanguageModel, ListenConfig};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub permission: PermissionConfig,
    #[serde(default)]
    pub recognition: RecognitionConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

/// How the demo's fixed permission adapter answers the gate.
#[derive(Debug, Deserialize)]
pub struct PermissionConfig {
    /// The platform already granted microphone access at startup.
    #[serde(default)]
    pub pre_granted: bool,
    /// The platform advises showing a rationale before requesting.
    #[serde(default)]
    pub rationale_advised: bool,
    /// Simulated user decision when the system prompt is shown.
    #[serde(default)]
    pub verdict: RequestVerdict,
}

impl PermissionConfig {
    pub fn status(&self) -> PermissionStatus {
        if self.pre_granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::NotGranted {
                rationale_advised: self.rationale_advised,
            }
        }
    }
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            pre_granted: false,
            rationale_advised: false,
            verdict: RequestVerdict::Granted,
        }
    }
}

/// Which recognizer integration to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    #[default]
    Scripted,
    System,
}

#[derive(Debug, Deserialize)]
pub struct RecognitionConfig {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub language_model: LanguageModel,
    /// IETF language tag forwarded to the service.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_partial_results")]
    pub partial_results: bool,
    /// JSON script for the scripted backend. The built-in demo script is
    /// used when unset.
    #[serde(default)]
    pub script_path: Option<String>,
}

impl RecognitionConfig {
    pub fn listen_config(&self) -> ListenConfig {
        ListenConfig {
            language_model: self.language_model,
            language: self.language.clone(),
            partial_results: self.partial_results,
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Scripted,
            language_model: LanguageModel::FreeForm,
            language: None,
            partial_results: default_partial_results(),
            script_path: None,
        }
    }
}

fn default_partial_results() -> bool {
    true
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
