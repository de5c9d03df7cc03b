//! Client configuration

use crate::error::{ClientError, Result};
use crate::instruction::PROGRAM_ID;
use serde::{Deserialize, Deserializer};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use std::{str::FromStr, time::Duration};

/// Commitment level the client waits for before reporting success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(commitment: Commitment) -> Self {
        match commitment {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

/// Settings for `SubmissionClient` and `RpcLedger`
///
/// Every field has a default, so a TOML file only needs the values it changes:
///
/// ```toml
/// rpc_url = "https://api.devnet.solana.com"
/// commitment = "finalized"
/// confirmation_timeout_ms = 60000
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the cluster
    pub rpc_url: String,
    /// Address of the deployed program
    #[serde(deserialize_with = "deserialize_pubkey")]
    pub program_id: Pubkey,
    pub commitment: Commitment,
    /// How long to wait for finality after submission
    pub confirmation_timeout_ms: u64,
    /// Delay between two status queries
    pub poll_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8899".to_string(),
            program_id: PROGRAM_ID,
            commitment: Commitment::Confirmed,
            confirmation_timeout_ms: 30_000,
            poll_interval_ms: 500,
        }
    }
}

impl ClientConfig {
    /// Parses and validates a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ClientError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(ClientError::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.poll_interval_ms > self.confirmation_timeout_ms {
            return Err(ClientError::Config(format!(
                "poll_interval_ms ({}) exceeds confirmation_timeout_ms ({})",
                self.poll_interval_ms, self.confirmation_timeout_ms
            )));
        }
        Ok(())
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_millis(self.confirmation_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn commitment_config(&self) -> CommitmentConfig {
        self.commitment.into()
    }
}

fn deserialize_pubkey<'de, D>(deserializer: D) -> std::result::Result<Pubkey, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    Pubkey::from_str(&encoded).map_err(serde::de::Error::custom)
}
