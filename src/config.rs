//! Command-line configuration for the key generator.

use crate::keys::{DEFAULT_SEED_ROUNDS, Network};
use clap::Parser;

/// Bitcoin key pair and address generator
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Network to generate for: main or test
    #[arg(short, long, default_value = "main")]
    pub network: Network,

    /// Use the uncompressed public key encoding
    #[arg(short, long, default_value = "false")]
    pub uncompressed: bool,

    /// Derive the private key deterministically from this seed phrase
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Number of SHA-256 rounds applied to the seed
    #[arg(short, long, default_value_t = DEFAULT_SEED_ROUNDS)]
    pub rounds: u32,

    /// Decode an address and print its public key hash instead of generating
    #[arg(short, long)]
    pub decode: Option<String>,

    /// Import a WIF private key and print its public key and address
    #[arg(short = 'w', long)]
    pub import_wif: Option<String>,
}

impl Config {
    /// Whether public keys are serialized compressed
    pub fn compressed(&self) -> bool {
        !self.uncompressed
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::InvalidRounds);
        }

        let modes = [
            self.seed.is_some(),
            self.decode.is_some(),
            self.import_wif.is_some(),
        ];
        if modes.iter().filter(|&&set| set).count() > 1 {
            return Err(ConfigError::ConflictingModes);
        }

        if let Some(seed) = &self.seed
            && seed.is_empty()
        {
            return Err(ConfigError::EmptySeed);
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("--rounds must be at least 1")]
    InvalidRounds,

    #[error("--seed, --decode and --import-wif are mutually exclusive")]
    ConflictingModes,

    #[error("--seed cannot be empty")]
    EmptySeed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_config() -> Config {
        Config {
            network: Network::Main,
            uncompressed: false,
            seed: None,
            rounds: DEFAULT_SEED_ROUNDS,
            decode: None,
            import_wif: None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = make_test_config();
        assert!(config.validate().is_ok());
        assert!(config.compressed());
    }

    #[test]
    fn test_zero_rounds() {
        let config = Config {
            rounds: 0,
            ..make_test_config()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRounds)));
    }

    #[test]
    fn test_conflicting_modes() {
        let config = Config {
            seed: Some("phrase".into()),
            decode: Some("1F1Pn2y6pDb68E5nYJJeba4TLg2U7B6KF1".into()),
            ..make_test_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ConflictingModes)
        ));
    }

    #[test]
    fn test_empty_seed() {
        let config = Config {
            seed: Some(String::new()),
            ..make_test_config()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptySeed)));
    }

    #[test]
    fn test_help_lists_networks() {
        use clap::CommandFactory;

        let help = Config::command().render_help().to_string();
        assert!(help.contains("possible values: main, test"));

        let config = Config::try_parse_from(["bitaddr", "-n", "testnet"]).unwrap();
        assert_eq!(config.network, Network::Test);
    }

    #[test]
    fn test_parse_arguments() {
        let config =
            Config::try_parse_from(["bitaddr", "--network", "test", "-u", "--seed", "abc"])
                .unwrap();
        assert_eq!(config.network, Network::Test);
        assert!(!config.compressed());
        assert_eq!(config.seed.as_deref(), Some("abc"));
        assert_eq!(config.rounds, DEFAULT_SEED_ROUNDS);

        assert!(Config::try_parse_from(["bitaddr", "--network", "regtest"]).is_err());
    }
}
