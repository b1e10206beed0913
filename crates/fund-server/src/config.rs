//! Server configuration loaded from the environment.

use anyhow::{bail, Context};
use fund_aggregator::{AggregatorConfig, DEFAULT_FIAT_CURRENCY, DEFAULT_MAX_CONCURRENT_FETCHES};
use fund_ingestion::config::{env_key, optional_var, required_var};
use fund_ingestion::{BtcPayConfig, StripeConfig};

/// Default port for the server.
pub const DEFAULT_PORT: u16 = 3000;

/// Default host for the server.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Funds served when `FUNDS` is not set.
pub const DEFAULT_FUNDS: &str = "monero,firo,privacy_guides,general";

/// Everything the binary needs to start.
#[derive(Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Shared invoice-provider connection.
    pub btcpay: BtcPayConfig,
    pub funds: Vec<FundConfig>,
}

/// Per-fund provider accounts.
#[derive(Debug)]
pub struct FundConfig {
    pub name: String,
    pub aggregator: AggregatorConfig,
    pub stripe: StripeConfig,
}

impl ServerConfig {
    /// Load from `HOST`, `PORT`, `FUNDS`, `FETCH_CONCURRENCY`, `FIAT_CURRENCY`
    /// and the provider variables of every listed fund.
    pub fn from_env() -> anyhow::Result<Self> {
        let host = optional_var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match optional_var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let concurrency = match optional_var("FETCH_CONCURRENCY") {
            Some(raw) => parse_concurrency(&raw)?,
            None => DEFAULT_MAX_CONCURRENT_FETCHES,
        };
        let fiat = optional_var("FIAT_CURRENCY").unwrap_or_else(|| DEFAULT_FIAT_CURRENCY.to_string());

        let btcpay = BtcPayConfig::from_env()?;

        let names = parse_funds(&optional_var("FUNDS").unwrap_or_else(|| DEFAULT_FUNDS.to_string()));
        if names.is_empty() {
            bail!("FUNDS lists no funds");
        }

        let mut funds = Vec::with_capacity(names.len());
        for name in names {
            let store_id = required_var(&format!("BTCPAY_{}_STORE_ID", env_key(&name)))?;
            let stripe = StripeConfig::from_env_for_fund(&name)?;
            funds.push(FundConfig {
                aggregator: AggregatorConfig::new(store_id)
                    .with_max_concurrent_fetches(concurrency)
                    .with_fiat_currency(fiat.clone()),
                stripe,
                name,
            });
        }

        Ok(Self {
            host,
            port,
            btcpay,
            funds,
        })
    }

    /// Address to bind, `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Split a comma-separated fund list, dropping blanks and duplicates.
pub fn parse_funds(raw: &str) -> Vec<String> {
    let mut funds: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !funds.iter().any(|f| f == name) {
            funds.push(name.to_string());
        }
    }
    funds
}

fn parse_concurrency(raw: &str) -> anyhow::Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => bail!("FETCH_CONCURRENCY must be a positive integer, got {:?}", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_funds() {
        assert_eq!(parse_funds("monero, firo,,general "), vec!["monero", "firo", "general"]);
        assert_eq!(parse_funds("monero,monero"), vec!["monero"]);
        assert!(parse_funds(" , ").is_empty());
    }

    #[test]
    fn test_default_funds() {
        assert_eq!(parse_funds(DEFAULT_FUNDS).len(), 4);
    }

    #[test]
    fn test_parse_concurrency() {
        assert_eq!(parse_concurrency("8").unwrap(), 8);
        assert!(parse_concurrency("0").is_err());
        assert!(parse_concurrency("many").is_err());
    }
}
