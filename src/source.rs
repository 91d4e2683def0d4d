//! Providers of secret codes.

use crate::config::{AppConfig, SourceKind};
use async_trait::async_trait;
use mastermind_core::{Code, Symbol, SymbolRange};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Produces `count` symbols drawn from `range`, in order, repeats allowed.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Generates a secret code.
    async fn generate(&self, count: usize, range: SymbolRange) -> Result<Code, SourceError>;
}

/// Error raised by a secret provider.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SourceError {
    /// The remote request failed.
    #[display("Random number request failed: {}", _0)]
    Request(String),

    /// A response line was not an integer.
    #[display("Malformed random number line: {line:?}")]
    Malformed {
        /// The offending line.
        line: String,
    },

    /// The provider returned the wrong number of symbols.
    #[display("Expected {expected} random numbers, got {actual}")]
    WrongCount {
        /// Requested count.
        expected: usize,
        /// Received count.
        actual: usize,
    },

    /// The provider returned a symbol outside the range.
    #[display("Random number {value} is outside {lower}-{upper}")]
    OutOfRange {
        /// The offending value.
        value: Symbol,
        /// Requested lower bound.
        lower: Symbol,
        /// Requested upper bound.
        upper: Symbol,
    },

    /// The provider cannot produce anything.
    #[display("Secret source unavailable: {}", _0)]
    Unavailable(String),
}

impl std::error::Error for SourceError {}

/// Thread-local generator from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

#[async_trait]
impl SecretSource for ThreadRngSource {
    #[instrument(skip(self))]
    async fn generate(&self, count: usize, range: SymbolRange) -> Result<Code, SourceError> {
        let mut rng = rand::rng();
        let symbols = (0..count)
            .map(|_| rng.random_range(range.lower()..=range.upper()))
            .collect::<Vec<_>>();
        debug!("Generated local secret");
        Ok(Code::new(symbols))
    }
}

/// Seeded generator for reproducible games.
#[derive(Debug)]
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    /// Creates a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

#[async_trait]
impl SecretSource for SeededSource {
    #[instrument(skip(self))]
    async fn generate(&self, count: usize, range: SymbolRange) -> Result<Code, SourceError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| SourceError::Unavailable("seeded generator lock poisoned".to_string()))?;
        let symbols = (0..count)
            .map(|_| rng.random_range(range.lower()..=range.upper()))
            .collect::<Vec<_>>();
        Ok(Code::new(symbols))
    }
}

/// Hands out prepared secrets in order, repeating the last one.
#[derive(Debug)]
pub struct FixedSource {
    queue: Mutex<VecDeque<Code>>,
    last: Mutex<Option<Code>>,
}

impl FixedSource {
    /// Creates a source that always returns `secret`.
    pub fn new(secret: impl Into<Code>) -> Self {
        Self::sequence(vec![secret.into()])
    }

    /// Creates a source that returns each secret in turn.
    pub fn sequence(secrets: Vec<Code>) -> Self {
        Self {
            queue: Mutex::new(secrets.into()),
            last: Mutex::new(None),
        }
    }
}

#[async_trait]
impl SecretSource for FixedSource {
    #[instrument(skip(self))]
    async fn generate(&self, count: usize, range: SymbolRange) -> Result<Code, SourceError> {
        let poisoned = || SourceError::Unavailable("fixed source lock poisoned".to_string());
        let mut queue = self.queue.lock().map_err(|_| poisoned())?;
        let mut last = self.last.lock().map_err(|_| poisoned())?;

        if let Some(next) = queue.pop_front() {
            *last = Some(next);
        }
        let secret = last
            .clone()
            .ok_or_else(|| SourceError::Unavailable("no secrets prepared".to_string()))?;
        check_secret(secret.symbols(), count, range)?;
        Ok(secret)
    }
}

/// The random.org integer generator.
#[derive(Debug, Clone)]
pub struct RandomOrgSource {
    client: reqwest::Client,
    url: String,
}

impl RandomOrgSource {
    /// Creates a client for `url` with a request timeout.
    #[instrument]
    pub fn new(url: String, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Request(e.to_string()))?;
        Ok(Self { client, url })
    }

    /// Full request URL for `count` integers in `range`.
    pub fn request_url(&self, count: usize, range: SymbolRange) -> String {
        format!(
            "{}?num={}&min={}&max={}&col=1&base=10&format=plain&rnd=new",
            self.url,
            count,
            range.lower(),
            range.upper()
        )
    }
}

#[async_trait]
impl SecretSource for RandomOrgSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn generate(&self, count: usize, range: SymbolRange) -> Result<Code, SourceError> {
        debug!("Requesting random numbers");
        let response = self
            .client
            .get(self.request_url(count, range))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(error = %e, "Random number request failed");
                SourceError::Request(e.to_string())
            })?;

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let secret = parse_plain_integers(&body, count, range)?;
        info!(count, "Fetched remote secret");
        Ok(secret)
    }
}

/// Parses a plain-text body with one integer per line.
#[instrument(skip(body))]
pub fn parse_plain_integers(
    body: &str,
    count: usize,
    range: SymbolRange,
) -> Result<Code, SourceError> {
    let symbols = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.parse::<Symbol>().map_err(|_| SourceError::Malformed {
                line: line.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    check_secret(&symbols, count, range)?;
    Ok(Code::new(symbols))
}

fn check_secret(symbols: &[Symbol], count: usize, range: SymbolRange) -> Result<(), SourceError> {
    if symbols.len() != count {
        return Err(SourceError::WrongCount {
            expected: count,
            actual: symbols.len(),
        });
    }
    if let Some((_, value)) = range.first_violation(symbols) {
        return Err(SourceError::OutOfRange {
            value,
            lower: range.lower(),
            upper: range.upper(),
        });
    }
    Ok(())
}

/// Builds the provider selected by `config`.
#[instrument(skip(config), fields(source = %config.source()))]
pub fn build_source(config: &AppConfig) -> Result<Arc<dyn SecretSource>, SourceError> {
    let source: Arc<dyn SecretSource> = match (config.source(), config.seed()) {
        (SourceKind::RandomOrg, _) => Arc::new(RandomOrgSource::new(
            config.random_org_url().clone(),
            Duration::from_secs(*config.request_timeout_secs()),
        )?),
        (SourceKind::Local, Some(seed)) => Arc::new(SeededSource::new(*seed)),
        (SourceKind::Local, None) => Arc::new(ThreadRngSource),
    };
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_integers() {
        let secret = parse_plain_integers("1\n1\n2\n4\n", 4, SymbolRange::default()).unwrap();
        assert_eq!(secret, Code::from([1, 1, 2, 4]));
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert_eq!(
            parse_plain_integers("1\nx\n2\n4\n", 4, SymbolRange::default()),
            Err(SourceError::Malformed { line: "x".to_string() })
        );
        assert_eq!(
            parse_plain_integers("1\n2\n", 4, SymbolRange::default()),
            Err(SourceError::WrongCount { expected: 4, actual: 2 })
        );
        assert_eq!(
            parse_plain_integers("1\n2\n3\n9\n", 4, SymbolRange::default()),
            Err(SourceError::OutOfRange { value: 9, lower: 0, upper: 7 })
        );
    }

    #[test]
    fn test_request_url_parameters() {
        let source =
            RandomOrgSource::new(default_url(), Duration::from_secs(5)).expect("client builds");
        let range = SymbolRange::new(1, 8).unwrap();
        assert_eq!(
            source.request_url(6, range),
            "https://www.random.org/integers/?num=6&min=1&max=8&col=1&base=10&format=plain&rnd=new"
        );
    }

    fn default_url() -> String {
        AppConfig::default().random_org_url().clone()
    }

    #[tokio::test]
    async fn test_seeded_source_is_reproducible() {
        let range = SymbolRange::default();
        let a = SeededSource::new(42).generate(8, range).await.unwrap();
        let b = SeededSource::new(42).generate(8, range).await.unwrap();
        assert_eq!(a, b);
        assert!(range.first_violation(a.symbols()).is_none());
    }

    #[tokio::test]
    async fn test_thread_rng_source_respects_range() {
        let range = SymbolRange::new(2, 3).unwrap();
        let secret = ThreadRngSource.generate(50, range).await.unwrap();
        assert_eq!(secret.len(), 50);
        assert!(secret.symbols().iter().all(|s| (2..=3).contains(s)));
    }

    #[tokio::test]
    async fn test_fixed_source_repeats_last() {
        let source =
            FixedSource::sequence(vec![Code::from([1, 2, 3, 4]), Code::from([4, 3, 2, 1])]);
        let range = SymbolRange::default();
        assert_eq!(source.generate(4, range).await.unwrap(), Code::from([1, 2, 3, 4]));
        assert_eq!(source.generate(4, range).await.unwrap(), Code::from([4, 3, 2, 1]));
        assert_eq!(source.generate(4, range).await.unwrap(), Code::from([4, 3, 2, 1]));
        assert!(matches!(
            source.generate(6, range).await,
            Err(SourceError::WrongCount { expected: 6, actual: 4 })
        ));
    }
}
