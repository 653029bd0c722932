//! Rate source trait and the table it returns

use heapless::{LinearMap, String};

use crate::config::{MAX_PAIR_LEN, MAX_RATE_PAIRS};

/// Currency pair symbol, e.g. "USDBTC"
pub type PairSymbol = String<MAX_PAIR_LEN>;

/// Errors reported by a rate source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Connection or transport failure
    Transport,
    /// Server answered with a non-success status code
    Status(u16),
    /// Response body could not be decoded
    Decode,
    /// No response in time
    Timeout,
}

impl core::fmt::Display for FetchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FetchError::Transport => f.write_str("transport failure"),
            FetchError::Status(code) => write!(f, "unexpected status {}", code),
            FetchError::Decode => f.write_str("undecodable response"),
            FetchError::Timeout => f.write_str("request timed out"),
        }
    }
}

/// Returned when a rate table cannot take another entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateTableFull;

/// Mapping of currency-pair symbol to rate
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: LinearMap<PairSymbol, f64, MAX_RATE_PAIRS>,
}

impl RateTable {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            rates: LinearMap::new(),
        }
    }

    /// Insert or replace a rate
    ///
    /// Fails if the table is full or the symbol is longer than
    /// [`MAX_PAIR_LEN`].
    pub fn insert(&mut self, pair: &str, rate: f64) -> Result<(), RateTableFull> {
        let symbol = PairSymbol::try_from(pair).map_err(|_| RateTableFull)?;
        self.rates
            .insert(symbol, rate)
            .map(|_| ())
            .map_err(|_| RateTableFull)
    }

    /// Look up a pair
    pub fn get(&self, pair: &str) -> Option<f64> {
        self.rates
            .iter()
            .find(|(symbol, _)| symbol.as_str() == pair)
            .map(|(_, rate)| *rate)
    }

    /// Number of pairs in the table
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Trait for the remote exchange-rate source
#[allow(async_fn_in_trait)]
pub trait RateProvider {
    /// Fetch the current rate table
    async fn fetch(&mut self) -> Result<RateTable, FetchError>;
}

impl<T: RateProvider + ?Sized> RateProvider for &mut T {
    async fn fetch(&mut self) -> Result<RateTable, FetchError> {
        T::fetch(self).await
    }
}
