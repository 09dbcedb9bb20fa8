use std::path::{Path, PathBuf};

use cratedigger_core::{CatalogItem, ListingRef, MediaFormat};
use cratedigger_engine::{MarketConfig, Marketplace};
use cratedigger_storage::{KvBackend, SqliteKvStore, Store, StorageError};
use tempfile::TempDir;

type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

/// A marketplace session backed by a SQLite file in a temporary directory.
///
/// `reopen` drops the session and opens a new one on the same file, the way
/// a browser reload would.
pub struct TestShop {
    pub market: Marketplace,
    path: PathBuf,
    _dir: TempDir,
}

impl TestShop {
    pub fn new() -> TestResult<Self> {
        Self::with_config(MarketConfig::default())
    }

    pub fn with_config(config: MarketConfig) -> TestResult<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("shop.db");
        let market = open_market(&path, config)?;
        Ok(Self {
            market,
            path,
            _dir: dir,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn reopen(&mut self) -> Result<(), StorageError> {
        let config = self.market.config().clone();
        // Close the old connection before opening the file again.
        let placeholder = Marketplace::with_config(Store::in_memory(), config.clone());
        drop(std::mem::replace(&mut self.market, placeholder));
        self.market = open_market(&self.path, config)?;
        Ok(())
    }

    /// Write raw text under `key`, bypassing JSON encoding.
    pub fn corrupt(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        let mut store = SqliteKvStore::open(&self.path)?;
        store.set(key, raw)
    }
}

fn open_market(path: &Path, config: MarketConfig) -> Result<Marketplace, StorageError> {
    let store = Store::new(SqliteKvStore::open(path)?);
    Ok(Marketplace::with_config(store, config))
}

pub fn album(title: &str, artist: &str, price: f64) -> CatalogItem {
    CatalogItem {
        id: None,
        title: title.into(),
        artist: artist.into(),
        price,
        condition: "Very Good".into(),
        year: 1991,
        image_url: format!("https://img.example/{}.jpg", title.to_lowercase().replace(' ', "-")),
        product_type: Some(MediaFormat::Vinyl),
    }
}

pub fn nevermind() -> CatalogItem {
    album("Nevermind", "Nirvana", 25.0)
}

/// A catalog auction lot that is not one of the seller's listings.
pub fn auction_lot(title: &str, artist: &str, current_price: f64) -> ListingRef {
    let item = album(title, artist, current_price);
    ListingRef {
        id: item.identity(),
        title: item.title,
        artist: item.artist,
        image_url: item.image_url,
        current_price,
    }
}
