//! Cart storage
//!
//! The cart is scoped to one shopper profile and persisted locally. Nothing is
//! synchronised to the server; the server only ever sees an order.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use super::Cart;

/// Errors from reading or writing a stored cart.
#[derive(Debug, Error)]
pub enum CartStorageError {
    /// File system error
    #[error("cart storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stored cart could not be encoded or decoded
    #[error("stored cart is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable key-value persistence for a single cart.
pub trait CartStorage {
    /// Load the stored cart, if one was ever saved.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStorageError`] if the stored cart cannot be read.
    fn load(&self) -> Result<Option<Cart>, CartStorageError>;

    /// Replace the stored cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStorageError`] if the cart cannot be written.
    fn save(&mut self, cart: &Cart) -> Result<(), CartStorageError>;
}

/// Keeps the cart in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryCartStorage {
    cart: Option<Cart>,
    saves: usize,
}

impl MemoryCartStorage {
    /// Storage that already holds a cart.
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart: Some(cart),
            saves: 0,
        }
    }

    /// The last saved cart.
    pub fn stored(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    /// How many times the cart has been saved.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Option<Cart>, CartStorageError> {
        Ok(self.cart.clone())
    }

    fn save(&mut self, cart: &Cart) -> Result<(), CartStorageError> {
        self.cart = Some(cart.clone());
        self.saves += 1;

        Ok(())
    }
}

/// Stores the cart as a JSON document on disk.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash mid-write never leaves a truncated cart behind.
#[derive(Debug, Clone)]
pub struct JsonFileCartStorage {
    path: PathBuf,
}

impl JsonFileCartStorage {
    /// Storage backed by the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the cart file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");

        self.path.with_file_name(name)
    }
}

impl CartStorage for JsonFileCartStorage {
    fn load(&self) -> Result<Option<Cart>, CartStorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&mut self, cart: &Cart) -> Result<(), CartStorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();

        fs::write(&temp_path, serde_json::to_vec_pretty(cart)?)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }
}
