//! Immutable snapshot of all shops for one refresh cycle

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result, ValidationError};
use crate::models::ShopRecord;

/// SHA-256 of raw source content, hex encoded
pub fn fingerprint(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Validated shops in source order, keyed by name
#[derive(Debug, Clone)]
pub struct Dataset {
    shops: Vec<ShopRecord>,
    index: HashMap<String, usize>,
    /// Where the data came from ("mock" or a file path)
    origin: String,
    fingerprint: String,
    loaded_at: DateTime<Utc>,
}

/// Metadata about a loaded dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    pub origin: String,
    pub fingerprint: String,
    pub shop_count: usize,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Validate every record and reject duplicate names
    pub fn new(
        shops: Vec<ShopRecord>,
        origin: impl Into<String>,
        fingerprint: impl Into<String>,
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(shops.len());

        for (i, shop) in shops.iter().enumerate() {
            shop.validate()?;
            if index.insert(shop.name.clone(), i).is_some() {
                return Err(ValidationError::DuplicateName(shop.name.clone()).into());
            }
        }

        Ok(Self {
            shops,
            index,
            origin: origin.into(),
            fingerprint: fingerprint.into(),
            loaded_at: Utc::now(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&ShopRecord> {
        self.index.get(name).map(|&i| &self.shops[i])
    }

    /// Find a shop by exact name, then by a unique case-insensitive match on
    /// the display name or a name prefix
    pub fn resolve(&self, query: &str) -> Result<&ShopRecord> {
        if let Some(shop) = self.get(query) {
            return Ok(shop);
        }

        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(Error::NotFound("empty shop name".into()));
        }

        let matches: Vec<&ShopRecord> = self
            .shops
            .iter()
            .filter(|s| {
                s.display_name().to_lowercase() == needle
                    || s.name.to_lowercase().starts_with(&needle)
            })
            .collect();

        match matches.as_slice() {
            [shop] => Ok(*shop),
            [] => Err(Error::NotFound(format!("shop '{}'", query))),
            many => Err(Error::AmbiguousShop {
                query: query.to_string(),
                matches: many.iter().map(|s| s.name.clone()).collect(),
            }),
        }
    }

    pub fn shops(&self) -> &[ShopRecord] {
        &self.shops
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shops.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.shops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            origin: self.origin.clone(),
            fingerprint: self.fingerprint.clone(),
            shop_count: self.shops.len(),
            loaded_at: self.loaded_at,
        }
    }
}
