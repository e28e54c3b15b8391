//! # Vaccine Catalog — Records and Lookup
//!
//! Bundled reference records for the vaccine products the verifier
//! recognizes, plus the lookup surface the acceptance rules consume.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hcert_core::ProductCode;

/// Errors while assembling a catalog from records.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two records share the same product code.
    #[error("duplicate product code in catalog: {0}")]
    DuplicateProduct(String),

    /// A record is structurally unusable.
    #[error("invalid catalog record for {product}: {reason}")]
    InvalidRecord {
        /// The product code of the offending record.
        product: String,
        /// Why the record was rejected.
        reason: String,
    },

    /// The record list could not be deserialized.
    #[error("catalog deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Reference metadata for one vaccine product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccine {
    /// Medicinal product code, e.g. `EU/1/20/1528`.
    pub product_code: ProductCode,

    /// Human-readable product name.
    pub name: String,

    /// Number of doses the product's full regimen requires.
    pub total_doses_required: u32,

    /// Disease the product targets, as a code.
    pub target_disease: String,
}

/// The outcome of a catalog lookup.
///
/// An explicit two-variant result: `NotFound` is a normal, expected outcome
/// for products authorized after this catalog was bundled, and callers must
/// decide what it means for verification rather than treating it as a
/// nullable slip-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogLookup<'a> {
    /// The product is known; its reference metadata.
    Found(&'a Vaccine),
    /// The product code is not in this catalog.
    NotFound,
}

impl<'a> CatalogLookup<'a> {
    /// The vaccine, if found.
    pub fn found(self) -> Option<&'a Vaccine> {
        match self {
            CatalogLookup::Found(v) => Some(v),
            CatalogLookup::NotFound => None,
        }
    }
}

/// Immutable product-code → [`Vaccine`] reference catalog.
///
/// Loaded once at process start, then only read. Shared freely across
/// threads — lookups take `&self` and there is no interior mutability.
#[derive(Debug, Clone, Default)]
pub struct VaccineCatalog {
    records: BTreeMap<String, Vaccine>,
}

impl VaccineCatalog {
    /// Build a catalog from a list of records.
    ///
    /// # Errors
    ///
    /// Rejects duplicate product codes and records whose
    /// `total_doses_required` is zero.
    pub fn from_records(records: Vec<Vaccine>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for record in records {
            if record.total_doses_required == 0 {
                return Err(CatalogError::InvalidRecord {
                    product: record.product_code.to_string(),
                    reason: "total_doses_required must be >= 1".into(),
                });
            }
            let key = record.product_code.as_str().to_string();
            if map.insert(key.clone(), record).is_some() {
                return Err(CatalogError::DuplicateProduct(key));
            }
        }
        Ok(Self { records: map })
    }

    /// Build a catalog from a serialized record list (JSON array).
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let records: Vec<Vaccine> = serde_json::from_slice(bytes)?;
        Self::from_records(records)
    }

    /// The bundled reference catalog.
    pub fn builtin() -> Self {
        // from_records only fails on duplicates or zero dose counts, which
        // the bundled data cannot contain.
        Self::from_records(builtin_records()).unwrap_or_default()
    }

    /// Look up a product code. Pure, no side effects.
    pub fn lookup(&self, product_code: &ProductCode) -> CatalogLookup<'_> {
        match self.records.get(product_code.as_str()) {
            Some(vaccine) => CatalogLookup::Found(vaccine),
            None => CatalogLookup::NotFound,
        }
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in product-code order.
    pub fn iter(&self) -> impl Iterator<Item = &Vaccine> {
        self.records.values()
    }
}

// ── Bundled reference records ────────────────────────────────────────

/// Disease code shared by every bundled product.
const TARGET_DISEASE_COVID19: &str = "840539006";

fn builtin_records() -> Vec<Vaccine> {
    vec![comirnaty(), spikevax(), vaxzevria(), janssen()]
}

/// Pfizer–BioNTech Comirnaty. Two-dose regimen.
fn comirnaty() -> Vaccine {
    Vaccine {
        product_code: ProductCode("EU/1/20/1528".into()),
        name: "Comirnaty".into(),
        total_doses_required: 2,
        target_disease: TARGET_DISEASE_COVID19.into(),
    }
}

/// Moderna Spikevax. Two-dose regimen.
fn spikevax() -> Vaccine {
    Vaccine {
        product_code: ProductCode("EU/1/20/1507".into()),
        name: "Spikevax".into(),
        total_doses_required: 2,
        target_disease: TARGET_DISEASE_COVID19.into(),
    }
}

/// AstraZeneca Vaxzevria. Two-dose regimen.
fn vaxzevria() -> Vaccine {
    Vaccine {
        product_code: ProductCode("EU/1/21/1529".into()),
        name: "Vaxzevria".into(),
        total_doses_required: 2,
        target_disease: TARGET_DISEASE_COVID19.into(),
    }
}

/// Janssen COVID-19 vaccine. Single-dose regimen.
fn janssen() -> Vaccine {
    Vaccine {
        product_code: ProductCode("EU/1/20/1525".into()),
        name: "COVID-19 Vaccine Janssen".into(),
        total_doses_required: 1,
        target_disease: TARGET_DISEASE_COVID19.into(),
    }
}
