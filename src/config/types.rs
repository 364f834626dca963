//! Configuration types for the booking engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::EngineResult;
use crate::models::{
    BusinessContext, CancellationPolicyTier, RestaurantRates, SortedTiers, TimeWindow, Vertical,
};

/// Metadata about the engine deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Deployment name.
    pub name: String,
    /// Configuration version.
    pub version: String,
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_nightly_tax() -> Decimal {
    Decimal::from(10)
}

fn default_per_person() -> Decimal {
    RestaurantRates::default().default_per_person
}

fn default_privatisation_per_person() -> Decimal {
    RestaurantRates::default().privatisation_per_person
}

/// Pricing defaults applied when a business does not override them.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingDefaults {
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Flat per-night tax/fee on hotel stays.
    #[serde(default = "default_nightly_tax")]
    pub nightly_tax: Decimal,
    /// Per-person rate when no window price applies.
    #[serde(default = "default_per_person")]
    pub restaurant_default_per_person: Decimal,
    /// Flat per-person rate for privatisations.
    #[serde(default = "default_privatisation_per_person")]
    pub privatisation_per_person: Decimal,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            nightly_tax: default_nightly_tax(),
            restaurant_default_per_person: default_per_person(),
            privatisation_per_person: default_privatisation_per_person(),
        }
    }
}

/// Contents of `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineFile {
    /// Engine metadata.
    pub engine: EngineMetadata,
    /// Pricing defaults.
    #[serde(default)]
    pub pricing: PricingDefaults,
}

/// One business, as stored in `businesses/<id>.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessConfig {
    /// Unique business id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Business vertical.
    pub vertical: Vertical,
    /// Currency override.
    #[serde(default)]
    pub currency: Option<String>,
    /// Nightly tax override (hotels).
    #[serde(default)]
    pub nightly_tax: Option<Decimal>,
    /// Default per-person rate override (restaurants).
    #[serde(default)]
    pub default_per_person: Option<Decimal>,
    /// Cancellation tiers in any order.
    #[serde(default)]
    pub cancellation_policies: Vec<CancellationPolicyTier>,
    /// Priced opening-hour windows (restaurants).
    #[serde(default)]
    pub opening_hours: Vec<TimeWindow>,
}

/// The complete configuration loaded from YAML files.
///
/// Each business's cancellation tiers are sorted (largest threshold first)
/// when the configuration is built, so lookups hand out ready-to-use
/// [`SortedTiers`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: EngineMetadata,
    pricing: PricingDefaults,
    businesses: HashMap<String, BusinessConfig>,
    tiers: HashMap<String, SortedTiers>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    ///
    /// Fails if any business carries a tier with an out-of-range percentage.
    pub fn new(
        metadata: EngineMetadata,
        pricing: PricingDefaults,
        businesses: Vec<BusinessConfig>,
    ) -> EngineResult<Self> {
        let mut by_id = HashMap::with_capacity(businesses.len());
        let mut tiers = HashMap::with_capacity(businesses.len());

        for business in businesses {
            let sorted = SortedTiers::from_unordered(business.cancellation_policies.clone())?;
            tiers.insert(business.id.clone(), sorted);
            by_id.insert(business.id.clone(), business);
        }

        Ok(Self {
            metadata,
            pricing,
            businesses: by_id,
            tiers,
        })
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the pricing defaults.
    pub fn pricing(&self) -> &PricingDefaults {
        &self.pricing
    }

    /// Returns all businesses keyed by id.
    pub fn businesses(&self) -> &HashMap<String, BusinessConfig> {
        &self.businesses
    }

    /// Returns the sorted tiers for a business, if it exists.
    pub fn tiers(&self, business_id: &str) -> Option<&SortedTiers> {
        self.tiers.get(business_id)
    }

    /// Builds the context used when no business is specified.
    pub fn default_context(&self) -> BusinessContext {
        BusinessContext {
            business_id: None,
            vertical: None,
            currency: self.pricing.currency.clone(),
            nightly_tax: self.pricing.nightly_tax,
            restaurant_rates: RestaurantRates {
                default_per_person: self.pricing.restaurant_default_per_person,
                privatisation_per_person: self.pricing.privatisation_per_person,
            },
        }
    }

    /// Builds the context for a business, applying its overrides on top of
    /// the defaults.
    pub fn context_for(&self, business: &BusinessConfig) -> BusinessContext {
        let defaults = self.default_context();
        BusinessContext {
            business_id: Some(business.id.clone()),
            vertical: Some(business.vertical),
            currency: business.currency.clone().unwrap_or(defaults.currency),
            nightly_tax: business.nightly_tax.unwrap_or(defaults.nightly_tax),
            restaurant_rates: RestaurantRates {
                default_per_person: business
                    .default_per_person
                    .unwrap_or(defaults.restaurant_rates.default_per_person),
                privatisation_per_person: defaults.restaurant_rates.privatisation_per_person,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn metadata() -> EngineMetadata {
        EngineMetadata {
            name: "test".to_string(),
            version: "2026-01".to_string(),
        }
    }

    fn hotel(id: &str) -> BusinessConfig {
        BusinessConfig {
            id: id.to_string(),
            name: "Hotel".to_string(),
            vertical: Vertical::Hotel,
            currency: Some("CHF".to_string()),
            nightly_tax: Some(Decimal::from(4)),
            default_per_person: None,
            cancellation_policies: vec![
                CancellationPolicyTier::new(0, Decimal::ZERO),
                CancellationPolicyTier::new(14, Decimal::from(100)),
            ],
            opening_hours: vec![],
        }
    }

    #[test]
    fn test_pricing_defaults_fill_missing_fields() {
        let file: EngineFile = serde_yaml::from_str("engine:\n  name: x\n  version: '1'\n").unwrap();
        assert_eq!(file.pricing.currency, "EUR");
        assert_eq!(file.pricing.nightly_tax, Decimal::from(10));
        assert_eq!(file.pricing.restaurant_default_per_person, Decimal::from(75));
        assert_eq!(file.pricing.privatisation_per_person, Decimal::from(100));
    }

    #[test]
    fn test_new_sorts_business_tiers() {
        let config =
            EngineConfig::new(metadata(), PricingDefaults::default(), vec![hotel("h1")]).unwrap();
        let days: Vec<u32> = config
            .tiers("h1")
            .unwrap()
            .iter()
            .map(|t| t.days_before_check_in)
            .collect();
        assert_eq!(days, vec![14, 0]);
    }

    #[test]
    fn test_new_rejects_invalid_tier() {
        let mut business = hotel("h1");
        business.cancellation_policies = vec![CancellationPolicyTier::new(3, Decimal::from(150))];
        let result = EngineConfig::new(metadata(), PricingDefaults::default(), vec![business]);
        assert!(matches!(result, Err(EngineError::InvalidTier { .. })));
    }

    #[test]
    fn test_context_for_applies_overrides() {
        let config =
            EngineConfig::new(metadata(), PricingDefaults::default(), vec![hotel("h1")]).unwrap();
        let business = &config.businesses()["h1"];
        let context = config.context_for(business);

        assert_eq!(context.business_id.as_deref(), Some("h1"));
        assert_eq!(context.vertical, Some(Vertical::Hotel));
        assert_eq!(context.currency, "CHF");
        assert_eq!(context.nightly_tax, Decimal::from(4));
        assert_eq!(context.restaurant_rates, RestaurantRates::default());
    }

    #[test]
    fn test_default_context_uses_pricing_defaults() {
        let pricing = PricingDefaults {
            currency: "USD".to_string(),
            ..PricingDefaults::default()
        };
        let config = EngineConfig::new(metadata(), pricing, vec![]).unwrap();
        let context = config.default_context();
        assert_eq!(context.business_id, None);
        assert_eq!(context.currency, "USD");
    }
}
