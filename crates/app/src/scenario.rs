use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;

use pantry_checkout::Cart;
use pantry_inventory::Inventory;
use pantry_providers::{NewItem, Provider, ProviderInfo, ProviderKind};

/// Variable naming a scenario file when none is passed on the command line.
pub const SCENARIO_ENV: &str = "PANTRY_SCENARIO";

const DEMO: &str = include_str!("../scenarios/demo.json");

/// A provider and the items it brings, as written in a scenario file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEntry {
    pub name: String,
    /// `"organization"`; anything else is a community member.
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub items: Vec<NewItem>,
}

/// Providers to stock the pantry with, and the cart to check out.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Receipt date for every item; defaults to the run date.
    #[serde(default)]
    pub received_on: Option<NaiveDate>,
    #[serde(default)]
    pub providers: Vec<ProviderEntry>,
    #[serde(default)]
    pub cart: Cart,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The scenario bundled with the binary.
    pub fn demo() -> anyhow::Result<Self> {
        Self::from_json(DEMO)
    }

    /// Record every provider's items and deliver them into `inventory`.
    pub fn stock(&self, inventory: &Inventory, today: NaiveDate) -> anyhow::Result<Vec<ProviderInfo>> {
        let received_on = self.received_on.unwrap_or(today);
        let mut infos = Vec::with_capacity(self.providers.len());

        for entry in &self.providers {
            let mut provider = Provider::new(entry.name.clone(), ProviderKind::from_label(&entry.kind))
                .with_context(|| format!("invalid provider {:?}", entry.name))?;
            for item in &entry.items {
                provider
                    .add_item(item.clone(), received_on)
                    .with_context(|| format!("invalid item {} from {}", item.code, entry.name))?;
            }
            provider.deliver_to(inventory);
            infos.push(provider.info());
        }

        Ok(infos)
    }
}
