use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult, Entity, ItemCode, LotId, ProviderId, Quantity};
use pantry_inventory::{Inventory, Lot, UnitKind};

/// Provider kind: organization or individual community member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Organization,
    CommunityMember,
}

impl ProviderKind {
    /// `"organization"` (any case) is an organization; anything else is a
    /// community member.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("organization") {
            ProviderKind::Organization
        } else {
            ProviderKind::CommunityMember
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Organization => "ORGANIZATION",
            ProviderKind::CommunityMember => "COMMUNITYMEMBER",
        }
    }
}

/// Identity card of a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub id: ProviderId,
    pub name: String,
    pub kind: ProviderKind,
}

/// An item being donated or sold, as the provider describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub code: ItemCode,
    pub name: String,
    /// Unit cost; zero (the default) for donations.
    #[serde(default)]
    pub cost: Decimal,
    /// PLU (weighed) when true, UPC (counted) otherwise.
    #[serde(default)]
    pub weight_based: bool,
    pub days_until_expiry: u32,
    pub quantity: Quantity,
}

/// A provider and the lots it has recorded but not yet delivered.
#[derive(Debug, Clone)]
pub struct Provider {
    id: ProviderId,
    name: String,
    kind: ProviderKind,
    items: BTreeMap<ItemCode, Vec<Lot>>,
}

impl Provider {
    pub fn new(name: impl Into<String>, kind: ProviderKind) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("provider name cannot be empty"));
        }
        Ok(Self {
            id: ProviderId::new(),
            name,
            kind,
            items: BTreeMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: self.id,
            name: self.name.clone(),
            kind: self.kind,
        }
    }

    /// Record an item received today (`received_on`) as a new lot.
    ///
    /// Lots of the same code are kept in the order they were added.
    pub fn add_item(&mut self, item: NewItem, received_on: NaiveDate) -> DomainResult<LotId> {
        let expires_on = received_on
            .checked_add_days(Days::new(u64::from(item.days_until_expiry)))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "expiry date out of range ({} days after {received_on})",
                    item.days_until_expiry
                ))
            })?;

        let lot = Lot::new(
            item.code,
            item.quantity,
            UnitKind::from_weight_based(item.weight_based),
            received_on,
            expires_on,
        )?
        .with_description(item.name, item.cost)?;
        let lot_id = *lot.id();

        tracing::debug!(
            provider = %self.name,
            code = %lot.code(),
            %lot_id,
            quantity = %lot.quantity(),
            "item recorded"
        );
        self.items.entry(lot.code().clone()).or_default().push(lot);
        Ok(lot_id)
    }

    /// Items recorded and not yet delivered, grouped by code.
    pub fn items(&self) -> &BTreeMap<ItemCode, Vec<Lot>> {
        &self.items
    }

    pub fn pending_lots(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    /// Hand every recorded lot over to `inventory`, preserving per-code order.
    ///
    /// Returns the number of lots delivered; the provider is empty afterwards.
    pub fn deliver_to(&mut self, inventory: &Inventory) -> usize {
        let items = std::mem::take(&mut self.items);
        let mut delivered = 0;
        for lot in items.into_values().flatten() {
            inventory.receive(lot);
            delivered += 1;
        }
        tracing::info!(provider = %self.name, kind = self.kind.as_str(), delivered, "provider delivery");
        delivered
    }
}

impl Entity for Provider {
    type Id = ProviderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
