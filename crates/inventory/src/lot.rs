use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pantry_core::{DomainError, DomainResult, Entity, ItemCode, LotId, Quantity};

/// How an item is measured.
///
/// Display-only: deduction treats both kinds identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// PLU item sold by weight (pounds).
    Weight,
    /// UPC item sold by count.
    Count,
}

impl UnitKind {
    pub fn from_weight_based(is_weight_based: bool) -> Self {
        if is_weight_based {
            UnitKind::Weight
        } else {
            UnitKind::Count
        }
    }

    /// Code family label ("PLU" for weighed items, "UPC" otherwise).
    pub fn label(self) -> &'static str {
        match self {
            UnitKind::Weight => "PLU",
            UnitKind::Count => "UPC",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            UnitKind::Weight => "lbs",
            UnitKind::Count => "units",
        }
    }
}

/// A single received batch of one item code.
///
/// The unit of FIFO consumption: checkout shrinks the oldest lot first and
/// drops it once it reaches zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lot {
    id: LotId,
    code: ItemCode,
    name: String,
    /// Unit cost; zero for donations.
    cost: Decimal,
    unit_kind: UnitKind,
    quantity: Quantity,
    received_on: NaiveDate,
    expires_on: NaiveDate,
}

impl Lot {
    pub fn new(
        code: ItemCode,
        quantity: Quantity,
        unit_kind: UnitKind,
        received_on: NaiveDate,
        expires_on: NaiveDate,
    ) -> DomainResult<Self> {
        if expires_on < received_on {
            return Err(DomainError::validation(format!(
                "lot of {code} expires ({expires_on}) before it was received ({received_on})"
            )));
        }
        Ok(Self {
            id: LotId::new(),
            code,
            name: String::new(),
            cost: Decimal::ZERO,
            unit_kind,
            quantity,
            received_on,
            expires_on,
        })
    }

    /// Attach the descriptive fields a provider knows about.
    pub fn with_description(mut self, name: impl Into<String>, cost: Decimal) -> DomainResult<Self> {
        if cost.is_sign_negative() && !cost.is_zero() {
            return Err(DomainError::validation("cost cannot be negative"));
        }
        self.name = name.into();
        self.cost = cost;
        Ok(self)
    }

    pub fn code(&self) -> &ItemCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> Decimal {
        self.cost
    }

    pub fn unit_kind(&self) -> UnitKind {
        self.unit_kind
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn received_on(&self) -> NaiveDate {
        self.received_on
    }

    pub fn expires_on(&self) -> NaiveDate {
        self.expires_on
    }

    /// Shelf life: days between receipt and expiry.
    pub fn days_until_expiry(&self) -> i64 {
        (self.expires_on - self.received_on).num_days()
    }

    pub fn is_expired(&self, on: NaiveDate) -> bool {
        on > self.expires_on
    }

    /// Exhausted lots are never stored or listed.
    pub fn is_exhausted(&self) -> bool {
        self.quantity.is_zero()
    }

    pub(crate) fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }
}

impl Entity for Lot {
    type Id = LotId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
