//! Domain models for Geartrack
//!
//! Records serialize with camelCase field names and the shop's display
//! strings as enum tags, so the JSON matches what the dashboard has always
//! stored under each collection key.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Generate an id for a new record from the current timestamp (milliseconds)
pub fn new_record_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// A customer of the shop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: String,
    pub name: String,
    /// Free-text tax/ID document, not validated
    pub document: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// A customer vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub gearbox_type: GearboxType,
    /// Whole kilometres. Fractional stored readings round to the nearest km
    /// and `null` reads as zero.
    #[serde(deserialize_with = "lenient_mileage")]
    pub mileage: u32,
    /// Weak reference to `Owner::id`; the owner may no longer exist
    pub owner_id: String,
}

/// Gearbox construction of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GearboxType {
    #[serde(rename = "Manual")]
    Manual,
    #[serde(rename = "Automático")]
    Automatic,
    #[serde(rename = "CVT")]
    Cvt,
    #[serde(rename = "Dupla Embreagem")]
    DualClutch,
    #[serde(rename = "Automatizado")]
    Automated,
}

impl GearboxType {
    pub const ALL: [GearboxType; 5] = [
        Self::Manual,
        Self::Automatic,
        Self::Cvt,
        Self::DualClutch,
        Self::Automated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "automatic",
            Self::Cvt => "cvt",
            Self::DualClutch => "dual-clutch",
            Self::Automated => "automated",
        }
    }

    /// Display label used by the shop
    pub fn label(&self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Automatic => "Automático",
            Self::Cvt => "CVT",
            Self::DualClutch => "Dupla Embreagem",
            Self::Automated => "Automatizado",
        }
    }
}

impl std::str::FromStr for GearboxType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s) || g.label().eq_ignore_ascii_case(s))
            .or(match s.to_lowercase().as_str() {
                "dual_clutch" | "dualclutch" | "dct" => Some(Self::DualClutch),
                _ => None,
            })
            .ok_or_else(|| {
                format!(
                    "Unknown gearbox type: {} (valid: manual, automatic, cvt, dual-clutch, automated)",
                    s
                )
            })
    }
}

impl std::fmt::Display for GearboxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A service order (work performed on a vehicle)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    pub id: String,
    /// Weak reference to `Vehicle::id`; the vehicle may no longer exist
    pub vehicle_id: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub description: String,
    pub entry_date: NaiveDate,
    /// Absent while the service is still open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<NaiveDate>,
    pub status: ServiceStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_payment_as_none"
    )]
    pub payment_method: Option<PaymentMethod>,
}

impl ServiceOrder {
    /// Only finished orders count toward revenue
    pub fn is_finished(&self) -> bool {
        self.status == ServiceStatus::Finished
    }

    /// Orders still in the shop (analysis or repair)
    pub fn is_active(&self) -> bool {
        matches!(self.status, ServiceStatus::Analysis | ServiceStatus::Repair)
    }

    /// Advisory checks the store itself never enforces
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if let Some(exit) = self.exit_date {
            if exit < self.entry_date {
                issues.push(ValidationIssue::ExitBeforeEntry {
                    entry: self.entry_date,
                    exit,
                });
            }
        }
        if self.value.is_sign_negative() && !self.value.is_zero() {
            issues.push(ValidationIssue::NegativeValue(self.value));
        }
        issues
    }
}

/// Older records store an empty string when no payment method was picked
fn lenient_mileage<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Whole(u32),
        Fractional(f64),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Whole(km)) => Ok(km),
        Some(Raw::Fractional(km)) => {
            let rounded = km.round();
            if rounded.is_finite() && rounded >= 0.0 && rounded <= f64::from(u32::MAX) {
                Ok(rounded as u32)
            } else {
                Err(serde::de::Error::custom(format!("mileage out of range: {}", km)))
            }
        }
        None => Ok(0),
    }
}

fn empty_payment_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<PaymentMethod>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Method(PaymentMethod),
        Other(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Method(m)) => Ok(Some(m)),
        Some(Raw::Other(s)) if s.is_empty() => Ok(None),
        Some(Raw::Other(s)) => Err(serde::de::Error::custom(format!(
            "unknown payment method: {}",
            s
        ))),
        None => Ok(None),
    }
}

/// Problems found by `ServiceOrder::validate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    ExitBeforeEntry { entry: NaiveDate, exit: NaiveDate },
    NegativeValue(Decimal),
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExitBeforeEntry { entry, exit } => {
                write!(f, "exit date {} is before entry date {}", exit, entry)
            }
            Self::NegativeValue(v) => write!(f, "value {} is negative", v),
        }
    }
}

/// Workflow status of a service order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceStatus {
    #[serde(rename = "Em Análise")]
    Analysis,
    #[serde(rename = "Em Reparo")]
    Repair,
    #[serde(rename = "Finalizado")]
    Finished,
    #[serde(rename = "Cancelado")]
    Cancelled,
}

impl ServiceStatus {
    pub const ALL: [ServiceStatus; 4] = [
        Self::Analysis,
        Self::Repair,
        Self::Finished,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Repair => "repair",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Analysis => "Em Análise",
            Self::Repair => "Em Reparo",
            Self::Finished => "Finalizado",
            Self::Cancelled => "Cancelado",
        }
    }
}

impl std::str::FromStr for ServiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s) || st.label().eq_ignore_ascii_case(s))
            .or(match s.to_lowercase().as_str() {
                "canceled" => Some(Self::Cancelled),
                "done" => Some(Self::Finished),
                _ => None,
            })
            .ok_or_else(|| {
                format!(
                    "Unknown service status: {} (valid: analysis, repair, finished, cancelled)",
                    s
                )
            })
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a service order was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Dinheiro")]
    Money,
    #[serde(rename = "Cartão de Crédito")]
    CreditCard,
    #[serde(rename = "Cartão de Débito")]
    DebitCard,
    #[serde(rename = "Pix")]
    Pix,
    #[serde(rename = "Transferência")]
    Transfer,
    #[serde(rename = "Boleto")]
    Boleto,
    #[serde(rename = "Pendente")]
    NotPaid,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 7] = [
        Self::Money,
        Self::CreditCard,
        Self::DebitCard,
        Self::Pix,
        Self::Transfer,
        Self::Boleto,
        Self::NotPaid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Money => "money",
            Self::CreditCard => "credit-card",
            Self::DebitCard => "debit-card",
            Self::Pix => "pix",
            Self::Transfer => "transfer",
            Self::Boleto => "boleto",
            Self::NotPaid => "not-paid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Money => "Dinheiro",
            Self::CreditCard => "Cartão de Crédito",
            Self::DebitCard => "Cartão de Débito",
            Self::Pix => "Pix",
            Self::Transfer => "Transferência",
            Self::Boleto => "Boleto",
            Self::NotPaid => "Pendente",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s) || p.label().eq_ignore_ascii_case(s))
            .or(match s.to_lowercase().as_str() {
                "cash" => Some(Self::Money),
                "credit" => Some(Self::CreditCard),
                "debit" => Some(Self::DebitCard),
                "pending" => Some(Self::NotPaid),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown payment method: {}", s))
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ========== Reports ==========

/// Report period granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Monthly,
    Quarterly,
    Annual,
}

impl ViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }
}

impl std::str::FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "quarterly" | "quarter" => Ok(Self::Quarterly),
            "annual" | "yearly" | "year" => Ok(Self::Annual),
            _ => Err(format!(
                "Unknown view type: {} (valid: monthly, quarterly, annual)",
                s
            )),
        }
    }
}

impl std::fmt::Display for ViewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One aggregated period slice of a consolidation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub count: i64,
    pub value: Decimal,
    /// Share of the consolidation total, 0-100 (zero when the total is zero)
    pub share_percent: Decimal,
}

impl Bucket {
    pub(crate) fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            count: 0,
            value: Decimal::ZERO,
            share_percent: Decimal::ZERO,
        }
    }
}

/// Revenue consolidation for one view of the finished service orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consolidation {
    pub view: ViewType,
    /// Year the buckets cover; `None` for the annual (all-years) view
    pub year: Option<i32>,
    pub buckets: Vec<Bucket>,
    pub total_value: Decimal,
    pub total_count: i64,
    /// `total_value / total_count`, zero when there are no orders
    pub average_ticket: Decimal,
    /// Largest bucket value, never below one (for proportional bars)
    pub max_value: Decimal,
}

// ========== Dashboard ==========

/// A recent service order with its vehicle plate resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentService {
    pub service: ServiceOrder,
    pub plate: String,
}

/// Dashboard overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_owners: usize,
    pub total_vehicles: usize,
    /// Orders in analysis or repair
    pub active_services: usize,
    /// Sum of finished orders across all years
    pub total_revenue: Decimal,
    pub recent_services: Vec<RecentService>,
}
