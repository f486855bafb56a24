//! LR (lorry receipt) Order Model

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Payment mode of a shipment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMode {
    /// Freight collected at the destination
    #[default]
    #[serde(rename = "To Pay")]
    ToPay,
    /// Freight already settled at booking
    #[serde(rename = "Paid")]
    Paid,
}

impl PaymentMode {
    /// Label printed on the receipt footer
    pub fn receipt_label(&self) -> &'static str {
        match self {
            PaymentMode::ToPay => "TO PAY",
            PaymentMode::Paid => "PAID",
        }
    }
}

/// Booking or delivery station
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    #[serde(default)]
    pub name: String,
    /// Short station code, e.g. "HYD"
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub phone_no: Option<String>,
}

/// Consignor or consignee
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_no: Option<String>,
}

impl Party {
    /// Name and phone are both present and non-empty
    pub fn has_contact(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.name) && filled(&self.phone_no)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemType {
    #[serde(default)]
    pub name: String,
}

/// One line of goods on the LR
///
/// `freight` and `hamali` are per-unit charges in minor units (paise).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub freight: Option<i64>,
    #[serde(default)]
    pub hamali: Option<i64>,
    #[serde(default)]
    pub item_type: ItemType,
}

impl LineItem {
    /// Row amount in minor units: `(freight + 2 × hamali) × quantity`
    ///
    /// Saturates instead of overflowing on absurd backend values.
    pub fn amount(&self) -> i64 {
        charge(self.freight, self.hamali).saturating_mul(self.quantity)
    }
}

/// Shipment order record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub tracking_id: String,
    /// Booking time, including the booking office's UTC offset
    #[serde(default)]
    pub placed_at: Option<DateTime<FixedOffset>>,
    /// Name of the clerk who booked the LR
    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub source: Station,
    #[serde(default)]
    pub destination: Station,

    /// Absent for walk-in consignors
    #[serde(default)]
    pub sender: Option<Party>,
    #[serde(default)]
    pub receiver: Party,

    #[serde(default)]
    pub items: Vec<LineItem>,

    // Order-level charges (minor units)
    #[serde(default)]
    pub freight: Option<i64>,
    #[serde(default)]
    pub hamali: Option<i64>,

    #[serde(default)]
    pub is_door_delivery: bool,
    #[serde(default)]
    pub door_delivery_charge: Option<i64>,

    #[serde(default)]
    pub payment: PaymentMode,
}

impl Order {
    pub fn is_to_pay(&self) -> bool {
        self.payment == PaymentMode::ToPay
    }

    /// Sum of item quantities
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, i| total.saturating_add(i.quantity))
    }

    /// Order-level total in minor units: `freight + 2 × hamali`
    ///
    /// Taken from the order record, not summed over items.
    pub fn total_amount(&self) -> i64 {
        charge(self.freight, self.hamali)
    }
}

/// Hamali is billed twice: once at loading, once at unloading
fn charge(freight: Option<i64>, hamali: Option<i64>) -> i64 {
    freight
        .unwrap_or(0)
        .saturating_add(hamali.unwrap_or(0).saturating_mul(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_json() {
        let json = r#"{
            "trackingId": "LR1001",
            "placedAt": "2024-03-05T10:15:00+05:30",
            "createdBy": "Ravi",
            "source": { "name": "Hyderabad", "code": "HYD", "phoneNo": "04012345678" },
            "destination": { "name": "Vijayawada", "code": "VJA" },
            "sender": null,
            "receiver": { "name": "Acme", "phoneNo": "9999999999" },
            "items": [
                { "name": "BOX", "quantity": 2, "freight": 500, "hamali": 200, "itemType": { "name": "C/B" } }
            ],
            "freight": 500,
            "hamali": 200,
            "isDoorDelivery": false,
            "payment": "To Pay"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.tracking_id, "LR1001");
        assert_eq!(order.payment, PaymentMode::ToPay);
        assert!(order.sender.is_none());
        assert_eq!(order.destination.phone_no, None);
        assert_eq!(order.items[0].item_type.name, "C/B");
        assert_eq!(order.items[0].amount(), 1800);
        assert_eq!(order.total_amount(), 900);
        assert_eq!(order.total_quantity(), 2);
    }

    #[test]
    fn test_payment_mode_serde() {
        assert_eq!(serde_json::to_string(&PaymentMode::Paid).unwrap(), "\"Paid\"");
        assert_eq!(serde_json::to_string(&PaymentMode::ToPay).unwrap(), "\"To Pay\"");
        assert_eq!(PaymentMode::ToPay.receipt_label(), "TO PAY");
    }

    #[test]
    fn test_absent_charges_are_zero() {
        let item = LineItem {
            name: "BAG".to_string(),
            quantity: 3,
            ..Default::default()
        };
        assert_eq!(item.amount(), 0);
        assert_eq!(Order::default().total_amount(), 0);
    }

    #[test]
    fn test_huge_charges_saturate() {
        let item = LineItem {
            quantity: 4,
            freight: Some(i64::MAX / 4),
            hamali: Some(1),
            ..Default::default()
        };
        assert_eq!(item.amount(), i64::MAX);

        let order = Order {
            freight: Some(i64::MAX),
            hamali: Some(i64::MAX),
            items: vec![item.clone(), item],
            ..Default::default()
        };
        assert_eq!(order.total_amount(), i64::MAX);
        assert_eq!(order.total_quantity(), 8);
    }

    #[test]
    fn test_party_has_contact() {
        let walk_in = Party {
            name: Some("Ravi".to_string()),
            phone_no: Some(String::new()),
        };
        assert!(!walk_in.has_contact());

        let known = Party {
            name: Some("Ravi".to_string()),
            phone_no: Some("9000000000".to_string()),
        };
        assert!(known.has_contact());
    }
}
