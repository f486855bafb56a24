//! LR receipt renderer
//!
//! Renders an [`Order`] into ESC/POS directives for an 80mm printer.
//! Absent or zero charges print as a blank `____` so the clerk can fill
//! them in by hand.

use chrono::{DateTime, FixedOffset};
use freight_printer::{Directive, EscPosTextBuilder, ParsedLine, pad, to_escpos, to_lines, wrap_chars};
use serde::{Deserialize, Serialize};
use shared::models::{LineItem, Order, Party, Station};
use shared::money::{PLACEHOLDER, format_charge, format_optional_charge};
use tracing::instrument;

use crate::config::ReceiptConfig;

/// Item column width
pub const ITEM_COL: usize = 24;
/// Quantity column width (right-justified)
pub const QTY_COL: usize = 6;
/// Spacing before the amount column
pub const GAP_COL: usize = 4;
/// Amount column width (right-justified)
pub const AMOUNT_COL: usize = 12;
/// Dash rule width for 80mm paper
pub const RULE_WIDTH: usize = 44;

const NA: &str = "NA";

/// Which physical copy is being printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CopyKind {
    /// Office / customer copy with all charges
    #[default]
    Full,
    /// Driver's copy; on To-Pay orders it carries quantities only
    Delivery,
}

/// LR receipt renderer
pub struct ReceiptRenderer<'a> {
    order: &'a Order,
    config: &'a ReceiptConfig,
    copy: CopyKind,
}

impl<'a> ReceiptRenderer<'a> {
    pub fn new(order: &'a Order, copy: CopyKind, config: &'a ReceiptConfig) -> Self {
        Self {
            order,
            config,
            copy,
        }
    }

    /// Charges are withheld only from the delivery copy of a To-Pay order
    pub fn shows_amounts(&self) -> bool {
        !(self.copy == CopyKind::Delivery && self.order.is_to_pay())
    }

    /// Render the receipt to directives
    pub fn render(&self) -> Vec<Directive> {
        let mut b = EscPosTextBuilder::new(RULE_WIDTH);

        self.render_header(&mut b);
        self.render_parties(&mut b);
        self.render_items(&mut b);
        self.render_footer(&mut b);

        b.finalize()
    }

    /// Date, company, tracking id, station phones, tracking URL
    fn render_header(&self, b: &mut EscPosTextBuilder) {
        b.reset().align_left().size_reset();
        b.write_line(&self.date_line());
        b.newline();

        b.align_center();
        b.size_double().bold_on();
        b.write_line(&self.config.company_name);
        b.bold_off().size_reset();
        b.newline();

        b.bold_on().size_double_width();
        b.write_line(&self.order.tracking_id);
        b.size_reset().bold_off();
        b.newline();

        let source = &self.order.source;
        let destination = &self.order.destination;
        b.write_line(&format!(
            "{} Ph.: {}   {} Ph.: {}",
            source.code,
            station_phone(source),
            destination.code,
            station_phone(destination)
        ));

        b.bold_on();
        b.write_line(&self.config.tracking_url);
        b.bold_off();
    }

    /// Route and consignor / consignee block, double height
    fn render_parties(&self, b: &mut EscPosTextBuilder) {
        b.align_left();
        b.dash_sep();

        b.size_double_height();
        b.write_line(&format!("From: {}", self.order.source.name));
        b.write_line(&format!("To: {}", self.order.destination.name));

        match self.order.sender.as_ref().filter(|s| s.has_contact()) {
            Some(sender) => {
                b.write_line(&format!("Consignor: {}", party_field(&sender.name)));
                b.write_line(&format!("Ph: {}", party_field(&sender.phone_no)));
            }
            None => {
                b.write_line(&format!("Consignor: {}   Ph: {}", NA, NA));
            }
        }

        let receiver = &self.order.receiver;
        b.write_line(&format!("Consignee: {}", party_field(&receiver.name)));
        b.write_line(&format!("Ph: {}", receiver_phone(receiver)));
        b.size_reset();
    }

    /// Item table with total row
    fn render_items(&self, b: &mut EscPosTextBuilder) {
        b.write_line(&self.row("Item", "Qty", "Amount"));
        b.dash_sep();

        for (idx, item) in self.order.items.iter().enumerate() {
            self.render_item(b, idx + 1, item);
        }

        b.dash_sep();
        b.bold_on();
        b.write_line(&self.row(
            "Total",
            &self.order.total_quantity().to_string(),
            &format_charge(self.order.total_amount()),
        ));
        b.bold_off();
    }

    /// One item, hard-wrapped over as many rows as its label needs
    fn render_item(&self, b: &mut EscPosTextBuilder, index: usize, item: &LineItem) {
        let label = format!("{}. {} ({})", index, item.name, item.item_type.name);
        let mut chunks = wrap_chars(&label, ITEM_COL).into_iter();

        if let Some(first) = chunks.next() {
            b.write_line(&self.row(
                &first,
                &item.quantity.to_string(),
                &format_charge(item.amount()),
            ));
        }
        for chunk in chunks {
            b.write_line(&self.row(&chunk, "", ""));
        }
    }

    /// Door delivery and payment, then the fixed footer and cut
    fn render_footer(&self, b: &mut EscPosTextBuilder) {
        b.newline();

        let door_delivery = format!("Door Delivery: {}", self.door_delivery_value());
        b.write(&format!("{:<width$}", door_delivery, width = ITEM_COL));
        b.write("     ");
        b.bold_on();
        b.write(&format!("Payment: {}", self.order.payment.receipt_label()));
        b.bold_off();
        b.newline();

        b.newline();
        b.align_center();
        b.write_line(&self.config.tax_id);
        b.write_line(&self.config.jurisdiction);
        b.write_line(&self.config.contact);

        b.cut();
    }

    /// Fixed-width table row; the amount column is dropped when hidden
    fn row(&self, label: &str, qty: &str, amount: &str) -> String {
        let mut row = format!("{}{}", pad(label, ITEM_COL, false), pad(qty, QTY_COL, true));
        if self.shows_amounts() {
            row.push_str(&" ".repeat(GAP_COL));
            row.push_str(&pad(amount, AMOUNT_COL, true));
        }
        row
    }

    fn door_delivery_value(&self) -> String {
        if !self.order.is_door_delivery {
            "No".to_string()
        } else if !self.shows_amounts() {
            "Yes".to_string()
        } else {
            format_optional_charge(self.order.door_delivery_charge)
        }
    }

    fn date_line(&self) -> String {
        let date = self
            .order
            .placed_at
            .map(format_date)
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        let creator = self.order.created_by.as_deref().unwrap_or_default();
        format!("{}    {}", date, creator).trim_end().to_string()
    }
}

fn format_date(dt: DateTime<FixedOffset>) -> String {
    dt.format("%d-%m-%Y %I:%M %p").to_string()
}

fn station_phone(station: &Station) -> &str {
    non_empty(&station.phone_no).unwrap_or(PLACEHOLDER)
}

fn party_field(value: &Option<String>) -> &str {
    non_empty(value).unwrap_or(NA)
}

/// Consignee phone falls back to "NA", never to the blank placeholder
fn receiver_phone(receiver: &Party) -> &str {
    non_empty(&receiver.phone_no).unwrap_or(NA)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Encode one receipt copy to an ESC/POS stream
#[instrument(skip(order, config), fields(tracking_id = %order.tracking_id))]
pub fn encode(order: &Order, copy: CopyKind, config: &ReceiptConfig) -> String {
    to_escpos(&ReceiptRenderer::new(order, copy, config).render())
}

/// Preview lines for one copy, straight from the directives
pub fn preview(order: &Order, copy: CopyKind, config: &ReceiptConfig) -> Vec<ParsedLine> {
    to_lines(&ReceiptRenderer::new(order, copy, config).render())
}

/// Office copy, customer copy, driver copy
pub fn encode_copies(order: &Order, config: &ReceiptConfig) -> [String; 3] {
    [
        encode(order, CopyKind::Full, config),
        encode(order, CopyKind::Full, config),
        encode(order, CopyKind::Delivery, config),
    ]
}

/// All three copies as one stream, each ending in its own cut
pub fn encode_all(order: &Order, config: &ReceiptConfig) -> String {
    encode_copies(order, config).concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use freight_printer::{Align, CUT_LINE_TEXT, parse};
    use shared::models::{ItemType, PaymentMode};

    fn create_test_order() -> Order {
        Order {
            tracking_id: "LR1001".to_string(),
            placed_at: DateTime::parse_from_rfc3339("2024-03-05T10:15:00+05:30").ok(),
            created_by: Some("Ravi".to_string()),
            source: Station {
                name: "Hyderabad".to_string(),
                code: "HYD".to_string(),
                phone_no: Some("04012345678".to_string()),
            },
            destination: Station {
                name: "Vijayawada".to_string(),
                code: "VJA".to_string(),
                phone_no: None,
            },
            sender: Some(Party {
                name: None,
                phone_no: None,
            }),
            receiver: Party {
                name: Some("Acme".to_string()),
                phone_no: Some("9999999999".to_string()),
            },
            items: vec![LineItem {
                name: "BOX".to_string(),
                quantity: 2,
                freight: Some(500),
                hamali: Some(200),
                item_type: ItemType {
                    name: "C/B".to_string(),
                },
            }],
            freight: Some(500),
            hamali: Some(200),
            is_door_delivery: false,
            door_delivery_charge: None,
            payment: PaymentMode::Paid,
        }
    }

    fn texts(lines: &[ParsedLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    fn find<'l>(lines: &'l [ParsedLine], prefix: &str) -> &'l ParsedLine {
        lines
            .iter()
            .find(|l| l.text.starts_with(prefix))
            .unwrap_or_else(|| panic!("no line starting with {:?}", prefix))
    }

    #[test]
    fn test_walk_in_paid_order() {
        let config = ReceiptConfig::default();
        let lines = parse(&encode(&create_test_order(), CopyKind::Full, &config));

        let consignor = find(&lines, "Consignor");
        assert_eq!(consignor.text, "Consignor: NA   Ph: NA");
        assert!(consignor.style.double_height);

        let item = find(&lines, "1. BOX (C/B)");
        assert_eq!(
            item.text,
            format!("{:<24}{:>6}    {:>12}", "1. BOX (C/B)", 2, "Rs.18.00")
        );

        let total = find(&lines, "Total");
        assert!(total.text.ends_with("Rs.9.00"));
        assert!(total.style.bold);
        assert!(total.text.contains("     2    "));
    }

    #[test]
    fn test_section_order() {
        let config = ReceiptConfig::default();
        let lines = parse(&encode(&create_test_order(), CopyKind::Full, &config));
        let t = texts(&lines);

        assert_eq!(t[0], "05-03-2024 10:15 AM    Ravi");
        assert_eq!(t[1], " ");
        assert_eq!(t[2], "FREIGHT CARRIERS");
        assert!(lines[2].style.bold && lines[2].style.double_height);
        assert_eq!(lines[2].style.align, Align::Center);
        assert_eq!(t[4], "LR1001");
        assert!(lines[4].style.bold);
        assert_eq!(t[6], "HYD Ph.: 04012345678   VJA Ph.: ____");
        assert_eq!(t[7], "www.freightcarriers.in/track");
        assert_eq!(t[8], "-".repeat(RULE_WIDTH));
        assert_eq!(lines[8].style.align, Align::Left);
        assert_eq!(t[9], "From: Hyderabad");
        assert_eq!(t[10], "To: Vijayawada");
        assert_eq!(t[12], "Consignee: Acme");
        assert_eq!(t[13], "Ph: 9999999999");
        assert!(t[14].starts_with("Item"));
        assert!(!lines[14].style.double_height);
        assert_eq!(t[t.len() - 1], CUT_LINE_TEXT);
        assert_eq!(t[t.len() - 2], "Customer care: 1800-000-0000");
        assert_eq!(lines[t.len() - 2].style.align, Align::Center);
    }

    #[test]
    fn test_one_line_per_feed_and_cut() {
        let mut order = create_test_order();
        order.items[0].name = "VERY LONG CARDBOARD CARTONS OF SPARES".to_string();
        let stream = encode(&order, CopyKind::Full, &ReceiptConfig::default());

        let feeds = stream.matches('\n').count();
        let cuts = stream.matches("\x1D\x56").count();
        assert_eq!(cuts, 1);
        assert_eq!(parse(&stream).len(), feeds + cuts);
    }

    #[test]
    fn test_to_pay_delivery_copy_hides_amounts() {
        let mut order = create_test_order();
        order.payment = PaymentMode::ToPay;
        let config = ReceiptConfig::default();

        let delivery = encode(&order, CopyKind::Delivery, &config);
        assert!(!delivery.contains("Rs."));
        assert!(!delivery.contains("Amount"));
        let lines = parse(&delivery);
        assert_eq!(find(&lines, "1. BOX").text.len(), ITEM_COL + QTY_COL);
        assert!(find(&lines, "Door Delivery").text.contains("TO PAY"));

        let full = encode(&order, CopyKind::Full, &config);
        assert!(full.contains("Rs.18.00"));
        assert!(full.contains("Amount"));
    }

    #[test]
    fn test_paid_delivery_copy_matches_full_copy() {
        let order = create_test_order();
        let config = ReceiptConfig::default();
        assert_eq!(
            encode(&order, CopyKind::Delivery, &config),
            encode(&order, CopyKind::Full, &config)
        );
    }

    #[test]
    fn test_zero_charges_print_placeholder() {
        let mut order = create_test_order();
        order.items[0].freight = Some(0);
        order.items[0].hamali = Some(0);
        order.freight = None;
        order.hamali = None;

        let lines = parse(&encode(&order, CopyKind::Full, &ReceiptConfig::default()));
        let item = find(&lines, "1. BOX");
        assert!(item.text.ends_with("____"));
        assert!(!item.text.contains("0.00"));
        assert!(find(&lines, "Total").text.ends_with("____"));
    }

    #[test]
    fn test_long_item_name_wraps_mid_word() {
        let mut order = create_test_order();
        order.items[0].name = "CARDBOARD CARTONS OF SPARES".to_string();
        let lines = parse(&encode(&order, CopyKind::Full, &ReceiptConfig::default()));

        // "1. CARDBOARD CARTONS OF SPARES (C/B)" split every 24 chars
        let first = find(&lines, "1. CARDBOARD");
        assert!(first.text.starts_with("1. CARDBOARD CARTONS OF "));
        assert!(first.text.ends_with("Rs.18.00"));

        let cont = find(&lines, "SPARES (C/B)");
        assert_eq!(cont.text.len(), ITEM_COL + QTY_COL + GAP_COL + AMOUNT_COL);
        assert_eq!(cont.text.trim_end(), "SPARES (C/B)");
    }

    #[test]
    fn test_known_consignor_prints_two_lines() {
        let mut order = create_test_order();
        order.sender = Some(Party {
            name: Some("Sai Traders".to_string()),
            phone_no: Some("9000000001".to_string()),
        });
        order.receiver.phone_no = None;

        let lines = parse(&encode(&order, CopyKind::Full, &ReceiptConfig::default()));
        let t = texts(&lines);
        let at = t.iter().position(|l| *l == "Consignor: Sai Traders").unwrap();
        assert_eq!(t[at + 1], "Ph: 9000000001");
        assert_eq!(t[at + 2], "Consignee: Acme");
        assert_eq!(t[at + 3], "Ph: NA");
    }

    #[test]
    fn test_door_delivery_values() {
        let config = ReceiptConfig::default();
        let mut order = create_test_order();
        order.is_door_delivery = true;
        order.door_delivery_charge = Some(15000);

        let lines = parse(&encode(&order, CopyKind::Full, &config));
        let footer = find(&lines, "Door Delivery");
        assert_eq!(
            footer.text,
            format!("{:<24}     Payment: PAID", "Door Delivery: Rs.150.00")
        );
        // bold was switched off before the line feed
        assert!(!footer.style.bold);

        order.door_delivery_charge = None;
        let lines = parse(&encode(&order, CopyKind::Full, &config));
        assert!(find(&lines, "Door Delivery").text.starts_with("Door Delivery: ____"));

        order.payment = PaymentMode::ToPay;
        order.door_delivery_charge = Some(15000);
        let lines = parse(&encode(&order, CopyKind::Delivery, &config));
        let footer = find(&lines, "Door Delivery");
        assert!(footer.text.starts_with("Door Delivery: Yes"));
        assert!(footer.text.ends_with("Payment: TO PAY"));
    }

    #[test]
    fn test_absurd_charges_still_print() {
        let mut order = create_test_order();
        order.items[0].freight = Some(i64::MAX / 2);
        order.items[0].quantity = 3;
        order.hamali = Some(i64::MAX);

        let lines = parse(&encode(&order, CopyKind::Full, &ReceiptConfig::default()));
        assert!(find(&lines, "1. BOX").text.contains("Rs."));
        assert!(!find(&lines, "Total").text.contains('-'));
    }

    #[test]
    fn test_missing_fields_degrade() {
        let order = Order::default();
        let lines = parse(&encode(&order, CopyKind::Full, &ReceiptConfig::default()));
        assert_eq!(lines[0].text, "____");
        assert!(texts(&lines).contains(&" Ph.: ____    Ph.: ____"));
        assert!(texts(&lines).contains(&"Consignee: NA"));
    }

    #[test]
    fn test_preview_matches_parsed_stream() {
        let order = create_test_order();
        let config = ReceiptConfig::default();
        for copy in [CopyKind::Full, CopyKind::Delivery] {
            assert_eq!(
                preview(&order, copy, &config),
                parse(&encode(&order, copy, &config))
            );
        }
    }

    #[test]
    fn test_copy_kind_json() {
        assert_eq!(serde_json::to_string(&CopyKind::Delivery).unwrap(), "\"delivery\"");
        let kind: CopyKind = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(kind, CopyKind::Full);
    }

    #[test]
    fn test_three_copies() {
        let mut order = create_test_order();
        order.payment = PaymentMode::ToPay;
        let config = ReceiptConfig::default();

        let [office, customer, driver] = encode_copies(&order, &config);
        assert_eq!(office, customer);
        assert!(office.contains("Rs."));
        assert!(!driver.contains("Rs."));

        let all = encode_all(&order, &config);
        assert_eq!(all.matches("\x1D\x56").count(), 3);
        assert!(all.starts_with("\x1B@"));
        let cut_lines = parse(&all).iter().filter(|l| l.style.is_cut).count();
        assert_eq!(cut_lines, 3);
    }
}
