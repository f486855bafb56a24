/// Receipt branding - the fixed text printed on every LR
///
/// # Environment variables
///
/// | Variable | Default |
/// |----------|---------|
/// | RECEIPT_COMPANY_NAME | FREIGHT CARRIERS |
/// | RECEIPT_TRACKING_URL | www.freightcarriers.in/track |
/// | RECEIPT_TAX_ID | GSTIN: 36AAAAA0000A1Z5 |
/// | RECEIPT_JURISDICTION | Subject to Hyderabad jurisdiction |
/// | RECEIPT_CONTACT | Customer care: 1800-000-0000 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptConfig {
    /// Printed large and centered at the top
    pub company_name: String,
    pub tracking_url: String,
    pub tax_id: String,
    pub jurisdiction: String,
    pub contact: String,
}

impl ReceiptConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |key: &str, fallback: String| std::env::var(key).unwrap_or(fallback);

        Self {
            company_name: var("RECEIPT_COMPANY_NAME", defaults.company_name),
            tracking_url: var("RECEIPT_TRACKING_URL", defaults.tracking_url),
            tax_id: var("RECEIPT_TAX_ID", defaults.tax_id),
            jurisdiction: var("RECEIPT_JURISDICTION", defaults.jurisdiction),
            contact: var("RECEIPT_CONTACT", defaults.contact),
        }
    }
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            company_name: "FREIGHT CARRIERS".into(),
            tracking_url: "www.freightcarriers.in/track".into(),
            tax_id: "GSTIN: 36AAAAA0000A1Z5".into(),
            jurisdiction: "Subject to Hyderabad jurisdiction".into(),
            contact: "Customer care: 1800-000-0000".into(),
        }
    }
}
