use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

/// One row of the parts table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartRecord {
    pub part_id: String,
    pub description: String,
    pub unit_price: Option<String>,
    pub extended_price: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    InvoiceId,
    PackListId,
    HarmonizationCode,
    CustomerPo,
    ShippingMethod,
    ShipDate,
    OrderDate,
    ShipToAddress,
}

impl Field {
    pub const ALL: [Self; 8] = [
        Self::InvoiceId,
        Self::PackListId,
        Self::HarmonizationCode,
        Self::CustomerPo,
        Self::ShippingMethod,
        Self::ShipDate,
        Self::OrderDate,
        Self::ShipToAddress,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InvoiceId => "Invoice ID",
            Self::PackListId => "PACK LIST ID",
            Self::HarmonizationCode => "Harmonization Code",
            Self::CustomerPo => "Customer PO",
            Self::ShippingMethod => "Ship Via",
            Self::ShipDate => "Ship Date",
            Self::OrderDate => "Order Date",
            Self::ShipToAddress => "Ship To",
        }
    }
}

/// Structured view of one invoice document.
///
/// Scalar fields that were never found stay `None`; an extracted value is
/// never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceRecord {
    pub invoice_id: Option<String>,
    pub pack_list_id: Option<String>,
    pub harmonization_code: Option<String>,
    pub customer_po: Option<String>,
    pub shipping_method: Option<String>,
    pub ship_date: Option<String>,
    pub order_date: Option<String>,
    pub ship_to_address: Option<String>,
    pub parts: Vec<PartRecord>,
}

impl InvoiceRecord {
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::InvoiceId => &self.invoice_id,
            Field::PackListId => &self.pack_list_id,
            Field::HarmonizationCode => &self.harmonization_code,
            Field::CustomerPo => &self.customer_po,
            Field::ShippingMethod => &self.shipping_method,
            Field::ShipDate => &self.ship_date,
            Field::OrderDate => &self.order_date,
            Field::ShipToAddress => &self.ship_to_address,
        };
        value.as_deref()
    }

    pub fn missing_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL
            .into_iter()
            .filter(|field| self.field(*field).is_none())
    }

    /// How many scalar fields were filled, out of how many.
    #[must_use]
    pub fn coverage(&self) -> (usize, usize) {
        let total = Field::ALL.len();
        (total - self.missing_fields().count(), total)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coverage().0 == 0 && self.parts.is_empty()
    }
}
