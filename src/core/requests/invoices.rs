use super::{include_payment_params, page_size_50, pagination, wire};
use crate::domain::model::{ApiRequest, Identifier};
use crate::domain::ports::BuildRequest;
use crate::utils::error::Result;
use serde::Deserialize;

/// `GET /invoices` within a time window.
///
/// `from_date`/`to_date` filter on the last-modified date, while the
/// `*_purchase_date` pair filters on the transaction date.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListInvoices {
    pub branch_ids: Option<Vec<i64>>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub from_purchase_date: Option<String>,
    pub to_purchase_date: Option<String>,
    pub customer_ids: Option<Vec<i64>>,
    #[serde(default = "page_size_50")]
    pub page_size: u32,
    #[serde(default)]
    pub current_item: u64,
    #[serde(default)]
    pub include_payment: bool,
}

impl Default for ListInvoices {
    fn default() -> Self {
        Self {
            branch_ids: None,
            from_date: None,
            to_date: None,
            from_purchase_date: None,
            to_purchase_date: None,
            customer_ids: None,
            page_size: page_size_50(),
            current_item: 0,
            include_payment: false,
        }
    }
}

impl BuildRequest for ListInvoices {
    fn build_request(&self) -> Result<ApiRequest> {
        let mut params = pagination(self.page_size, self.current_item);
        params
            .insert(wire::INCLUDE_PAYMENT, self.include_payment)
            .insert_list(wire::BRANCH_IDS, self.branch_ids.as_deref())
            .insert_str(wire::FROM_DATE, self.from_date.as_deref())
            .insert_str(wire::TO_DATE, self.to_date.as_deref())
            .insert_str(wire::FROM_PURCHASE_DATE, self.from_purchase_date.as_deref())
            .insert_str(wire::TO_PURCHASE_DATE, self.to_purchase_date.as_deref())
            .insert_list(wire::CUSTOMER_IDS, self.customer_ids.as_deref());
        Ok(ApiRequest::get("/invoices", Some(params)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GetInvoice {
    pub invoice_id: Option<i64>,
    pub invoice_code: Option<String>,
    #[serde(default)]
    pub include_payment: bool,
}

impl BuildRequest for GetInvoice {
    fn build_request(&self) -> Result<ApiRequest> {
        let ident = Identifier::resolve(
            self.invoice_id,
            self.invoice_code.as_deref(),
            "invoice_id",
            "invoice_code",
        )?;
        Ok(ApiRequest::get(
            ident.path("invoices"),
            include_payment_params(self.include_payment),
        ))
    }
}
