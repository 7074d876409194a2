use super::{include_payment_params, page_size_50, pagination, wire};
use crate::domain::model::{ApiRequest, Identifier, WireParams};
use crate::domain::ports::BuildRequest;
use crate::utils::error::Result;
use serde::Deserialize;
use serde_json::{Map, Value};

/// `GET /orders`: undelivered, unpaid or per-branch order views.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListOrders {
    pub branch_ids: Option<Vec<i64>>,
    pub status: Option<Vec<i64>>,
    pub customer_ids: Option<Vec<i64>>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    #[serde(default = "page_size_50")]
    pub page_size: u32,
    #[serde(default)]
    pub current_item: u64,
    #[serde(default)]
    pub include_payment: bool,
}

impl Default for ListOrders {
    fn default() -> Self {
        Self {
            branch_ids: None,
            status: None,
            customer_ids: None,
            from_date: None,
            to_date: None,
            page_size: page_size_50(),
            current_item: 0,
            include_payment: false,
        }
    }
}

impl BuildRequest for ListOrders {
    fn build_request(&self) -> Result<ApiRequest> {
        let mut params = pagination(self.page_size, self.current_item);
        params
            .insert(wire::INCLUDE_PAYMENT, self.include_payment)
            .insert_list(wire::BRANCH_IDS, self.branch_ids.as_deref())
            .insert_list(wire::STATUS, self.status.as_deref())
            .insert_list(wire::CUSTOMER_IDS, self.customer_ids.as_deref())
            .insert_str(wire::FROM_DATE, self.from_date.as_deref())
            .insert_str(wire::TO_DATE, self.to_date.as_deref());
        Ok(ApiRequest::get("/orders", Some(params)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GetOrder {
    pub order_id: Option<i64>,
    pub order_code: Option<String>,
    #[serde(default)]
    pub include_payment: bool,
}

impl BuildRequest for GetOrder {
    fn build_request(&self) -> Result<ApiRequest> {
        let ident = Identifier::resolve(
            self.order_id,
            self.order_code.as_deref(),
            "order_id",
            "order_code",
        )?;
        Ok(ApiRequest::get(
            ident.path("orders"),
            include_payment_params(self.include_payment),
        ))
    }
}

/// `POST /orders`. The agent must confirm the content with the user first.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateOrder {
    pub branch_id: i64,
    /// `YYYY-MM-DD`.
    pub purchase_date: String,
    /// Line items passed through verbatim: `productId`, `quantity`, `price`
    /// and optionally `discount`.
    pub order_details: Vec<Map<String, Value>>,
    pub customer_id: Option<i64>,
    pub description: Option<String>,
    pub total_payment: Option<f64>,
    pub discount: Option<f64>,
    /// Cash, Card or Transfer.
    pub method: Option<String>,
}

impl BuildRequest for CreateOrder {
    fn build_request(&self) -> Result<ApiRequest> {
        let mut body = WireParams::new();
        body.insert(wire::BRANCH_ID, self.branch_id)
            .insert(wire::PURCHASE_DATE, self.purchase_date.as_str())
            .insert(wire::ORDER_DETAILS, self.order_details.clone());

        if let Some(customer_id) = self.customer_id.filter(|id| *id != 0) {
            let mut customer = WireParams::new();
            customer.insert(wire::ID, customer_id);
            body.insert(wire::CUSTOMER, customer.into_value());
        }

        body.insert_str(wire::DESCRIPTION, self.description.as_deref())
            .insert_present(wire::TOTAL_PAYMENT, self.total_payment)
            .insert_present(wire::DISCOUNT, self.discount)
            .insert_str(wire::METHOD, self.method.as_deref());

        Ok(ApiRequest::post("/orders", body.into_value()))
    }
}
