use super::{page_size_20, pagination, wire};
use crate::domain::model::{ApiRequest, Identifier, WireParams};
use crate::domain::ports::BuildRequest;
use crate::utils::error::Result;
use serde::Deserialize;

/// `GET /customers` by name, phone number or customer code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchCustomers {
    pub name: Option<String>,
    pub contact_number: Option<String>,
    pub code: Option<String>,
    #[serde(default = "page_size_20")]
    pub page_size: u32,
    #[serde(default)]
    pub current_item: u64,
    /// Adds TotalInvoice, TotalPoint and TotalRevenue to each row.
    #[serde(default)]
    pub include_total: bool,
}

impl Default for SearchCustomers {
    fn default() -> Self {
        Self {
            name: None,
            contact_number: None,
            code: None,
            page_size: page_size_20(),
            current_item: 0,
            include_total: false,
        }
    }
}

impl BuildRequest for SearchCustomers {
    fn build_request(&self) -> Result<ApiRequest> {
        let mut params = pagination(self.page_size, self.current_item);
        params
            .insert(wire::INCLUDE_TOTAL, self.include_total)
            .insert_str(wire::NAME, self.name.as_deref())
            .insert_str(wire::CONTACT_NUMBER, self.contact_number.as_deref())
            .insert_str(wire::CODE, self.code.as_deref());
        Ok(ApiRequest::get("/customers", Some(params)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GetCustomer {
    pub customer_id: Option<i64>,
    pub customer_code: Option<String>,
}

impl BuildRequest for GetCustomer {
    fn build_request(&self) -> Result<ApiRequest> {
        let ident = Identifier::resolve(
            self.customer_id,
            self.customer_code.as_deref(),
            "customer_id",
            "customer_code",
        )?;
        Ok(ApiRequest::get(ident.path("customers"), None))
    }
}

/// `POST /customers`. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CreateCustomer {
    pub name: String,
    pub code: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// `true` for male, `false` for female.
    pub gender: Option<bool>,
    /// `YYYY-MM-DD`.
    pub birth_date: Option<String>,
    pub comments: Option<String>,
}

impl BuildRequest for CreateCustomer {
    fn build_request(&self) -> Result<ApiRequest> {
        let mut body = WireParams::new();
        body.insert(wire::NAME, self.name.as_str())
            .insert_str(wire::CODE, self.code.as_deref())
            .insert_str(wire::CONTACT_NUMBER, self.contact_number.as_deref())
            .insert_str(wire::EMAIL, self.email.as_deref())
            .insert_str(wire::ADDRESS, self.address.as_deref())
            .insert_present(wire::GENDER, self.gender)
            .insert_str(wire::BIRTH_DATE, self.birth_date.as_deref())
            .insert_str(wire::COMMENTS, self.comments.as_deref());
        Ok(ApiRequest::post("/customers", body.into_value()))
    }
}
