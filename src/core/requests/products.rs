use super::{default_true, page_size_50, pagination, wire};
use crate::domain::model::{ApiRequest, Identifier};
use crate::domain::ports::BuildRequest;
use crate::utils::error::Result;
use serde::Deserialize;

/// `GET /products`: product lookup, prices and stock.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListProducts {
    #[serde(default = "page_size_50")]
    pub page_size: u32,
    #[serde(default)]
    pub current_item: u64,
    pub name: Option<String>,
    pub category_id: Option<i64>,
    #[serde(default = "default_true")]
    pub include_inventory: bool,
    pub order_by: Option<String>,
    pub order_direction: Option<String>,
}

impl Default for ListProducts {
    fn default() -> Self {
        Self {
            page_size: page_size_50(),
            current_item: 0,
            name: None,
            category_id: None,
            include_inventory: true,
            order_by: None,
            order_direction: None,
        }
    }
}

impl BuildRequest for ListProducts {
    fn build_request(&self) -> Result<ApiRequest> {
        let mut params = pagination(self.page_size, self.current_item);
        params
            .insert(wire::INCLUDE_INVENTORY, self.include_inventory)
            .insert_str(wire::NAME, self.name.as_deref())
            .insert_id(wire::CATEGORY_ID, self.category_id)
            .insert_str(wire::ORDER_BY, self.order_by.as_deref())
            .insert_str(wire::ORDER_DIRECTION, self.order_direction.as_deref());
        Ok(ApiRequest::get("/products", Some(params)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GetProduct {
    pub product_id: Option<i64>,
    pub product_code: Option<String>,
}

impl BuildRequest for GetProduct {
    fn build_request(&self) -> Result<ApiRequest> {
        let ident = Identifier::resolve(
            self.product_id,
            self.product_code.as_deref(),
            "product_id",
            "product_code",
        )?;
        Ok(ApiRequest::get(ident.path("products"), None))
    }
}
