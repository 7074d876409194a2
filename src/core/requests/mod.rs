//! Request builders, one parameter struct per tool operation.
//!
//! Each struct deserializes from the tool's JSON arguments (caller-facing
//! snake_case names and per-operation defaults) and implements
//! [`BuildRequest`](crate::domain::ports::BuildRequest) to produce the wire
//! request. Nothing here touches the network.

pub mod branches;
pub mod categories;
pub mod customers;
pub mod invoices;
pub mod orders;
pub mod products;

use crate::domain::model::WireParams;

pub use branches::ListBranches;
pub use categories::ListCategories;
pub use customers::{CreateCustomer, GetCustomer, SearchCustomers};
pub use invoices::{GetInvoice, ListInvoices};
pub use orders::{CreateOrder, GetOrder, ListOrders};
pub use products::{GetProduct, ListProducts};

/// Largest page the remote API serves.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Wire field names expected by the KiotViet public API.
pub mod wire {
    pub const PAGE_SIZE: &str = "pageSize";
    pub const CURRENT_ITEM: &str = "currentItem";
    pub const ORDER_BY: &str = "orderBy";
    pub const ORDER_DIRECTION: &str = "orderDirection";

    pub const INCLUDE_INVENTORY: &str = "includeInventory";
    pub const INCLUDE_TOTAL: &str = "includeTotal";
    pub const INCLUDE_PAYMENT: &str = "includePayment";
    // Misspelled upstream; the API ignores the corrected spelling.
    pub const HIERARCHICAL_DATA: &str = "hierachicalData";

    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const CODE: &str = "code";
    pub const CATEGORY_ID: &str = "categoryId";
    pub const CONTACT_NUMBER: &str = "contactNumber";
    pub const EMAIL: &str = "email";
    pub const ADDRESS: &str = "address";
    pub const GENDER: &str = "gender";
    pub const BIRTH_DATE: &str = "birthDate";
    pub const COMMENTS: &str = "comments";

    pub const BRANCH_ID: &str = "branchId";
    pub const BRANCH_IDS: &str = "branchIds";
    pub const CUSTOMER: &str = "customer";
    pub const CUSTOMER_IDS: &str = "customerIds";
    pub const STATUS: &str = "status";
    pub const FROM_DATE: &str = "fromDate";
    pub const TO_DATE: &str = "toDate";
    pub const FROM_PURCHASE_DATE: &str = "fromPurchaseDate";
    pub const TO_PURCHASE_DATE: &str = "toPurchaseDate";
    pub const PURCHASE_DATE: &str = "purchaseDate";
    pub const ORDER_DETAILS: &str = "orderDetails";
    pub const DESCRIPTION: &str = "description";
    pub const TOTAL_PAYMENT: &str = "totalPayment";
    pub const DISCOUNT: &str = "discount";
    pub const METHOD: &str = "method";
}

pub fn clamp_page_size(page_size: u32) -> u32 {
    page_size.min(MAX_PAGE_SIZE)
}

/// Starts a list query with `pageSize` (clamped) and `currentItem`.
pub(crate) fn pagination(page_size: u32, current_item: u64) -> WireParams {
    let mut params = WireParams::new();
    params
        .insert(wire::PAGE_SIZE, clamp_page_size(page_size))
        .insert(wire::CURRENT_ITEM, current_item);
    params
}

/// Detail lookups only send `includePayment` when it was requested.
pub(crate) fn include_payment_params(include_payment: bool) -> Option<WireParams> {
    if !include_payment {
        return None;
    }
    let mut params = WireParams::new();
    params.insert(wire::INCLUDE_PAYMENT, true);
    Some(params)
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn page_size_20() -> u32 {
    20
}

pub(crate) fn page_size_50() -> u32 {
    50
}

pub(crate) fn page_size_100() -> u32 {
    100
}
