//! Tool catalog and dispatch.
//!
//! Every tool takes `access_token` and `retailer` plus its own parameters,
//! builds one [`ApiRequest`] and returns the remote JSON verbatim.

use crate::core::client::{ClientSettings, KiotVietClient};
use crate::core::requests::{
    CreateCustomer, CreateOrder, GetCustomer, GetInvoice, GetOrder, GetProduct, ListBranches,
    ListCategories, ListInvoices, ListOrders, ListProducts, SearchCustomers,
};
use crate::domain::model::{ApiRequest, Credentials};
use crate::domain::ports::{ApiTransport, BuildRequest, ConfigProvider};
use crate::utils::error::{KiotVietError, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    ListProducts,
    GetProduct,
    SearchCustomers,
    GetCustomer,
    CreateCustomer,
    ListOrders,
    GetOrder,
    CreateOrder,
    ListInvoices,
    GetInvoice,
    ListCategories,
    ListBranches,
}

impl ToolName {
    pub const ALL: [ToolName; 12] = [
        ToolName::ListProducts,
        ToolName::GetProduct,
        ToolName::SearchCustomers,
        ToolName::GetCustomer,
        ToolName::CreateCustomer,
        ToolName::ListOrders,
        ToolName::GetOrder,
        ToolName::CreateOrder,
        ToolName::ListInvoices,
        ToolName::GetInvoice,
        ToolName::ListCategories,
        ToolName::ListBranches,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::ListProducts => "kv_list_products",
            ToolName::GetProduct => "kv_get_product",
            ToolName::SearchCustomers => "kv_search_customers",
            ToolName::GetCustomer => "kv_get_customer",
            ToolName::CreateCustomer => "kv_create_customer",
            ToolName::ListOrders => "kv_list_orders",
            ToolName::GetOrder => "kv_get_order",
            ToolName::CreateOrder => "kv_create_order",
            ToolName::ListInvoices => "kv_list_invoices",
            ToolName::GetInvoice => "kv_get_invoice",
            ToolName::ListCategories => "kv_list_categories",
            ToolName::ListBranches => "kv_list_branches",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: ToolName,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name.as_str(),
            "title": self.title,
            "description": self.description,
            "inputSchema": self.input_schema,
        })
    }
}

/// Adds the credential properties every tool requires.
fn input_schema(properties: Value, required: &[&str]) -> Value {
    let mut props = Map::new();
    props.insert(
        "access_token".to_string(),
        json!({ "type": "string", "description": "OAuth2 access token, injected by the host system" }),
    );
    props.insert(
        "retailer".to_string(),
        json!({ "type": "string", "description": "KiotViet retailer (store) name" }),
    );
    if let Value::Object(extra) = properties {
        props.extend(extra);
    }

    let mut required_fields = vec!["access_token", "retailer"];
    required_fields.extend_from_slice(required);

    json!({
        "type": "object",
        "properties": props,
        "required": required_fields,
    })
}

fn pagination_properties(default_page_size: u32) -> Value {
    json!({
        "page_size": {
            "type": "integer",
            "minimum": 1,
            "default": default_page_size,
            "description": format!("Items per page (default {}, max 100)", default_page_size)
        },
        "current_item": {
            "type": "integer",
            "minimum": 0,
            "default": 0,
            "description": "Offset of the first record to return"
        }
    })
}

fn merge(mut base: Value, extra: Value) -> Value {
    if let (Value::Object(base_map), Value::Object(extra_map)) = (&mut base, extra) {
        base_map.extend(extra_map);
    }
    base
}

fn id_list(description: &str) -> Value {
    json!({ "type": "array", "items": { "type": "integer" }, "description": description })
}

fn date(description: &str) -> Value {
    json!({ "type": "string", "description": format!("{} (YYYY-MM-DD)", description) })
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    ToolName::ALL.into_iter().map(definition).collect()
}

pub fn definition(name: ToolName) -> ToolDefinition {
    match name {
        ToolName::ListProducts => ToolDefinition {
            name,
            title: "List products",
            description: "Get the list of KiotViet products. Use it to look up goods, prices, \
                          stock levels and for product reports.",
            input_schema: input_schema(
                merge(
                    pagination_properties(50),
                    json!({
                        "name": { "type": "string", "description": "Search by product name" },
                        "category_id": { "type": "integer", "description": "Filter by category ID" },
                        "include_inventory": { "type": "boolean", "default": true, "description": "Include per-branch inventory" },
                        "order_by": { "type": "string", "description": "Sort field, e.g. name or code" },
                        "order_direction": { "type": "string", "enum": ["Asc", "Desc"], "description": "Sort direction" }
                    }),
                ),
                &[],
            ),
        },
        ToolName::GetProduct => ToolDefinition {
            name,
            title: "Get product",
            description: "Get the details of one product by ID or, when no ID is known, by product code.",
            input_schema: input_schema(
                json!({
                    "product_id": { "type": "integer", "description": "Product ID" },
                    "product_code": { "type": "string", "description": "Product code, used when product_id is not given" }
                }),
                &[],
            ),
        },
        ToolName::SearchCustomers => ToolDefinition {
            name,
            title: "Search customers",
            description: "Search customers by name, phone number or customer code.",
            input_schema: input_schema(
                merge(
                    pagination_properties(20),
                    json!({
                        "name": { "type": "string", "description": "Search by customer name" },
                        "contact_number": { "type": "string", "description": "Search by phone number" },
                        "code": { "type": "string", "description": "Search by customer code" },
                        "include_total": { "type": "boolean", "default": false, "description": "Include TotalInvoice, TotalPoint and TotalRevenue" }
                    }),
                ),
                &[],
            ),
        },
        ToolName::GetCustomer => ToolDefinition {
            name,
            title: "Get customer",
            description: "Get the details of one customer by ID or, when no ID is known, by customer code.",
            input_schema: input_schema(
                json!({
                    "customer_id": { "type": "integer", "description": "Customer ID" },
                    "customer_code": { "type": "string", "description": "Customer code, used when customer_id is not given" }
                }),
                &[],
            ),
        },
        ToolName::CreateCustomer => ToolDefinition {
            name,
            title: "Create customer",
            description: "Create a new customer in KiotViet.",
            input_schema: input_schema(
                json!({
                    "name": { "type": "string", "description": "Customer name" },
                    "code": { "type": "string", "description": "Customer code" },
                    "contact_number": { "type": "string", "description": "Phone number" },
                    "email": { "type": "string", "description": "Email address" },
                    "address": { "type": "string", "description": "Address" },
                    "gender": { "type": "boolean", "description": "true for male, false for female" },
                    "birth_date": date("Birth date"),
                    "comments": { "type": "string", "description": "Notes" }
                }),
                &["name"],
            ),
        },
        ToolName::ListOrders => ToolDefinition {
            name,
            title: "List orders",
            description: "Get the list of orders. Use it for revenue, undelivered orders or unpaid orders.",
            input_schema: input_schema(
                merge(
                    pagination_properties(50),
                    json!({
                        "branch_ids": id_list("Filter by branch IDs"),
                        "status": id_list("Filter by order status codes"),
                        "customer_ids": id_list("Filter by customer IDs"),
                        "from_date": date("From date"),
                        "to_date": date("To date"),
                        "include_payment": { "type": "boolean", "default": false, "description": "Include payment information" }
                    }),
                ),
                &[],
            ),
        },
        ToolName::GetOrder => ToolDefinition {
            name,
            title: "Get order",
            description: "Get the details of one order by ID or, when no ID is known, by order code.",
            input_schema: input_schema(
                json!({
                    "order_id": { "type": "integer", "description": "Order ID" },
                    "order_code": { "type": "string", "description": "Order code, used when order_id is not given" },
                    "include_payment": { "type": "boolean", "default": false, "description": "Include payment information" }
                }),
                &[],
            ),
        },
        ToolName::CreateOrder => ToolDefinition {
            name,
            title: "Create order",
            description: "Create a new KiotViet order. Only call this after the user has confirmed \
                          the order content.",
            input_schema: input_schema(
                json!({
                    "branch_id": { "type": "integer", "description": "Branch ID" },
                    "purchase_date": date("Purchase date"),
                    "order_details": {
                        "type": "array",
                        "description": "Line items",
                        "items": {
                            "type": "object",
                            "properties": {
                                "productId": { "type": "integer" },
                                "quantity": { "type": "number" },
                                "price": { "type": "number" },
                                "discount": { "type": "number" }
                            },
                            "required": ["productId", "quantity", "price"]
                        }
                    },
                    "customer_id": { "type": "integer", "description": "Customer ID" },
                    "description": { "type": "string", "description": "Notes" },
                    "total_payment": { "type": "number", "description": "Amount already paid by the customer" },
                    "discount": { "type": "number", "description": "Order-level discount" },
                    "method": { "type": "string", "enum": ["Cash", "Card", "Transfer"], "description": "Payment method" }
                }),
                &["branch_id", "purchase_date", "order_details"],
            ),
        },
        ToolName::ListInvoices => ToolDefinition {
            name,
            title: "List invoices",
            description: "Get sales invoices within a time period. Use it for revenue summaries and \
                          per-day or per-customer analysis.",
            input_schema: input_schema(
                merge(
                    pagination_properties(50),
                    json!({
                        "branch_ids": id_list("Filter by branch IDs"),
                        "from_date": date("From last-modified date"),
                        "to_date": date("To last-modified date"),
                        "from_purchase_date": date("From transaction date"),
                        "to_purchase_date": date("To transaction date"),
                        "customer_ids": id_list("Filter by customer IDs"),
                        "include_payment": { "type": "boolean", "default": false, "description": "Include payment information" }
                    }),
                ),
                &[],
            ),
        },
        ToolName::GetInvoice => ToolDefinition {
            name,
            title: "Get invoice",
            description: "Get the details of one invoice by ID or, when no ID is known, by invoice code.",
            input_schema: input_schema(
                json!({
                    "invoice_id": { "type": "integer", "description": "Invoice ID" },
                    "invoice_code": { "type": "string", "description": "Invoice code, used when invoice_id is not given" },
                    "include_payment": { "type": "boolean", "default": false, "description": "Include payment information" }
                }),
                &[],
            ),
        },
        ToolName::ListCategories => ToolDefinition {
            name,
            title: "List categories",
            description: "Get the list of product categories.",
            input_schema: input_schema(
                merge(
                    pagination_properties(100),
                    json!({
                        "hierarchical_data": { "type": "boolean", "default": true, "description": "Return nested children" }
                    }),
                ),
                &[],
            ),
        },
        ToolName::ListBranches => ToolDefinition {
            name,
            title: "List branches",
            description: "Get the store's branches. Use it to find a branch_id before creating \
                          orders or filtering data.",
            input_schema: input_schema(json!({}), &[]),
        },
    }
}

fn parse_args<T: DeserializeOwned>(arguments: &Value) -> Result<T> {
    T::deserialize(arguments).map_err(|e| KiotVietError::invalid_argument(e.to_string()))
}

fn build<T: DeserializeOwned + BuildRequest>(arguments: &Value) -> Result<ApiRequest> {
    parse_args::<T>(arguments)?.build_request()
}

/// Maps a tool call to its wire request without touching the network.
pub fn build_tool_request(tool: ToolName, arguments: &Value) -> Result<ApiRequest> {
    match tool {
        ToolName::ListProducts => build::<ListProducts>(arguments),
        ToolName::GetProduct => build::<GetProduct>(arguments),
        ToolName::SearchCustomers => build::<SearchCustomers>(arguments),
        ToolName::GetCustomer => build::<GetCustomer>(arguments),
        ToolName::CreateCustomer => build::<CreateCustomer>(arguments),
        ToolName::ListOrders => build::<ListOrders>(arguments),
        ToolName::GetOrder => build::<GetOrder>(arguments),
        ToolName::CreateOrder => build::<CreateOrder>(arguments),
        ToolName::ListInvoices => build::<ListInvoices>(arguments),
        ToolName::GetInvoice => build::<GetInvoice>(arguments),
        ToolName::ListCategories => build::<ListCategories>(arguments),
        ToolName::ListBranches => build::<ListBranches>(arguments),
    }
}

pub async fn dispatch<T: ApiTransport + ?Sized>(
    transport: &T,
    tool: ToolName,
    arguments: &Value,
) -> Result<Value> {
    let request = build_tool_request(tool, arguments)?;
    tracing::debug!("{} -> {} {}", tool, request.method, request.path);
    transport.execute(&request).await
}

/// Runs tools with a fresh [`KiotVietClient`] per call, built from the
/// credentials in the call's own arguments.
#[derive(Debug, Clone, Default)]
pub struct Toolbox {
    settings: ClientSettings,
}

impl Toolbox {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(ClientSettings::from_config(config))
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub async fn call(&self, tool: ToolName, arguments: &Value) -> Result<Value> {
        let empty = json!({});
        let arguments = if arguments.is_null() { &empty } else { arguments };

        let credentials: Credentials = parse_args(arguments)?;
        tracing::info!("Calling {} for retailer {}", tool, credentials.retailer);

        let client = KiotVietClient::with_settings(credentials, self.settings.clone());
        let result = dispatch(&client, tool, arguments).await;
        client.close();
        result
    }
}
