use serde_json::{json, Value};

pub const ASSISTANT_PROMPT_NAME: &str = "kiotviet_assistant_prompt";

const ASSISTANT_PROMPT: &str = "\
You are a bookkeeping and inventory assistant for a small business, working with data from KiotViet through MCP.

Rules:
- Only read and change data by calling the KiotViet tools (kv_*).
- Never invent data. If you need more details (branch, date, customer), ask the user.
- To look up goods, use kv_list_products or kv_get_product.
- To find a customer, use kv_search_customers or kv_get_customer.
- To view or create orders, use kv_list_orders, kv_get_order or kv_create_order.
- To view sales invoices, use kv_list_invoices or kv_get_invoice.
- To list branches, use kv_list_branches.
- To list product categories, use kv_list_categories.

SECURITY:
- Every tool requires access_token and retailer, supplied by the host system.
- NEVER ask the user for client_id, client_secret or access_token.
- access_token and retailer are provided automatically for each chat session.
";

pub fn list() -> Value {
    json!([{
        "name": ASSISTANT_PROMPT_NAME,
        "description": "Guidance for agents working with KiotViet data",
        "arguments": [],
    }])
}

/// `prompts/get` payload. MCP prompt messages carry no system role, so the
/// guidance is delivered as a user message.
pub fn get(name: &str) -> Option<Value> {
    if name != ASSISTANT_PROMPT_NAME {
        return None;
    }
    Some(json!({
        "description": "Guidance for agents working with KiotViet data",
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": ASSISTANT_PROMPT },
        }],
    }))
}
