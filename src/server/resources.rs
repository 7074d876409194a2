//! Static schema hints that help an agent read the remote JSON.

use serde::Serialize;
use serde_json::Value;

pub const MIME_TYPE: &str = "application/json";

#[derive(Debug, Clone, Serialize)]
pub struct SchemaHint {
    pub endpoint: &'static str,
    pub fields: &'static [&'static str],
    pub notes: &'static str,
}

#[derive(Debug, Clone)]
pub struct SchemaResource {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub hint: SchemaHint,
}

impl SchemaResource {
    pub fn descriptor(&self) -> Value {
        serde_json::json!({
            "uri": self.uri,
            "name": self.name,
            "description": self.description,
            "mimeType": MIME_TYPE,
        })
    }

    pub fn contents(&self) -> serde_json::Result<Value> {
        let text = serde_json::to_string_pretty(&self.hint)?;
        Ok(serde_json::json!({
            "uri": self.uri,
            "mimeType": MIME_TYPE,
            "text": text,
        }))
    }
}

pub static RESOURCES: [SchemaResource; 4] = [
    SchemaResource {
        uri: "kiotviet://products_schema",
        name: "products_schema",
        description: "Fields returned by /products",
        hint: SchemaHint {
            endpoint: "/products",
            fields: &[
                "id",
                "code",
                "name",
                "categoryName",
                "basePrice",
                "inventories[].branchName",
                "inventories[].onHand",
            ],
            notes: "Used for stock questions, selling prices and product analysis.",
        },
    },
    SchemaResource {
        uri: "kiotviet://customers_schema",
        name: "customers_schema",
        description: "Fields returned by /customers",
        hint: SchemaHint {
            endpoint: "/customers",
            fields: &[
                "id",
                "code",
                "name",
                "contactNumber",
                "email",
                "address",
                "debt",
                "totalInvoiced",
                "totalPoint",
                "totalRevenue",
            ],
            notes: "Used to look up customers, purchase history and debts.",
        },
    },
    SchemaResource {
        uri: "kiotviet://orders_schema",
        name: "orders_schema",
        description: "Fields returned by /orders",
        hint: SchemaHint {
            endpoint: "/orders",
            fields: &[
                "id",
                "code",
                "purchaseDate",
                "branchName",
                "customerName",
                "total",
                "totalPayment",
                "status",
                "statusValue",
            ],
            notes: "Used to review orders and to create new ones.",
        },
    },
    SchemaResource {
        uri: "kiotviet://invoices_schema",
        name: "invoices_schema",
        description: "Fields returned by /invoices",
        hint: SchemaHint {
            endpoint: "/invoices",
            fields: &[
                "id",
                "code",
                "purchaseDate",
                "branchName",
                "customerName",
                "total",
                "totalPayment",
                "status",
            ],
            notes: "Used to review sales invoices and summarise revenue.",
        },
    },
];

pub fn find(uri: &str) -> Option<&'static SchemaResource> {
    RESOURCES.iter().find(|resource| resource.uri == uri)
}
