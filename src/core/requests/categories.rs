use super::{default_true, page_size_100, pagination, wire};
use crate::domain::model::ApiRequest;
use crate::domain::ports::BuildRequest;
use crate::utils::error::Result;
use serde::Deserialize;

/// `GET /categories`. With `hierarchical_data` the API nests children.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListCategories {
    #[serde(default = "default_true")]
    pub hierarchical_data: bool,
    #[serde(default = "page_size_100")]
    pub page_size: u32,
    #[serde(default)]
    pub current_item: u64,
}

impl Default for ListCategories {
    fn default() -> Self {
        Self {
            hierarchical_data: true,
            page_size: page_size_100(),
            current_item: 0,
        }
    }
}

impl BuildRequest for ListCategories {
    fn build_request(&self) -> Result<ApiRequest> {
        let mut params = pagination(self.page_size, self.current_item);
        params.insert(wire::HIERARCHICAL_DATA, self.hierarchical_data);
        Ok(ApiRequest::get("/categories", Some(params)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sends_upstream_spelling() {
        for flag in [true, false] {
            let params = ListCategories {
                hierarchical_data: flag,
                ..Default::default()
            };
            let wire_params = params.build_request().unwrap().params.unwrap();
            assert_eq!(wire_params.get("hierachicalData"), Some(&json!(flag)));
            assert!(!wire_params.contains_key("hierarchicalData"));
        }
    }

    #[test]
    fn defaults() {
        let params: ListCategories = serde_json::from_value(json!({})).unwrap();
        let request = params.build_request().unwrap();
        assert_eq!(request.path, "/categories");
        let wire_params = request.params.unwrap();
        assert_eq!(wire_params.get("pageSize"), Some(&json!(100)));
        assert_eq!(wire_params.get("hierachicalData"), Some(&json!(true)));
    }
}
