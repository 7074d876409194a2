use crate::domain::model::ApiRequest;
use crate::domain::ports::BuildRequest;
use crate::utils::error::Result;
use serde::Deserialize;

/// `GET /branches`. Agents use it to find a `branch_id` before filtering or
/// creating orders.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListBranches {}

impl BuildRequest for ListBranches {
    fn build_request(&self) -> Result<ApiRequest> {
        Ok(ApiRequest::get("/branches", None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Method;

    #[test]
    fn plain_get() {
        let request = ListBranches::default().build_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path, "/branches");
        assert!(request.params.is_none());
        assert!(request.body.is_none());
    }
}
