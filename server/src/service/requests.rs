//! Request and response bodies that exist only at the HTTP boundary.

use scoring::PageRequest;
use serde::{Deserialize, Serialize};

use crate::persistence::AdminAccount;

/// `?page=&limit=` on the leaderboard listing.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        PageRequest::new(params.page, params.limit)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    #[serde(default)]
    pub ids: Option<Vec<i64>>,
    #[serde(default)]
    pub delete_all: bool,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
}

impl From<AdminAccount> for LoginUser {
    fn from(account: AdminAccount) -> Self {
        Self {
            id: account.id,
            username: account.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: LoginUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_delete_fields_are_optional() {
        let req: BulkDeleteRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.ids, None);
        assert!(!req.delete_all);

        let req: BulkDeleteRequest =
            serde_json::from_str(r#"{"ids":[1,2],"deleteAll":false}"#).unwrap();
        assert_eq!(req.ids, Some(vec![1, 2]));

        let req: BulkDeleteRequest =
            serde_json::from_str(r#"{"ids":null,"deleteAll":true}"#).unwrap();
        assert_eq!(req.ids, None);
        assert!(req.delete_all);
    }

    #[test]
    fn page_params_fill_defaults() {
        let req: PageRequest = PageParams::default().into();
        assert_eq!(req, PageRequest::new(Some(1), Some(10)));
    }
}
