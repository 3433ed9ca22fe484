use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};

use crate::{configuration::AdminAccount, routes::api_error::ApiError};

pub struct AdminRegistry {
    accounts: Vec<AdminAccount>,
}

impl AdminRegistry {
    pub fn new(accounts: Vec<AdminAccount>) -> Self {
        AdminRegistry { accounts }
    }

    pub fn find_by_token(&self, token: &str) -> Option<&AdminAccount> {
        self.accounts.iter().find(|a| a.token == token)
    }
}

/// A caller holding a configured admin bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminUser {
    pub user_id: String,
    pub email: String,
}

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AdminUser, ApiError> {
    let registry = req
        .app_data::<web::Data<AdminRegistry>>()
        .ok_or(ApiError::Forbidden)?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::Forbidden)?;

    match registry.find_by_token(token) {
        Some(account) => Ok(AdminUser {
            user_id: account.user_id.clone(),
            email: account.email.clone(),
        }),
        None => {
            log::warn!("Rejected admin request to {}: unknown token", req.path());
            Err(ApiError::Forbidden)
        }
    }
}
