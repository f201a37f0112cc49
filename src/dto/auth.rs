use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims of the bearer token issued by the identity provider.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}
