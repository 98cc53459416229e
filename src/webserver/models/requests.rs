/// API request type definitions

use serde::{ Deserialize, Serialize };

/// POST /api/tokens body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTokenRequest {
    pub address: String,
}
