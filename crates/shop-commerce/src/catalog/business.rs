//! Business profile.

use crate::ids::BusinessId;
use serde::{Deserialize, Serialize};

/// Public profile of a business, as shown on its storefront page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub id: BusinessId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Logo URL.
    #[serde(default)]
    pub logo: Option<String>,
    /// URL-friendly handle used in storefront routes.
    pub slug: String,
}
