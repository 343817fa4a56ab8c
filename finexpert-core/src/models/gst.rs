use serde::{Deserialize, Serialize};

/// Whether the entered amount excludes or already includes GST.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GstMode {
    /// GST is added on top of the amount.
    #[default]
    Exclusive,
    /// The amount is the GST-inclusive price.
    Inclusive,
}

/// How the seller is registered, which decides how the tax is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationType {
    /// Intra-state supply: tax split evenly into CGST and SGST.
    #[default]
    Regular,
    /// Composition scheme or inter-state supply: a single IGST figure.
    Composition,
}
