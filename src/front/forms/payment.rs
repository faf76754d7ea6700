use crate::models;

/// Raw card fields as posted by the checkout form
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
pub struct CardFormData {
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub cvv: String,
    #[serde(default)]
    pub payment_method: models::payment::PaymentMethod,
}
