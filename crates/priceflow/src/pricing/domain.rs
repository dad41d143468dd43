use serde::{Deserialize, Serialize};

/// Raw prediction payload as submitted by storefront clients.
///
/// Wire names match the training dataset headers so the same payload the
/// exporter was fit on round-trips through the API unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRequest {
    #[serde(rename = "Product_Name")]
    pub product_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "MRP")]
    pub mrp: f64,
    #[serde(rename = "Blinkit_Price")]
    pub blinkit_price: f64,
    #[serde(rename = "Zepto_Price")]
    pub zepto_price: f64,
    #[serde(rename = "Instamart_Price")]
    pub instamart_price: f64,
    #[serde(rename = "Margin")]
    pub margin: f64,
    #[serde(rename = "Festive_Seasonal_Impact")]
    pub festive_seasonal_impact: String,
    #[serde(rename = "Shelf_Life_days")]
    pub shelf_life_days: f64,
    #[serde(rename = "Min_Stock")]
    pub min_stock: f64,
    #[serde(rename = "Max_Stock")]
    pub max_stock: f64,
    #[serde(rename = "Customer_Sentiment")]
    pub customer_sentiment: String,
    #[serde(rename = "Weight_g")]
    pub weight_g: f64,
    #[serde(rename = "Weight_Unit")]
    pub weight_unit: String,
    #[serde(rename = "Order_Date")]
    pub order_date: String,
    #[serde(rename = "Order_Hour")]
    pub order_hour: u8,
    pub customer_type: String,
}

/// Customer tiers recognized by the discount policy. Anything the policy
/// does not recognize falls back to `Standard` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerTier {
    Premium,
    Normal,
    Standard,
}

impl CustomerTier {
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "premium" => Self::Premium,
            "normal" => Self::Normal,
            _ => Self::Standard,
        }
    }

    /// Share of the predicted ceiling this tier is granted.
    pub const fn multiplier(self) -> f64 {
        match self {
            CustomerTier::Premium => 0.75,
            CustomerTier::Normal => 0.45,
            CustomerTier::Standard => 0.25,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CustomerTier::Premium => "premium",
            CustomerTier::Normal => "normal",
            CustomerTier::Standard => "standard",
        }
    }
}

/// Daypart bucket derived from the order hour with the boundaries the model
/// was trained on. Total on purpose: anything outside the named windows,
/// including late-night hours, is `Night`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const fn from_hour(hour: u8) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Vocabulary string the time encoder was fit on.
    pub const fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

/// Request-level failures reported back to the caller as 422s.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Order_Date '{value}' is not a valid YYYY-MM-DD date")]
    InvalidOrderDate { value: String },
    #[error("Order_Hour {hour} is outside the 0-23 range")]
    HourOutOfRange { hour: u8 },
}
