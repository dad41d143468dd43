use serde::{Deserialize, Serialize};

/// Min-max bounds fitted for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledColumn {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl ScaledColumn {
    /// Maps `value` into the fitted range. Columns that were constant in
    /// the training data scale by 1.0 instead of dividing by zero.
    pub fn apply(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        let divisor = if range == 0.0 { 1.0 } else { range };
        (value - self.min) / divisor
    }
}

/// Fitted min-max scaler covering every numeric feature column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericScaler {
    columns: Vec<ScaledColumn>,
}

impl NumericScaler {
    pub fn new(columns: Vec<ScaledColumn>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> impl Iterator<Item = &ScaledColumn> {
        self.columns.iter()
    }
}
