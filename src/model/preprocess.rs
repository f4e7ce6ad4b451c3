//! Column transformer: standard scaling for numeric columns, one-hot for the category

use crate::features::FeatureRecord;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NumericColumn {
    pub name: String,
    pub mean: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoricalColumn {
    pub name: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Preprocessing {
    pub numeric: Vec<NumericColumn>,
    pub categorical: CategoricalColumn,
}

impl Preprocessing {
    /// Length of the encoded feature vector
    pub fn width(&self) -> usize {
        self.numeric.len() + self.categorical.categories.len()
    }

    /// Scaled numeric columns followed by the one-hot block.
    ///
    /// Returns the name of the first column the record cannot supply. An
    /// unknown category encodes as all zeros.
    pub fn encode(&self, record: &FeatureRecord) -> Result<Vec<f64>, String> {
        let mut x = Vec::with_capacity(self.width());
        for col in &self.numeric {
            let raw = record.numeric(&col.name).ok_or_else(|| col.name.clone())?;
            x.push((raw - col.mean) / col.scale);
        }
        let label = record.ocean_proximity.label();
        x.extend(
            self.categorical
                .categories
                .iter()
                .map(|c| if c == label { 1.0 } else { 0.0 }),
        );
        Ok(x)
    }
}
