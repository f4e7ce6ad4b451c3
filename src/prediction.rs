//! Validate-then-predict flow behind the Predict button

use crate::features::{validate, FeatureRecord, FormState, Validation};
use crate::model::{ModelError, Predictor};
use crate::utils::format_currency;
use tracing::debug;

pub const PROVENANCE_CAPTION: &str =
    "Prediction generated using a Random Forest model trained on California housing data.";

/// A single scalar estimate in dollars
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub value: f64,
}

impl Estimate {
    /// `$201,667`
    pub fn formatted(&self) -> String {
        format_currency(self.value)
    }

    pub fn message(&self) -> String {
        format!("Estimated Median House Value: {}", self.formatted())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Blocked { reason: &'static str },
    Estimated { record: FeatureRecord, estimate: Estimate },
}

/// Snapshot and validate the form. Evaluated on every frame.
pub fn check(form: &FormState) -> Result<FeatureRecord, &'static str> {
    let record = form.record();
    match validate(&record) {
        Validation::Ok => Ok(record),
        Validation::Blocked { reason } => Err(reason),
    }
}

/// Run one prediction request. The predictor is not called for a blocked form.
pub fn submit(form: &FormState, predictor: &dyn Predictor) -> Result<Outcome, ModelError> {
    let record = match check(form) {
        Ok(record) => record,
        Err(reason) => {
            debug!(reason, "Prediction blocked by validation");
            return Ok(Outcome::Blocked { reason });
        }
    };

    let value = predictor.predict(&record)?;
    debug!(?record, in_domain = record.within_domain(), value, "Prediction complete");
    Ok(Outcome::Estimated {
        record,
        estimate: Estimate { value },
    })
}
