//! Application constants and configuration

pub const APP_NAME: &str = "California Housing Price Predictor";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_DIR_NAME: &str = "California Housing Predictor";
pub const LOG_FILE_NAME: &str = "california-housing-predictor.log";

/// Model artifact, resolved relative to the working directory
pub const MODEL_FILE_NAME: &str = "housing_price_model.json";

pub const PAGE_TITLE: &str = "🏡 California Housing Price Predictor";
pub const PAGE_INTRO: &str = "Enter house characteristics to estimate the median house value.";
pub const FEATURES_HEADING: &str = "House Features";
pub const PREDICT_BUTTON: &str = "Predict House Value";
