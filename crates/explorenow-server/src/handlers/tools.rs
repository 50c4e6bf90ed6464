//! Travel tool endpoints
//!
//! Mocked computations for the planner widgets; no storage access.

use crate::error::ApiError;
use crate::extractors::ValidJson;
use axum::extract::Path;
use axum::Json;
use explorenow_core::{Validate, ValidationError};
use serde::{Deserialize, Serialize};

const BASE_TRIP_COST: f64 = 5000.0;

#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    from: String,
    to: String,
    mode: String,
    #[serde(default = "one")]
    travelers: u32,
    #[serde(default)]
    addons: Vec<String>,
}

fn one() -> u32 {
    1
}

impl Validate for ExpenseRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.travelers == 0 {
            return Err(ValidationError::new("travelers", "must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ExpenseBreakdown {
    transport: f64,
    accommodation: f64,
    food: f64,
    activities: f64,
}

#[derive(Debug, Serialize)]
pub struct ExpenseEstimate {
    from: String,
    to: String,
    mode: String,
    travelers: u32,
    addons: Vec<String>,
    breakdown: ExpenseBreakdown,
    total: f64,
}

fn mode_multiplier(mode: &str) -> f64 {
    match mode {
        "flight" => 3.0,
        "train" => 1.5,
        _ => 1.0,
    }
}

fn estimate(req: ExpenseRequest) -> ExpenseEstimate {
    let total = BASE_TRIP_COST * mode_multiplier(&req.mode) * f64::from(req.travelers);
    ExpenseEstimate {
        breakdown: ExpenseBreakdown {
            transport: total * 0.4,
            accommodation: total * 0.3,
            food: total * 0.2,
            activities: total * 0.1,
        },
        total,
        from: req.from,
        to: req.to,
        mode: req.mode,
        travelers: req.travelers,
        addons: req.addons,
    }
}

pub async fn expenses_tracker(
    ValidJson(req): ValidJson<ExpenseRequest>,
) -> Result<Json<ExpenseEstimate>, ApiError> {
    Ok(Json(estimate(req)))
}

#[derive(Debug, Deserialize)]
pub struct VisaRequest {
    nationality: String,
    destination: String,
}

impl Validate for VisaRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.destination.trim().is_empty() {
            return Err(ValidationError::new("destination", "must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaInfo {
    nationality: String,
    destination: String,
    visa_required: bool,
    documents_needed: Vec<&'static str>,
    processing_time: &'static str,
    fee: &'static str,
}

pub async fn visa_check(
    ValidJson(req): ValidJson<VisaRequest>,
) -> Result<Json<VisaInfo>, ApiError> {
    Ok(Json(VisaInfo {
        nationality: req.nationality,
        destination: req.destination,
        visa_required: true,
        documents_needed: vec!["Passport", "Photos", "Bank Statement", "Travel Insurance"],
        processing_time: "15 working days",
        fee: "$80",
    }))
}

#[derive(Debug, Serialize)]
pub struct MoodDestinations {
    mood: String,
    destinations: &'static [&'static str],
}

fn destinations_for(mood: &str) -> &'static [&'static str] {
    match mood {
        "relax" => &["Goa", "Manali", "Coorg"],
        "adventure" => &["Rishikesh", "Leh", "Auli"],
        "cultural" => &["Jaipur", "Varanasi", "Delhi"],
        "nature" => &["Munnar", "Darjeeling", "Ooty"],
        _ => &["Mumbai", "Bangalore"],
    }
}

pub async fn mood_quiz(Path(mood): Path<String>) -> Json<MoodDestinations> {
    let destinations = destinations_for(&mood);
    Json(MoodDestinations { mood, destinations })
}
