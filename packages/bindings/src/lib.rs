use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let terms: homecost_core::loan::schedule::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = homecost_core::loan::payment::monthly_payment(
        terms.principal,
        terms.annual_rate,
        terms.term_months,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "monthly_payment": payment.to_string() }))
        .map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let terms: homecost_core::loan::schedule::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        homecost_core::loan::schedule::amortization_schedule(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Electricity
// ---------------------------------------------------------------------------

#[napi]
pub fn electricity_cost(input_json: String) -> NapiResult<String> {
    let usage: homecost_core::electricity::cost::ElectricityUsage =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let total =
        homecost_core::electricity::cost::total_electricity_cost(&usage).map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "total_cost": total.to_string() }))
        .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Household
// ---------------------------------------------------------------------------

#[napi]
pub fn household_breakdown(input_json: String) -> NapiResult<String> {
    let input: homecost_core::household::breakdown::HouseholdInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        homecost_core::household::breakdown::household_breakdown(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sweeps
// ---------------------------------------------------------------------------

#[napi]
pub fn sweep_electricity(input_json: String) -> NapiResult<String> {
    let input: homecost_core::sweep::electricity::ElectricitySweepInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        homecost_core::sweep::electricity::sweep_electricity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn sweep_household(input_json: String) -> NapiResult<String> {
    let input: homecost_core::sweep::household::HouseholdSweepInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        homecost_core::sweep::household::sweep_household(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
