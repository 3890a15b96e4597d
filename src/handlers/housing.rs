use chrono::Utc;
use tracing::info;

use crate::database::models::{HousingUnit, NewHousingUnit};
use crate::error::ApiError;
use crate::schema::CreateHousingUnitInput;
use crate::state::AppState;

pub async fn create_housing_unit(state: AppState, input: CreateHousingUnitInput) -> Result<HousingUnit, ApiError> {
    let unit = state
        .repos
        .housing_units
        .create_unit(NewHousingUnit {
            unit_number: input.unit_number,
            address: input.address,
            unit_type: input.unit_type,
            size_sqm: input.size_sqm,
            bedrooms: input.bedrooms,
            bathrooms: input.bathrooms,
            occupancy_status: input.occupancy_status,
            monthly_rent: input.monthly_rent,
            owner_name: input.owner_name,
            owner_contact: input.owner_contact,
            created_at: Utc::now(),
        })
        .await?;

    info!(unit_id = unit.id, unit_number = %unit.unit_number, "Housing unit registered");
    Ok(unit)
}

pub async fn get_housing_units(state: AppState) -> Result<Vec<HousingUnit>, ApiError> {
    Ok(state.repos.housing_units.list_units().await?)
}
