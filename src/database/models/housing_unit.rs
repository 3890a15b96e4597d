use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::schema::OccupancyStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HousingUnit {
    pub id: i32,
    pub unit_number: String,
    pub address: String,
    pub unit_type: String,
    pub size_sqm: Decimal,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub occupancy_status: OccupancyStatus,
    pub monthly_rent: Option<Decimal>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
    #[serde(with = "crate::schema::wire::date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::schema::wire::date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewHousingUnit {
    pub unit_number: String,
    pub address: String,
    pub unit_type: String,
    pub size_sqm: Decimal,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub occupancy_status: OccupancyStatus,
    pub monthly_rent: Option<Decimal>,
    pub owner_name: Option<String>,
    pub owner_contact: Option<String>,
    pub created_at: DateTime<Utc>,
}
