use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, Row, sqlite::SqliteRow};
use utoipa::ToSchema;

use crate::model::status::Status;

/// Dates travel over the wire as `MM-dd-yyyy`.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%m-%d-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "firstName": "Marc",
        "middleInitial": "J",
        "lastName": "Christensen",
        "dateOfBirth": "06-18-1996",
        "dateOfEmployment": "01-15-2022",
        "status": "ACTIVE"
    })
)]
pub struct Employee {
    /// Assigned by the store on first insert.
    #[schema(example = 1, nullable = true)]
    pub id: Option<i64>,

    #[schema(example = "Marc")]
    pub first_name: String,

    #[schema(example = "J", value_type = String)]
    pub middle_initial: char,

    #[schema(example = "Christensen")]
    pub last_name: String,

    #[serde(with = "date_format")]
    #[schema(example = "06-18-1996", value_type = String)]
    pub date_of_birth: NaiveDate,

    #[serde(with = "date_format")]
    #[schema(example = "01-15-2022", value_type = String)]
    pub date_of_employment: NaiveDate,

    pub status: Status,
}

impl Employee {
    /// New, not yet persisted employee. Status always starts out ACTIVE.
    pub fn new(
        first_name: impl Into<String>,
        middle_initial: char,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
        date_of_employment: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            middle_initial,
            last_name: last_name.into(),
            date_of_birth,
            date_of_employment,
            status: Status::Active,
        }
    }

    pub fn name(&self) -> String {
        format!("{} {} {}", self.first_name, self.middle_initial, self.last_name)
    }
}

// Identity is (id, first name, middle initial, last name). Dates and status
// are deliberately left out.
impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.first_name == other.first_name
            && self.middle_initial == other.middle_initial
            && self.last_name == other.last_name
    }
}

impl Eq for Employee {}

impl Hash for Employee {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.first_name.hash(state);
        self.middle_initial.hash(state);
        self.last_name.hash(state);
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.map_or_else(|| "null".to_string(), |id| id.to_string());
        write!(
            f,
            "Employee{{id={}, firstName='{}', middleInitial='{}', lastName='{}'}}",
            id, self.first_name, self.middle_initial, self.last_name
        )
    }
}

impl<'r> FromRow<'r, SqliteRow> for Employee {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let middle_initial: String = row.try_get("middle_initial")?;
        let middle_initial = middle_initial.chars().next().ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "middle_initial".into(),
            source: "empty middle initial".into(),
        })?;

        let status: String = row.try_get("status")?;
        let status = Status::from_str(&status).map_err(|e| sqlx::Error::ColumnDecode {
            index: "status".into(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id: Some(row.try_get("id")?),
            first_name: row.try_get("first_name")?,
            middle_initial,
            last_name: row.try_get("last_name")?,
            date_of_birth: row.try_get("date_of_birth")?,
            date_of_employment: row.try_get("date_of_employment")?,
            status,
        })
    }
}
