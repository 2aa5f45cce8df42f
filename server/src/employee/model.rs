//! The employee record as it crosses the HTTP boundary.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use entity::employee;
use sea_orm::{ActiveValue::NotSet, DbErr, Set};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{IgnoredAny, MapAccess, Visitor},
};

/// An employee. The id is assigned by storage on creation and never changes
/// afterwards; every other field is caller supplied and unvalidated.
///
/// Decoding accepts only JSON objects and is otherwise lenient: keys match
/// case-insensitively, absent or `null` fields keep their zero value, unknown
/// keys are ignored and a repeated key overrides the earlier one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Employee {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "HireDate")]
    pub hire_date: DateTime<Utc>,
}

impl Default for Employee {
    fn default() -> Self {
        Self {
            id: 0,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            hire_date: zero_time(),
        }
    }
}

/// `0001-01-01T00:00:00Z`, the hire date of an employee submitted without one.
pub fn zero_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[derive(Clone, Copy)]
enum Field {
    Id,
    FirstName,
    LastName,
    Email,
    HireDate,
}

const FIELDS: [(&str, Field); 5] = [
    ("ID", Field::Id),
    ("FirstName", Field::FirstName),
    ("LastName", Field::LastName),
    ("Email", Field::Email),
    ("HireDate", Field::HireDate),
];

impl Field {
    fn matching(key: &str) -> Option<Self> {
        FIELDS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, field)| *field)
    }
}

// `null` leaves whatever the field already holds.
fn assign<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

struct EmployeeVisitor;

impl<'de> Visitor<'de> for EmployeeVisitor {
    type Value = Employee;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an employee object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Employee, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut employee = Employee::default();
        while let Some(key) = map.next_key::<String>()? {
            match Field::matching(&key) {
                Some(Field::Id) => assign(&mut employee.id, map.next_value()?),
                Some(Field::FirstName) => assign(&mut employee.first_name, map.next_value()?),
                Some(Field::LastName) => assign(&mut employee.last_name, map.next_value()?),
                Some(Field::Email) => assign(&mut employee.email, map.next_value()?),
                Some(Field::HireDate) => assign(&mut employee.hire_date, map.next_value()?),
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(employee)
    }
}

impl<'de> Deserialize<'de> for Employee {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EmployeeVisitor)
    }
}

impl Employee {
    /// Storage key for this employee, if it fits the serial column.
    pub(crate) fn storage_id(&self) -> Option<i32> {
        i32::try_from(self.id).ok()
    }

    /// Active model for an insert. The id is left for the database to assign.
    pub(crate) fn into_new_active_model(self) -> employee::ActiveModel {
        employee::ActiveModel {
            id: NotSet,
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            email: Set(self.email),
            hire_date: Set(self.hire_date.fixed_offset()),
        }
    }

    /// Active model replacing every mutable column of row `id`.
    pub(crate) fn into_update_model(self, id: i32) -> employee::ActiveModel {
        employee::ActiveModel {
            id: Set(id),
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            email: Set(self.email),
            hire_date: Set(self.hire_date.fixed_offset()),
        }
    }
}

impl TryFrom<employee::Model> for Employee {
    type Error = DbErr;

    fn try_from(model: employee::Model) -> Result<Self, Self::Error> {
        let id = u64::try_from(model.id)
            .map_err(|_| DbErr::Type(format!("negative employee id {}", model.id)))?;
        Ok(Self {
            id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            hire_date: model.hire_date.with_timezone(&Utc),
        })
    }
}
