//! Database enum types with Diesel serialization.
//!
//! Each enum implements `ToSql` and `FromSql` for automatic conversion
//! between Rust and `PostgreSQL`, with a CHECK constraint guarding the
//! stored codes.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::SmallInt;
use std::fmt;

use yotei_core::error::CoreError;

/// How a schedule repeats.
///
/// Maps to `schedule.repeat_type` (1 = none, 2 = weekly, 3 = monthly, the
/// codes the original groupware forms submit). A stored code outside that
/// set fails at the load boundary instead of silently degrading to `None`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = SmallInt)]
#[serde(rename_all = "snake_case")]
pub enum RepeatType {
    None,
    Weekly,
    Monthly,
}

impl RepeatType {
    /// Returns the numeric code stored in the database.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::None => 1,
            Self::Weekly => 2,
            Self::Monthly => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl TryFrom<i16> for RepeatType {
    type Error = CoreError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::None),
            2 => Ok(Self::Weekly),
            3 => Ok(Self::Monthly),
            other => Err(CoreError::ValidationError(format!(
                "unrecognized repeat type code: {other}"
            ))),
        }
    }
}

impl ToSql<SmallInt, Pg> for RepeatType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        match self {
            Self::None => <i16 as ToSql<SmallInt, Pg>>::to_sql(&1, out),
            Self::Weekly => <i16 as ToSql<SmallInt, Pg>>::to_sql(&2, out),
            Self::Monthly => <i16 as ToSql<SmallInt, Pg>>::to_sql(&3, out),
        }
    }
}

impl FromSql<SmallInt, Pg> for RepeatType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let code = <i16 as FromSql<SmallInt, Pg>>::from_sql(bytes)?;
        Self::try_from(code).map_err(|err| err.to_string().into())
    }
}

impl fmt::Display for RepeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_type_codes_round_trip() {
        for repeat in [RepeatType::None, RepeatType::Weekly, RepeatType::Monthly] {
            assert_eq!(RepeatType::try_from(repeat.code()).ok(), Some(repeat));
        }
    }

    #[test]
    fn unknown_repeat_type_code_is_rejected() {
        assert!(RepeatType::try_from(0).is_err());
        assert!(RepeatType::try_from(4).is_err());
    }
}
