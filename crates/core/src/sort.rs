use crate::Error;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// A sort directive in a search body.
///
/// Directives are written as a field name with an optional direction prefix:
/// `>` for descending (the default) and `<` for ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sortby {
    /// The property to sort on.
    pub field: String,

    /// The sort direction.
    pub direction: Direction,
}

/// The direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending.
    Asc,

    /// Descending, the default.
    #[default]
    Desc,
}

impl Sortby {
    /// Creates a new ascending sort.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::Sortby;
    ///
    /// let sortby = Sortby::asc("eo:cloud_cover");
    /// ```
    pub fn asc(field: impl ToString) -> Sortby {
        Sortby {
            field: field.to_string(),
            direction: Direction::Asc,
        }
    }

    /// Creates a new descending sort.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::Sortby;
    ///
    /// let sortby = Sortby::desc("datetime");
    /// ```
    pub fn desc(field: impl ToString) -> Sortby {
        Sortby {
            field: field.to_string(),
            direction: Direction::Desc,
        }
    }
}

impl Direction {
    fn prefix(&self) -> char {
        match self {
            Direction::Asc => '<',
            Direction::Desc => '>',
        }
    }
}

impl FromStr for Sortby {
    type Err = Error;

    /// Parses a sort directive.
    ///
    /// Only the empty string is invalid. A bare prefix like `>` sorts on the
    /// empty field name.
    ///
    /// # Examples
    ///
    /// ```
    /// use satsearch::{Direction, Sortby};
    ///
    /// let sortby: Sortby = "<eo:cloud_cover".parse().unwrap();
    /// assert_eq!(sortby.field, "eo:cloud_cover");
    /// assert_eq!(sortby.direction, Direction::Asc);
    /// let sortby: Sortby = "datetime".parse().unwrap();
    /// assert_eq!(sortby.direction, Direction::Desc);
    /// ```
    fn from_str(s: &str) -> Result<Sortby, Error> {
        if s.is_empty() {
            return Err(Error::InvalidSortby(s.to_string()));
        }
        let (direction, field) = if let Some(field) = s.strip_prefix('<') {
            (Direction::Asc, field)
        } else if let Some(field) = s.strip_prefix('>') {
            (Direction::Desc, field)
        } else {
            (Direction::Desc, s)
        };
        Ok(Sortby {
            field: field.to_string(),
            direction,
        })
    }
}

impl Display for Sortby {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.direction.prefix(), self.field)
    }
}
