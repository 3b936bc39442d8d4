//! Per-user data categories fetched from the portal.
//!
//! Payload shapes belong to the portal, so the domain keeps them opaque. The
//! one exception is the registration number, which the profile exposes through
//! a typed accessor rather than by inspecting the payload at aggregation time.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Data categories aggregated into a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Profile,
    Attendance,
    Marks,
    Courses,
    Timetable,
}

impl Category {
    /// Every category, in spawn order.
    pub const ALL: [Self; 5] = [
        Self::Profile,
        Self::Attendance,
        Self::Marks,
        Self::Courses,
        Self::Timetable,
    ];

    /// Key under which the category appears in a serialised record.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Attendance => "attendance",
            Self::Marks => "marks",
            Self::Courses => "courses",
            Self::Timetable => "timetable",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

macro_rules! opaque_payload {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Value);

        impl $name {
            /// Wrap a payload as returned by the portal.
            pub fn new(value: Value) -> Self {
                Self(value)
            }

            /// Borrow the raw payload.
            pub fn as_value(&self) -> &Value {
                &self.0
            }
        }
    };
}

opaque_payload!(
    /// Attendance summary, shaped by the portal.
    Attendance
);
opaque_payload!(
    /// Marks and grades, shaped by the portal.
    Marks
);
opaque_payload!(
    /// Enrolled courses, shaped by the portal.
    Courses
);
opaque_payload!(
    /// Weekly timetable, shaped by the portal.
    Timetable
);

/// Profile payload plus the registration number, when the source found one.
///
/// # Examples
/// ```
/// use portal_backend::domain::UserProfile;
/// use serde_json::json;
///
/// let profile = UserProfile::new(json!({ "name": "A" }))
///     .with_registration_number("21CS045");
/// assert_eq!(profile.registration_number(), Some("21CS045"));
/// assert_eq!(UserProfile::new(json!({})).registration_number(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    payload: Value,
    registration_number: Option<String>,
}

impl UserProfile {
    /// Wrap a profile payload with no known registration number.
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            registration_number: None,
        }
    }

    /// Record the registration number extracted by the data source.
    ///
    /// Blank values are treated as absent.
    pub fn with_registration_number(mut self, number: impl Into<String>) -> Self {
        let number = number.into();
        self.registration_number = (!number.trim().is_empty()).then_some(number);
        self
    }

    /// Registration number, if the profile carried one.
    pub fn registration_number(&self) -> Option<&str> {
        self.registration_number.as_deref()
    }

    /// Borrow the raw payload.
    pub fn as_value(&self) -> &Value {
        &self.payload
    }
}

impl Serialize for UserProfile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.payload.serialize(serializer)
    }
}

/// One fetched value tagged with its category.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryPayload {
    Profile(UserProfile),
    Attendance(Attendance),
    Marks(Marks),
    Courses(Courses),
    Timetable(Timetable),
}

impl CategoryPayload {
    /// Category this payload belongs to.
    pub fn category(&self) -> Category {
        match self {
            Self::Profile(_) => Category::Profile,
            Self::Attendance(_) => Category::Attendance,
            Self::Marks(_) => Category::Marks,
            Self::Courses(_) => Category::Courses,
            Self::Timetable(_) => Category::Timetable,
        }
    }
}
