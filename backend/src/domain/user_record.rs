//! Aggregated user record.
//!
//! A record always holds all five categories. [`UserRecordBuilder`] is the
//! only way to assemble one, and it refuses to build while any category is
//! missing, so callers never observe a partially populated record.

use std::fmt;

use serde::Serialize;

use super::portal_data::{
    Attendance, Category, CategoryPayload, Courses, Marks, Timetable, UserProfile,
};

/// Every category for one session, plus derived fields.
///
/// Serialises as a flat object keyed by category name, with `regNumber`
/// present only when the profile exposed one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    profile: UserProfile,
    attendance: Attendance,
    marks: Marks,
    courses: Courses,
    timetable: Timetable,
    #[serde(skip_serializing_if = "Option::is_none")]
    reg_number: Option<String>,
}

impl UserRecord {
    /// Profile category.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Attendance category.
    pub fn attendance(&self) -> &Attendance {
        &self.attendance
    }

    /// Marks category.
    pub fn marks(&self) -> &Marks {
        &self.marks
    }

    /// Courses category.
    pub fn courses(&self) -> &Courses {
        &self.courses
    }

    /// Timetable category.
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Registration number derived from the profile.
    pub fn reg_number(&self) -> Option<&str> {
        self.reg_number.as_deref()
    }
}

/// Failures raised while assembling a [`UserRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRecordBuildError {
    /// A category was reported twice.
    Duplicate(Category),
    /// A category never arrived.
    Missing(Category),
}

impl fmt::Display for UserRecordBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(category) => write!(f, "category {category} reported more than once"),
            Self::Missing(category) => write!(f, "category {category} is missing"),
        }
    }
}

impl std::error::Error for UserRecordBuildError {}

/// Keyed, order-independent accumulator for category payloads.
///
/// # Examples
/// ```
/// use portal_backend::domain::{
///     Attendance, CategoryPayload, Courses, Marks, Timetable, UserProfile, UserRecordBuilder,
/// };
/// use serde_json::json;
///
/// let mut builder = UserRecordBuilder::default();
/// for payload in [
///     CategoryPayload::Timetable(Timetable::new(json!([]))),
///     CategoryPayload::Profile(UserProfile::new(json!({})).with_registration_number("21CS045")),
///     CategoryPayload::Marks(Marks::new(json!([]))),
///     CategoryPayload::Courses(Courses::new(json!([]))),
///     CategoryPayload::Attendance(Attendance::new(json!([]))),
/// ] {
///     builder.insert(payload).unwrap();
/// }
/// let record = builder.build().unwrap();
/// assert_eq!(record.reg_number(), Some("21CS045"));
/// ```
#[derive(Debug, Default)]
pub struct UserRecordBuilder {
    profile: Option<UserProfile>,
    attendance: Option<Attendance>,
    marks: Option<Marks>,
    courses: Option<Courses>,
    timetable: Option<Timetable>,
}

impl UserRecordBuilder {
    /// Store one payload under its category key.
    ///
    /// A second payload for a filled key is rejected and the first one kept.
    pub fn insert(&mut self, payload: CategoryPayload) -> Result<(), UserRecordBuildError> {
        let category = payload.category();
        match payload {
            CategoryPayload::Profile(value) => fill(&mut self.profile, value, category),
            CategoryPayload::Attendance(value) => fill(&mut self.attendance, value, category),
            CategoryPayload::Marks(value) => fill(&mut self.marks, value, category),
            CategoryPayload::Courses(value) => fill(&mut self.courses, value, category),
            CategoryPayload::Timetable(value) => fill(&mut self.timetable, value, category),
        }
    }

    /// Finish the record and derive `regNumber` from the profile.
    pub fn build(self) -> Result<UserRecord, UserRecordBuildError> {
        let Self {
            profile,
            attendance,
            marks,
            courses,
            timetable,
        } = self;
        let profile = profile.ok_or(UserRecordBuildError::Missing(Category::Profile))?;
        let reg_number = profile.registration_number().map(str::to_owned);
        Ok(UserRecord {
            attendance: attendance.ok_or(UserRecordBuildError::Missing(Category::Attendance))?,
            marks: marks.ok_or(UserRecordBuildError::Missing(Category::Marks))?,
            courses: courses.ok_or(UserRecordBuildError::Missing(Category::Courses))?,
            timetable: timetable.ok_or(UserRecordBuildError::Missing(Category::Timetable))?,
            profile,
            reg_number,
        })
    }
}

fn fill<T>(slot: &mut Option<T>, value: T, category: Category) -> Result<(), UserRecordBuildError> {
    if slot.is_some() {
        return Err(UserRecordBuildError::Duplicate(category));
    }
    *slot = Some(value);
    Ok(())
}
