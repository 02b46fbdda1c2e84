use std::fmt::{Display, Formatter, Result as FmtResult};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Application label every permission string is prefixed with
pub const APP_LABEL: &str = "courseInfo";

/// What a caller wants to do with a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    View,
    Add,
    Change,
    Delete,
}

/// Tables that are guarded by permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    Year,
    Period,
    Semester,
    Course,
    Instructor,
    Student,
    Section,
    Registration,
}

/// A named permission such as `courseInfo.view_instructor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Permission {
    pub action: Action,
    pub resource: Resource,
}

impl Permission {
    pub const fn new(action: Action, resource: Resource) -> Self {
        Self { action, resource }
    }

    pub const fn view(resource: Resource) -> Self {
        Self::new(Action::View, resource)
    }

    pub const fn add(resource: Resource) -> Self {
        Self::new(Action::Add, resource)
    }

    pub const fn change(resource: Resource) -> Self {
        Self::new(Action::Change, resource)
    }

    pub const fn delete(resource: Resource) -> Self {
        Self::new(Action::Delete, resource)
    }

    /// Whether `granted` names this permission
    pub fn is_granted_by(&self, granted: &str) -> bool {
        granted
            .strip_prefix(APP_LABEL)
            .and_then(|rest| rest.strip_prefix('.'))
            .and_then(|codename| codename.split_once('_'))
            .is_some_and(|(action, resource)| {
                action.parse::<Action>().ok() == Some(self.action)
                    && resource.parse::<Resource>().ok() == Some(self.resource)
            })
    }
}

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{APP_LABEL}.{}_{}", self.action, self.resource)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_permission_display() {
        assert_eq!(
            Permission::view(Resource::Instructor).to_string(),
            "courseInfo.view_instructor"
        );
        assert_eq!(
            Permission::delete(Resource::Registration).to_string(),
            "courseInfo.delete_registration"
        );
    }

    #[test]
    fn test_every_permission_is_granted_by_its_own_name() {
        for action in Action::iter() {
            for resource in Resource::iter() {
                let permission = Permission::new(action, resource);
                assert!(permission.is_granted_by(&permission.to_string()));
            }
        }
    }

    #[test]
    fn test_other_names_do_not_grant() {
        let permission = Permission::change(Resource::Section);
        assert!(!permission.is_granted_by("courseInfo.view_section"));
        assert!(!permission.is_granted_by("courseInfo.change_semester"));
        assert!(!permission.is_granted_by("otherApp.change_section"));
        assert!(!permission.is_granted_by("change_section"));
        assert!(!permission.is_granted_by(""));
    }
}
