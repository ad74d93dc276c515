use skill_core::model::{ProfileUpdate, UserProfile};

/// Editable copy of the profile fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileFormVm {
    pub name: String,
    pub profile_picture: String,
    pub phone_number: String,
    pub address: String,
}

impl ProfileFormVm {
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name().to_string(),
            profile_picture: profile.profile_picture().to_string(),
            phone_number: profile.phone_number().to_string(),
            address: profile.address().to_string(),
        }
    }

    /// Only fields that differ from `original` end up in the update.
    #[must_use]
    pub fn to_update(&self, original: &UserProfile) -> ProfileUpdate {
        fn changed(edited: &str, current: &str) -> Option<String> {
            (edited != current).then(|| edited.to_string())
        }
        ProfileUpdate {
            name: changed(&self.name, original.name()),
            profile_picture: changed(&self.profile_picture, original.profile_picture()),
            phone_number: changed(&self.phone_number, original.phone_number()),
            address: changed(&self.address, original.address()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::model::UserId;
    use skill_core::time::fixed_now;

    #[test]
    fn untouched_form_is_an_empty_update() {
        let profile =
            UserProfile::registered(UserId::new("u1").unwrap(), "ana@example.com", fixed_now())
                .unwrap();
        let form = ProfileFormVm::from_profile(&profile);
        assert!(form.to_update(&profile).is_empty());

        let edited = ProfileFormVm {
            phone_number: "555".into(),
            ..form
        };
        let update = edited.to_update(&profile);
        assert_eq!(update.phone_number.as_deref(), Some("555"));
        assert!(update.name.is_none());
    }
}
