use crate::Profiles;
use crate::model::{ProfileForm, ProfileMiniForm, TeeShirtSize};
use confhub_kernel::prelude::*;
use tracing::debug;

impl Profiles {
    /// Returns the caller's profile, creating it on first access.
    pub async fn get_profile(&self, user: &CurrentUser) -> ApiResult<ProfileForm> {
        Ok(user.profile(&self.database).await?.into())
    }

    /// Applies the non-empty fields of `form` and returns the updated profile.
    pub async fn save_profile(
        &self,
        user: &CurrentUser,
        form: ProfileMiniForm,
    ) -> ApiResult<ProfileForm> {
        let mut profile = user.profile(&self.database).await?;

        if let Some(name) = form.display_name.filter(|name| !name.trim().is_empty()) {
            profile.display_name = name;
        }
        if let Some(size) = form.tee_shirt_size.filter(|size| !size.trim().is_empty()) {
            let size: TeeShirtSize = size.parse().map_err(ApiError::bad_request)?;
            profile.tee_shirt_size = size.as_str().to_owned();
        }

        self.database
            .save_profile_details(&user.user_id, &profile.display_name, &profile.tee_shirt_size)
            .await?;
        debug!(user_id = %user.user_id, "Profile saved");

        Ok(profile.into())
    }
}
