use std::path::{Path, PathBuf};

use crate::InvisioError;

pub fn unveil(
    secret_media: &Path,
    output_folder: &Path,
    password: Option<String>,
) -> Result<Vec<PathBuf>, InvisioError> {
    crate::api::unveil::prepare()
        .from_secret_file(secret_media)
        .into_output_folder(output_folder)
        .using_password(password)
        .execute()
}
