//! Evidence Storage Config

use clap::Args;
use rentreturn_app::storage::{CloudinaryConfig, DEFAULT_CLOUDINARY_API_BASE};

/// Cloudinary settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Cloudinary cloud name
    #[arg(long, env = "CLOUDINARY_CLOUD_NAME")]
    pub cloudinary_cloud_name: String,

    /// Unsigned upload preset used for return evidence
    #[arg(long, env = "CLOUDINARY_UPLOAD_PRESET")]
    pub cloudinary_upload_preset: String,

    /// Cloudinary API origin
    #[arg(long, env = "CLOUDINARY_API_BASE", default_value = DEFAULT_CLOUDINARY_API_BASE)]
    pub cloudinary_api_base: String,
}

impl StorageConfig {
    #[must_use]
    pub fn cloudinary(&self) -> CloudinaryConfig {
        CloudinaryConfig {
            api_base: self.cloudinary_api_base.clone(),
            cloud_name: self.cloudinary_cloud_name.clone(),
            upload_preset: self.cloudinary_upload_preset.clone(),
        }
    }
}
