//! App-managed output locations

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use super::io::{ensure_dir, join_under};
use crate::platform::StorageEnvironment;
use crate::utils::split_file_name;

const SENT_DIR: &str = ".sent";
const LOGS_DIR: &str = "Logs";
const OUTPUT_SUFFIX: &str = "_CM";

/// Root for app output: app-private under scoped storage, legacy media folder otherwise
fn media_root(env: &dyn StorageEnvironment) -> PathBuf {
    if env.scoped_storage() {
        env.app_private_dir()
    } else {
        env.external_root().join(env.legacy_media_folder())
    }
}

/// Destination for a processed file of the given type, stamped with today's date
///
/// `photo.jpg` under type `images` becomes `<root>/images/.sent/photo_20261018_CM.jpg`.
/// The directory is created if absent; failure is logged and the path still returned.
pub fn output_file_path(env: &dyn StorageEnvironment, file_type: &str, filename: &str) -> PathBuf {
    output_file_path_on(env, file_type, filename, Local::now().date_naive())
}

pub(crate) fn output_file_path_on(
    env: &dyn StorageEnvironment,
    file_type: &str,
    filename: &str,
    date: NaiveDate,
) -> PathBuf {
    let dir = join_under(&media_root(env), file_type).join(SENT_DIR);
    ensure_dir(&dir);

    let (base, extension) = split_file_name(filename);
    let mut name = format!("{}{}{}", base, date.format("_%Y%m%d"), OUTPUT_SUFFIX);
    if !extension.is_empty() {
        name.push('.');
        name.push_str(extension);
    }

    dir.join(name)
}

/// Directory for application log files, created if absent
pub fn logs_path(env: &dyn StorageEnvironment) -> PathBuf {
    let dir = media_root(env).join(LOGS_DIR);
    if !ensure_dir(&dir) {
        tracing::error!(path = %dir.display(), "Error creating directory for logs");
    }
    dir
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::platform::HostEnvironment;
    use std::path::Path;
    use tempfile::tempdir;

    fn env(root: &Path, scoped: bool) -> HostEnvironment {
        HostEnvironment::from_config(&ResolverConfig {
            external_root: Some(root.join("sdcard")),
            app_private_dir: Some(root.join("private")),
            scoped_storage: scoped,
            ..Default::default()
        })
    }

    #[test]
    fn test_output_path_has_date_stamp_and_suffix() {
        let dir = tempdir().unwrap();
        let env = env(dir.path(), true);

        let path = output_file_path(&env, "images", "photo.jpg");
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        let stamp = Local::now().format("%Y%m%d").to_string();

        assert!(name.ends_with("_CM.jpg"), "{name}");
        assert_eq!(name, format!("photo_{}_CM.jpg", stamp));
        assert_eq!(path.parent().unwrap(), dir.path().join("private/images/.sent"));
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_legacy_root_without_scoped_storage() {
        let dir = tempdir().unwrap();
        let env = env(dir.path(), false);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let path = output_file_path_on(&env, "videos", "/tmp/clip.final.mp4", date);

        assert_eq!(
            path,
            dir.path()
                .join("sdcard/App/Media/videos/.sent/clip.final_20240309_CM.mp4")
        );
    }

    #[test]
    fn test_missing_extension_has_no_trailing_dot() {
        let dir = tempdir().unwrap();
        let env = env(dir.path(), true);
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        let path = output_file_path_on(&env, "docs", "README", date);

        assert!(path.ends_with("README_20241231_CM"));
    }

    #[test]
    fn test_logs_path_is_created() {
        let dir = tempdir().unwrap();
        let env = env(dir.path(), true);

        let logs = logs_path(&env);

        assert_eq!(logs, dir.path().join("private/Logs"));
        assert!(logs.is_dir());
    }

    #[test]
    fn test_absolute_file_type_stays_under_media_root() {
        let dir = tempdir().unwrap();
        let env = env(dir.path(), true);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

        let path = output_file_path_on(&env, "/images", "photo.jpg", date);

        assert!(path.starts_with(dir.path().join("private")), "{}", path.display());
        assert!(path.ends_with("images/.sent/photo_20240309_CM.jpg"));
    }
}
