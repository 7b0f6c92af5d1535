use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirmed;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

/// Where a backup goes.
#[derive(Debug, Clone)]
pub enum BackupTarget {
    /// Timestamped file inside this directory.
    Dir(PathBuf),
    /// Exactly this file.
    File(PathBuf),
}

impl BackupTarget {
    pub fn resolve(&self, now: NaiveDateTime) -> PathBuf {
        match self {
            BackupTarget::Dir(dir) => dir.join(backup_file_name(now)),
            BackupTarget::File(file) => file.clone(),
        }
    }
}

/// `tasktracker-backup-YYYYMMDD-HHMM.db`
pub fn backup_file_name(now: NaiveDateTime) -> String {
    format!("tasktracker-backup-{}.db", now.format("%Y%m%d-%H%M"))
}

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file byte for byte, or stream it into a .zip.
    /// Refuses a destination that is the live database itself. Returns the
    /// written path, or `None` when the user declined to overwrite.
    pub fn backup(
        cfg: &Config,
        target: &BackupTarget,
        compress: bool,
        force: bool,
    ) -> AppResult<Option<PathBuf>> {
        let src = Path::new(&cfg.database);

        if !src.exists() {
            return Err(AppError::Backup(format!(
                "database not found: {}",
                src.display()
            )));
        }

        let resolved = target.resolve(crate::utils::time::now_minute());
        let dest = if compress {
            resolved.with_extension("zip")
        } else {
            resolved
        };

        if same_file(src, &dest) {
            return Err(AppError::Backup(format!(
                "destination is the live database: {}",
                dest.display()
            )));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if dest.exists()
            && !confirmed(
                &format!("The file '{}' already exists. Overwrite it?", dest.display()),
                force,
            )
        {
            info("Backup cancelled.");
            return Ok(None);
        }

        if compress {
            compress_backup(src, &dest)?;
        } else {
            fs::copy(src, &dest)?;
        }

        success(format!("Backup saved: {}", dest.display()));

        if let Ok(conn) = Connection::open(src) {
            ttlog_quiet(
                &conn,
                "backup",
                &dest.to_string_lossy(),
                if compress {
                    "Backup created and compressed"
                } else {
                    "Backup created"
                },
            );
        }

        Ok(Some(dest))
    }

    /// Overwrite the live database with `source`. The file is first staged as
    /// `<db>.tmp` so a failed read never leaves a half-written database.
    /// Returns `false` when the user declined.
    pub fn restore(cfg: &Config, source: &Path, force: bool) -> AppResult<bool> {
        if !source.is_file() {
            return Err(AppError::Backup(format!(
                "backup file not found: {}",
                source.display()
            )));
        }

        let target = PathBuf::from(&cfg.database);

        if !confirmed(
            &format!(
                "Replace the database '{}' with '{}'? Current data will be lost.",
                target.display(),
                source.display()
            ),
            force,
        ) {
            info("Import cancelled.");
            return Ok(false);
        }

        let mut tmp_name = target.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        let staged = if is_zip(source) {
            extract_backup(source, &tmp)
        } else {
            fs::copy(source, &tmp).map(|_| ()).map_err(AppError::from)
        };

        if let Err(e) = staged {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        if let Some(parent) = target.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::copy(&tmp, &target)?;
        fs::remove_file(&tmp)?;

        success(format!("Backup imported from {}", source.display()));

        let conn = Connection::open(&target)?;
        init_db(&conn)?;
        ttlog_quiet(
            &conn,
            "restore",
            &source.to_string_lossy(),
            "Database restored from backup",
        );

        Ok(true)
    }
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Whether two paths name the same file. A missing `b` is compared through
/// its canonical parent directory.
fn same_file(a: &Path, b: &Path) -> bool {
    let Ok(a) = fs::canonicalize(a) else {
        return false;
    };

    let b = match fs::canonicalize(b) {
        Ok(p) => p,
        Err(_) => match (b.parent(), b.file_name()) {
            (Some(parent), Some(name)) => {
                let parent = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
                match fs::canonicalize(parent) {
                    Ok(p) => p.join(name),
                    Err(_) => return false,
                }
            }
            _ => return false,
        },
    };

    a == b
}

/// Stream the database into a single-entry .zip at `zip_path`.
fn compress_backup(src: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry_name = zip_path
        .with_extension("db")
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "tasktracker.db".to_string());

    let mut f = fs::File::open(src)?;
    zip.start_file(entry_name, options)
        .map_err(io::Error::other)?;

    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    Ok(())
}

/// Extract the single database entry of a compressed backup.
fn extract_backup(zip_path: &Path, dest: &Path) -> AppResult<()> {
    let file = fs::File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(io::Error::other)?;

    if archive.is_empty() {
        return Err(AppError::Backup(format!(
            "archive is empty: {}",
            zip_path.display()
        )));
    }

    let mut entry = archive.by_index(0).map_err(io::Error::other)?;
    let mut out = fs::File::create(dest)?;
    io::copy(&mut entry, &mut out)?;
    Ok(())
}
