pub mod cluster;
pub mod external_prog;
pub mod invocation;
pub mod journal;
pub mod results_uploader;
pub mod runner;
pub mod sampling;
pub mod sweep;

use std::{
    env,
    path::{Path, PathBuf},
};

pub fn dump_file(name: &str, ext: &str) -> String {
    format!("{}_{}.{}", name, chrono::Local::now().to_rfc3339(), ext)
}

/// The explicitly given home directory, or $HOME.
pub fn home_dir(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::format_err!("$HOME is not set, pass --home")),
    }
}
