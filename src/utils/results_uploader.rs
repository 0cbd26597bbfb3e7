use std::path::Path;

use subprocess::{Exec, NullFile};

/// What happens to the files a sweep leaves behind.
pub trait ResultHandler {
    fn handle_result(&self, path: &Path);
}

pub fn handler_for(push_url: Option<String>) -> Box<dyn ResultHandler> {
    match push_url {
        Some(url) => Box::new(ResultsUploader::new(url)),
        None => Box::new(ResultIgnorer::new()),
    }
}

pub struct ResultIgnorer {}

impl ResultIgnorer {
    pub fn new() -> ResultIgnorer {
        ResultIgnorer {}
    }
}

impl ResultHandler for ResultIgnorer {
    fn handle_result(&self, path: &Path) {
        debug!("keeping '{}' locally", path.display());
    }
}

/// Pushes result files with `curl -T`. Failures are logged, never fatal.
pub struct ResultsUploader {
    push_url: String,
}

impl ResultsUploader {
    pub fn new(url: String) -> Self {
        Self { push_url: url }
    }
}

impl ResultHandler for ResultsUploader {
    fn handle_result(&self, file: &Path) {
        if !file.is_file() {
            error!("no result file at '{}', nothing to upload", file.display());
            return;
        }

        let res = Exec::cmd("curl")
            .arg("--silent")
            .arg("--fail")
            .arg("-T")
            .arg(file.as_os_str())
            .arg(&self.push_url)
            .stdout(NullFile)
            .join();

        match res {
            Ok(exit) if exit.success() => {
                info!("uploaded '{}' to {}", file.display(), self.push_url)
            }
            Ok(exit) => warn!(
                "upload of '{}' failed, curl exit code {:?}",
                file.display(),
                exit
            ),
            Err(err) => error!("could not run curl for '{}': {:?}", file.display(), err),
        };
    }
}
