//! Staging orchestration for one external-tool invocation.
//!
//! Array-valued parameters are serialized to temp header+body pairs, the
//! parameter mapping is rewritten to point at those files, the tool runs as
//! an opaque callback, declared outputs are loaded back into memory, and
//! every staged temp file is deleted on success and on failure alike.

mod params;

pub use params::{ParamValue, ToolParams, INPUT_PARAMS, OUTPUT_PARAMS};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use crate::config::StagingConfig;
use crate::dep;
use crate::errors::{Result, WhiteboxError};
use crate::raster::{Invocation, RasterArray, RasterRecord};

use params::ParamRole;

/// Monotonic suffix making staged base names unique within the process.
static STAGE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Per-invocation switches.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Leave staged temp files on disk after the call (default: delete).
    pub keep_staged: bool,
}

/// Loaded tool outputs, keyed by parameter name when more than one was
/// registered.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Single(RasterRecord),
    Collection(Vec<(String, RasterRecord)>),
}

impl ToolOutput {
    pub fn into_single(self) -> Option<RasterRecord> {
        match self {
            ToolOutput::Single(record) => Some(record),
            ToolOutput::Collection(_) => None,
        }
    }
}

/// A staged temp file pair, deleted when dropped unless `keep` is set.
struct StagedPair {
    header: PathBuf,
    body: PathBuf,
    keep: bool,
}

impl Drop for StagedPair {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        for path in [&self.header, &self.body] {
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "failed to delete staged file");
                }
            }
        }
    }
}

/// Orchestrates staging, invocation and output loading for external tools.
pub struct Stager {
    config: StagingConfig,
}

impl Stager {
    pub fn new(config: StagingConfig) -> Stager {
        Stager { config }
    }

    /// Run `tool` with default options. See [`Stager::run_with`].
    pub fn run<F>(&self, params: ToolParams, tool: F) -> Result<ToolOutput>
    where
        F: FnOnce(&[(String, String)]) -> Result<i32>,
    {
        self.run_with(params, RunOptions::default(), tool)
    }

    /// Stage array inputs, invoke `tool` with the rewritten parameter
    /// mapping, load declared outputs and clean up.
    ///
    /// All inputs are fully staged before the tool runs; outputs are loaded
    /// only after it returns. If no output parameter was supplied but at
    /// least one array was staged, an output path is inferred from the last
    /// staged input. Loaded records carry the invocation's arguments and
    /// status code and have nodata masking applied.
    pub fn run_with<F>(&self, params: ToolParams, options: RunOptions, tool: F) -> Result<ToolOutput>
    where
        F: FnOnce(&[(String, String)]) -> Result<i32>,
    {
        let mut staged: Vec<StagedPair> = Vec::new();
        let mut args: Vec<(String, String)> = Vec::new();
        let mut outputs: Vec<(String, String)> = Vec::new();
        let mut last_staged: Option<String> = None;

        for (name, value) in params.into_entries() {
            match params::role(&name) {
                ParamRole::Input => match value {
                    ParamValue::Path(path) | ParamValue::Scalar(path) => {
                        args.push((name, absolutize_list(&path)?));
                    }
                    ParamValue::Array(array) => {
                        let header =
                            self.stage(&name, &array, options.keep_staged, &mut staged)?;
                        last_staged = Some(header.clone());
                        args.push((name, header));
                    }
                    ParamValue::ArrayCollection(members) => {
                        if !params::supports_multi(&name) {
                            return Err(WhiteboxError::Usage(format!(
                                "parameter '{name}' does not accept multiple arrays; \
                                 invoke the tool once per array"
                            )));
                        }
                        let mut headers = Vec::with_capacity(members.len());
                        for (tag, array) in &members {
                            headers.push(self.stage(
                                tag,
                                array,
                                options.keep_staged,
                                &mut staged,
                            )?);
                        }
                        last_staged = headers.last().cloned();
                        args.push((name, headers.join(", ")));
                    }
                },
                ParamRole::Output => match value {
                    ParamValue::Path(path) | ParamValue::Scalar(path) => {
                        let fixed = absolutize_list(&path)?;
                        outputs.push((name.clone(), fixed.clone()));
                        args.push((name, fixed));
                    }
                    ParamValue::Array(_) | ParamValue::ArrayCollection(_) => {
                        return Err(WhiteboxError::Usage(format!(
                            "output parameter '{name}' takes a destination path"
                        )));
                    }
                },
                ParamRole::Option => match value {
                    ParamValue::Path(path) | ParamValue::Scalar(path) => {
                        args.push((name, path));
                    }
                    ParamValue::Array(_) | ParamValue::ArrayCollection(_) => {
                        return Err(WhiteboxError::Usage(format!(
                            "parameter '{name}' is not an input; it cannot carry array data"
                        )));
                    }
                },
            }
        }

        if outputs.is_empty() {
            if let Some(last) = &last_staged {
                let inferred = match last.strip_suffix(".dep") {
                    Some(stem) => format!("{stem}-output.dep"),
                    None => format!("{last}-output.dep"),
                };
                debug!(path = %inferred, "no output parameter supplied, inferring one");
                outputs.push(("output".to_string(), inferred.clone()));
                args.push(("output".to_string(), inferred));
            }
        }

        info!(params = args.len(), staged = staged.len(), "invoking external tool");
        let return_code = tool(&args)?;
        debug!(return_code, "external tool returned");

        let mut records: Vec<(String, RasterRecord)> = Vec::new();
        for (name, paths) in &outputs {
            let list: Vec<&str> = paths.split(", ").collect();
            let multi = list.len() > 1;
            for (index, path) in list.iter().enumerate() {
                let mut record = dep::read_pair(Path::new(path), None)?;
                record.provenance = Some(Invocation {
                    args: args.clone(),
                    return_code,
                });
                record.mask_nodata();
                let key = if multi {
                    format!("{name}.{index}")
                } else {
                    name.clone()
                };
                records.push((key, record));
            }
        }

        // `staged` drops here, deleting temp pairs on this and every early
        // return above.
        if records.len() == 1 {
            let (_, record) = records.swap_remove(0);
            Ok(ToolOutput::Single(record))
        } else {
            Ok(ToolOutput::Collection(records))
        }
    }

    fn stage(
        &self,
        tag: &str,
        array: &RasterArray,
        keep: bool,
        staged: &mut Vec<StagedPair>,
    ) -> Result<String> {
        let base = self.unique_base(tag);
        let (header, body) = dep::write_pair(array, &base)?;
        debug!(tag, header = %header.display(), "staged array input");
        let header_str = header.display().to_string();
        staged.push(StagedPair { header, body, keep });
        Ok(header_str)
    }

    /// Derive a staged base name from the parameter tag.
    ///
    /// The tag alone is not unique across concurrent invocations sharing a
    /// temp directory, so the process id and a monotonic counter are mixed
    /// in.
    fn unique_base(&self, tag: &str) -> PathBuf {
        let seq = STAGE_SEQ.fetch_add(1, Ordering::Relaxed);
        self.config
            .temp_dir()
            .join(format!("{tag}-{}-{seq}", process::id()))
    }
}

/// Normalize a path, or a comma-joined list of paths, to absolute form.
fn absolutize_list(value: &str) -> Result<String> {
    let mut fixed = Vec::new();
    for part in value.split(", ") {
        fixed.push(std::path::absolute(part)?.display().to_string());
    }
    Ok(fixed.join(", "))
}
