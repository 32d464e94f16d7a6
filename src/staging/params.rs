//! Tool invocation parameters.

use crate::raster::RasterArray;

/// Parameter names whose values are tool inputs.
pub const INPUT_PARAMS: [&str; 5] = ["input", "inputs", "i", "pour_pts", "d8_pntr"];

/// Parameter names whose values are tool outputs.
pub const OUTPUT_PARAMS: [&str; 3] = ["output", "outputs", "o"];

/// Input names that accept a comma-joined list of values.
const MULTI_VALUED_INPUTS: [&str; 1] = ["inputs"];

/// One parameter value, decided by the call site up front.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A filesystem path, or a comma-joined list of paths for multi-valued
    /// parameters. Normalized to absolute form before the tool sees it.
    Path(String),
    /// A tool-specific scalar option, passed through untouched.
    Scalar(String),
    /// An in-memory array to stage to a temp file pair.
    Array(RasterArray),
    /// Named arrays staged independently; only legal for multi-valued
    /// input parameters.
    ArrayCollection(Vec<(String, RasterArray)>),
}

impl From<RasterArray> for ParamValue {
    fn from(array: RasterArray) -> ParamValue {
        ParamValue::Array(array)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> ParamValue {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> ParamValue {
        ParamValue::Scalar(value)
    }
}

/// Ordered mapping from parameter names to values for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolParams {
    entries: Vec<(String, ParamValue)>,
}

impl ToolParams {
    pub fn new() -> ToolParams {
        ToolParams::default()
    }

    /// Insert or overwrite a parameter.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder form of [`ToolParams::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> ToolParams {
        self.set(name, value);
        self
    }

    pub(crate) fn into_entries(self) -> Vec<(String, ParamValue)> {
        self.entries
    }
}

/// How a named parameter participates in staging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParamRole {
    Input,
    Output,
    Option,
}

pub(crate) fn role(name: &str) -> ParamRole {
    if INPUT_PARAMS.contains(&name) {
        ParamRole::Input
    } else if OUTPUT_PARAMS.contains(&name) {
        ParamRole::Output
    } else {
        ParamRole::Option
    }
}

pub(crate) fn supports_multi(name: &str) -> bool {
    MULTI_VALUED_INPUTS.contains(&name)
}
