mod commands;
mod confirm;
mod error;
mod ids;
mod store;
mod template;
mod types;
mod validate;


use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub(crate) use commands::*;
pub(crate) use confirm::*;
pub(crate) use error::*;
pub(crate) use ids::*;
pub(crate) use store::*;
pub(crate) use template::*;
pub(crate) use types::*;
pub(crate) use validate::*;
