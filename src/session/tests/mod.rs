use super::test_helpers::*;
use super::*;
use crate::table::Value;
use crate::types::{FileIdentifier, FileSelector, ReleaseMetadata, ReleaseTarget};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod release;
