use std::{borrow::Cow, collections::BTreeMap};

/// Import path for the Tetragon module.
pub const TETRAGON_PACKAGE_NAME: &str = "github.com/cilium/tetragon";

/// Sub-path of the generated API package inside the Tetragon module.
pub const TETRAGON_API_PACKAGE_NAME: &str = "api/v1/tetragon";

/// License header prepended to every generated file.
pub const TETRAGON_COPYRIGHT_HEADER: &str =
    "// SPDX-License-Identifier: Apache-2.0\n// Copyright Authors of Tetragon";

/// Plugin name written into the "do not edit" marker.
pub const PLUGIN_NAME: &str = "protoc-gen-go-tetragon";

/// Message whose union enumerates every event type.
pub const CONTAINER_MESSAGE: &str = "GetEventsResponse";

/// Union (oneof) on the container message listing the events.
pub const EVENT_UNION: &str = "event";

/// Prefix of the Go wrapper type names of the union members.
pub const EVENT_MEMBER_PREFIX: &str = "GetEventsResponse_";

///
/// Project
///
/// Where the project's own Go packages live and how its generated files are
/// labelled.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub package_path: Cow<'static, str>,
    pub api_package: Cow<'static, str>,
    pub copyright_header: Cow<'static, str>,
    pub plugin_name: Cow<'static, str>,
}

impl Project {
    pub const TETRAGON: Self = Self {
        package_path: Cow::Borrowed(TETRAGON_PACKAGE_NAME),
        api_package: Cow::Borrowed(TETRAGON_API_PACKAGE_NAME),
        copyright_header: Cow::Borrowed(TETRAGON_COPYRIGHT_HEADER),
        plugin_name: Cow::Borrowed(PLUGIN_NAME),
    };
}

impl Default for Project {
    fn default() -> Self {
        Self::TETRAGON
    }
}

///
/// SchemaContract
///
/// The fixed shape the event locator expects: a container message with a
/// union whose member wrapper types are named `<prefix><Event>`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SchemaContract {
    pub container: Cow<'static, str>,
    pub union: Cow<'static, str>,
    pub member_prefix: Cow<'static, str>,
}

impl SchemaContract {
    pub const TETRAGON: Self = Self {
        container: Cow::Borrowed(CONTAINER_MESSAGE),
        union: Cow::Borrowed(EVENT_UNION),
        member_prefix: Cow::Borrowed(EVENT_MEMBER_PREFIX),
    };

    /// Contract for another container/union pair; members are prefixed `<container>_`.
    #[must_use]
    pub fn new(container: impl Into<String>, union: impl Into<String>) -> Self {
        let container = container.into();
        let member_prefix = format!("{container}_");

        Self {
            container: Cow::Owned(container),
            union: Cow::Owned(union.into()),
            member_prefix: Cow::Owned(member_prefix),
        }
    }
}

impl Default for SchemaContract {
    fn default() -> Self {
        Self::TETRAGON
    }
}

///
/// Config
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    pub project: Project,
    pub contract: SchemaContract,
}

impl Config {
    /// Apply generator parameters on top of the defaults.
    ///
    /// Recognised keys: `project`, `api_package`, `plugin_name`, `container`,
    /// `union`. Others are ignored.
    #[must_use]
    pub fn from_params(params: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).filter(|v| !v.is_empty()).cloned();
        let mut config = Self::default();

        if let Some(path) = get("project") {
            config.project.package_path = Cow::Owned(path);
        }
        if let Some(api) = get("api_package") {
            config.project.api_package = Cow::Owned(api);
        }
        if let Some(name) = get("plugin_name") {
            config.project.plugin_name = Cow::Owned(name);
        }

        let container = get("container");
        let union = get("union");
        if container.is_some() || union.is_some() {
            config.contract = SchemaContract::new(
                container.unwrap_or_else(|| CONTAINER_MESSAGE.to_string()),
                union.unwrap_or_else(|| EVENT_UNION.to_string()),
            );
        }

        config
    }
}
