//! Prompt rendering context
//!
//! The runtime values segments are rendered from: who the user is, where
//! they are and how the last command ended.

use serde::{Deserialize, Serialize};
use std::env;

/// Runtime values read by segments at render time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptContext {
    #[serde(rename = "UserName")]
    pub user_name: String,
    #[serde(rename = "HostName")]
    pub host_name: String,
    #[serde(rename = "Shell")]
    pub shell: String,
    #[serde(rename = "PWD")]
    pub pwd: String,
    #[serde(rename = "HOME")]
    pub home: String,
    #[serde(rename = "OS")]
    pub os: String,
    #[serde(rename = "WSL")]
    pub wsl: bool,
    #[serde(rename = "Root")]
    pub root: bool,
    /// Exit code of the last command
    #[serde(rename = "Code")]
    pub code: i32,
}

impl Default for PromptContext {
    fn default() -> Self {
        Self {
            user_name: "user".to_string(),
            host_name: "localhost".to_string(),
            shell: "pwsh".to_string(),
            pwd: "/home/user".to_string(),
            home: "/home/user".to_string(),
            os: "linux".to_string(),
            wsl: false,
            root: false,
            code: 0,
        }
    }
}

impl PromptContext {
    /// Build a context from the current process environment, falling back
    /// to the defaults for anything that cannot be determined
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let user_name = env::var("USER")
            .or_else(|_| env::var("USERNAME"))
            .unwrap_or(defaults.user_name);

        let host_name = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or(defaults.host_name);

        let home = dirs::home_dir()
            .map(|p| p.display().to_string())
            .or_else(|| env::var("HOME").ok())
            .or_else(|| env::var("USERPROFILE").ok())
            .unwrap_or(defaults.home);

        let pwd = env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| home.clone());

        let shell = env::var("SHELL")
            .ok()
            .and_then(|path| {
                path.rsplit(['/', '\\'])
                    .next()
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or(defaults.shell);

        Self {
            user_name,
            host_name,
            shell,
            pwd,
            home,
            os: env::consts::OS.to_string(),
            wsl: env::var_os("WSL_DISTRO_NAME").is_some(),
            root: user_is_root(),
            code: 0,
        }
    }

    /// Merge an update; keys it leaves unset keep their current value
    pub fn merge(&mut self, update: ContextUpdate) {
        let ContextUpdate {
            user_name,
            host_name,
            shell,
            pwd,
            home,
            os,
            wsl,
            root,
            code,
        } = update;

        if let Some(v) = user_name {
            self.user_name = v;
        }
        if let Some(v) = host_name {
            self.host_name = v;
        }
        if let Some(v) = shell {
            self.shell = v;
        }
        if let Some(v) = pwd {
            self.pwd = v;
        }
        if let Some(v) = home {
            self.home = v;
        }
        if let Some(v) = os {
            self.os = v;
        }
        if let Some(v) = wsl {
            self.wsl = v;
        }
        if let Some(v) = root {
            self.root = v;
        }
        if let Some(v) = code {
            self.code = v;
        }
    }

    /// PWD with the home directory prefix shown as `~`
    pub fn display_path(&self) -> String {
        let home = self.home.trim_end_matches('/');
        if home.is_empty() {
            return self.pwd.clone();
        }
        match self.pwd.strip_prefix(home) {
            Some("") | Some("/") => "~".to_string(),
            Some(rest) if rest.starts_with('/') => format!("~{}", rest),
            _ => self.pwd.clone(),
        }
    }
}

#[cfg(unix)]
fn user_is_root() -> bool {
    env::var("USER").map(|u| u == "root").unwrap_or(false)
}

#[cfg(not(unix))]
fn user_is_root() -> bool {
    false
}

/// Partial context update, every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextUpdate {
    #[serde(rename = "UserName", alias = "user_name", skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(rename = "HostName", alias = "host_name", skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(rename = "Shell", alias = "shell", skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    #[serde(rename = "PWD", alias = "pwd", skip_serializing_if = "Option::is_none")]
    pub pwd: Option<String>,
    #[serde(rename = "HOME", alias = "home", skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    #[serde(rename = "OS", alias = "os", skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(rename = "WSL", alias = "wsl", skip_serializing_if = "Option::is_none")]
    pub wsl: Option<bool>,
    #[serde(rename = "Root", alias = "root", skip_serializing_if = "Option::is_none")]
    pub root: Option<bool>,
    #[serde(rename = "Code", alias = "code", skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

impl ContextUpdate {
    /// Collect the recognised keys of a JSON object.
    ///
    /// Unknown keys, keys holding the wrong JSON type and non-object input
    /// are skipped so a partial update never fails.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut update = Self::default();
        let Some(map) = value.as_object() else {
            return update;
        };

        let text = |key: &str| map.get(key).and_then(|v| v.as_str()).map(str::to_string);
        let flag = |key: &str| map.get(key).and_then(|v| v.as_bool());

        update.user_name = text("UserName");
        update.host_name = text("HostName");
        update.shell = text("Shell");
        update.pwd = text("PWD");
        update.home = text("HOME");
        update.os = text("OS");
        update.wsl = flag("WSL");
        update.root = flag("Root");
        update.code = map
            .get("Code")
            .and_then(|v| v.as_i64())
            .and_then(|n| i32::try_from(n).ok());
        update
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Update that overwrites every field with `context`
impl From<PromptContext> for ContextUpdate {
    fn from(context: PromptContext) -> Self {
        Self {
            user_name: Some(context.user_name),
            host_name: Some(context.host_name),
            shell: Some(context.shell),
            pwd: Some(context.pwd),
            home: Some(context.home),
            os: Some(context.os),
            wsl: Some(context.wsl),
            root: Some(context.root),
            code: Some(context.code),
        }
    }
}
