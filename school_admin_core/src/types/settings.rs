//! 系统设置

use serde::{Deserialize, Serialize};

/// 系统设置，整体读取和替换
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub system_name: String,
    pub version: String,
    pub allow_register: bool,
    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default)]
    pub enrollment_deadline: Option<String>,
}

/// 设置更新
///
/// `enrollment_deadline` 为 `Some(None)` 时发送 `null`，清除截止日期。
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_register: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_deadline: Option<Option<String>>,
}

impl From<SystemSettings> for SettingsPatch {
    fn from(settings: SystemSettings) -> Self {
        Self {
            system_name: Some(settings.system_name),
            version: Some(settings.version),
            allow_register: Some(settings.allow_register),
            maintenance_mode: Some(settings.maintenance_mode),
            enrollment_deadline: Some(settings.enrollment_deadline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_can_clear_deadline() {
        let patch = SettingsPatch {
            allow_register: Some(false),
            enrollment_deadline: Some(None),
            ..SettingsPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "allowRegister": false, "enrollmentDeadline": null })
        );
    }

    #[test]
    fn test_untouched_fields_are_omitted() {
        let patch = SettingsPatch {
            system_name: Some("迎新系统".into()),
            ..SettingsPatch::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "systemName": "迎新系统" }));
    }
}
