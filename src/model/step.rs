use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flow::ApproverType;

/// Approver category as stored by the backend step model.
///
/// The editor's `group` type has no backend counterpart and is stored as `dynamic`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StepApproverType {
    #[default]
    User,
    Role,
    Dynamic,
}

impl From<ApproverType> for StepApproverType {
    fn from(value: ApproverType) -> Self {
        match value {
            ApproverType::User => StepApproverType::User,
            ApproverType::Role => StepApproverType::Role,
            ApproverType::Group => StepApproverType::Dynamic,
        }
    }
}

impl From<StepApproverType> for ApproverType {
    fn from(value: StepApproverType) -> Self {
        match value {
            StepApproverType::User => ApproverType::User,
            StepApproverType::Role => ApproverType::Role,
            StepApproverType::Dynamic => ApproverType::Group,
        }
    }
}

fn default_min_approvals() -> u32 {
    1
}

/// A single approval step record of the external flow API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StepModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    pub step_order: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub approver_type: StepApproverType,
    #[serde(default)]
    pub approver_id: Option<String>,
    #[serde(default)]
    pub approver_role: Option<String>,
    #[serde(default)]
    pub approver_rule: Option<serde_json::Value>,
    #[serde(default)]
    pub require_all: bool,
    #[serde(default = "default_min_approvals")]
    pub min_approvals: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StepModel {
    /// Typed view of `approver_rule`, if it carries the editor's `{type, approvers}` shape.
    pub fn rule(&self) -> Option<ApproverRule> {
        self.approver_rule.as_ref().and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Full approver assignment of a step.
///
/// The flat `approver_id` field only holds the first approver; the rule keeps all of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApproverRule {
    #[serde(rename = "type")]
    pub kind: ApproverType,
    #[serde(default)]
    pub approvers: Vec<String>,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::{ApproverRule, ApproverType, StepApproverType, StepModel};

    #[test]
    fn test_step_model_deserialize() {
        let value = json!({
            "id": "42",
            "flow_id": "f-1",
            "step_order": 2,
            "name": "Finance",
            "description": null,
            "approver_type": "dynamic",
            "approver_id": "g-7",
            "approver_role": null,
            "approver_rule": { "type": "group", "approvers": ["g-7", "g-8"] },
            "require_all": true,
            "created_at": "2024-03-01T10:00:00Z",
            "is_active": true
        });
        let step: StepModel = serde_json::from_value(value).unwrap();
        assert_eq!(step.step_order, 2);
        assert_eq!(step.approver_type, StepApproverType::Dynamic);
        assert_eq!(step.min_approvals, 1);
        assert!(step.created_at.is_some());
        assert_eq!(
            step.rule(),
            Some(ApproverRule {
                kind: ApproverType::Group,
                approvers: vec!["g-7".to_string(), "g-8".to_string()],
            })
        );
    }

    #[test]
    fn test_foreign_rule_is_ignored() {
        let step = StepModel {
            name: "Legal".to_string(),
            approver_rule: Some(json!({ "expression": "amount > 1000" })),
            ..Default::default()
        };
        assert_eq!(step.rule(), None);
    }

    #[test]
    fn test_approver_type_mapping() {
        assert_eq!(StepApproverType::from(ApproverType::Group), StepApproverType::Dynamic);
        assert_eq!(ApproverType::from(StepApproverType::Dynamic), ApproverType::Group);
        assert_eq!(StepApproverType::Role.as_ref(), "role");
    }
}
